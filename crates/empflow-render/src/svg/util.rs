// Shared SVG string helpers.

use std::fmt::Write as _;

pub(super) fn fmt(v: f64) -> FmtDisplay {
    FmtDisplay(v)
}

/// SVG number: at most 3 fractional digits, no `-0`, no float noise.
#[derive(Debug, Clone, Copy)]
pub(super) struct FmtDisplay(f64);

impl std::fmt::Display for FmtDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }
        let mut v = (v * 1000.0).round() / 1000.0;
        if v == 0.0 {
            v = 0.0;
        }
        write!(f, "{v}")
    }
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

pub(super) fn escape_xml(text: &str) -> EscapeXmlDisplay<'_> {
    EscapeXmlDisplay(text)
}

pub(super) struct EscapeXmlDisplay<'a>(&'a str);

impl std::fmt::Display for EscapeXmlDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::with_capacity(self.0.len());
        escape_xml_into(&mut buf, self.0);
        f.write_str(&buf)
    }
}

/// `values` attribute for a SMIL `<animate>`: one coordinate per keyframe.
pub(super) fn join_numbers(values: impl IntoIterator<Item = f64>) -> String {
    let mut out = String::new();
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let _ = write!(&mut out, "{}", fmt(v));
    }
    out
}
