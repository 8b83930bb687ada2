use crate::inputs::DisplayValue;

/// Formats a stat value for display.
///
/// Numbers are rounded to an integer and grouped by thousands with a plain space (the
/// locale's no-break space is normalized to U+0020): `1234567` -> `1 234 567`. Strings pass
/// through unchanged.
pub fn format_stat(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Number(v) => group_thousands(*v),
        DisplayValue::Text(s) => s.clone(),
    }
}

pub fn group_thousands(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
