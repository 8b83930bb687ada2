//! SVG writer for a [`FlowchartLayout`].
//!
//! Output is a standalone document with explicit presentation attributes (so static
//! renderers need no CSS support) plus a `<style>` block carrying the token custom properties
//! for consumers that restyle the markup.

mod util;

use crate::animation::Direction;
use crate::model::{
    CardLayout, ConnectorLayout, DotLayout, FlowchartLayout, LayoutImage, LayoutPoint, TextRun,
};
use empflow_core::ErpRow;
use std::fmt::Write as _;
use util::{escape_xml, escape_xml_into, fmt, join_numbers};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes internal ids (filters, connectors).
    pub diagram_id: Option<String>,
    /// When false, dots are drawn at their start position without SMIL animation.
    pub animate: bool,
    /// Overrides the theme background (`transparent` / `none` omit the background rect).
    pub background: Option<String>,
    /// When true, embed the token custom properties in the `<style>` block.
    pub include_css_vars: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            animate: true,
            background: None,
            include_css_vars: true,
        }
    }
}

pub const DEFAULT_DIAGRAM_ID: &str = "empflow";

pub fn render_flowchart_svg(layout: &FlowchartLayout, options: &SvgRenderOptions) -> String {
    let id = options
        .diagram_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIAGRAM_ID);
    let theme = &layout.theme;
    let tokens = &layout.tokens;
    let w = layout.frame.width;
    let h = layout.frame.height;

    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" class="empflow" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-roledescription="flowchart" data-viewport="{class}" data-tall="{tall}" data-measured="{measured}" font-family="{font}">"#,
        id = escape_xml(id),
        w = fmt(w),
        h = fmt(h),
        class = tokens.viewport.class,
        tall = tokens.viewport.tall,
        measured = layout.measured,
        font = escape_xml(&theme.font_family),
    );

    out.push_str("<style>");
    if options.include_css_vars {
        let _ = write!(&mut out, "#{}{{", escape_xml(id));
        escape_xml_into(&mut out, &tokens.css_declarations());
        out.push('}');
    }
    let _ = write!(
        &mut out,
        "#{id} .ef-connector{{fill:none;stroke:{line};}}#{id} .ef-dot{{fill:{dot};stroke:{dot};}}#{id} .ef-card{{fill:{card};}}",
        id = escape_xml(id),
        line = escape_xml(&theme.line_color),
        dot = escape_xml(&theme.dot_color),
        card = escape_xml(&theme.card_background),
    );
    out.push_str("</style>");

    let _ = write!(
        &mut out,
        r##"<defs><filter id="{id}-shadow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{blur}" flood-color="#000" flood-opacity="{opacity}"/></filter></defs>"##,
        id = escape_xml(id),
        blur = fmt(theme.shadow_blur * tokens.scale_factor / 2.0),
        opacity = fmt(theme.shadow_opacity),
    );

    let background = options.background.as_deref().unwrap_or(&theme.background);
    if !matches!(background.trim(), "" | "transparent" | "none") {
        let _ = write!(
            &mut out,
            r#"<rect class="ef-background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            fmt(w),
            fmt(h),
            escape_xml(background)
        );
    }

    out.push_str(r#"<g class="ef-connectors">"#);
    for c in &layout.connectors {
        render_connector(&mut out, id, c, &theme.line_color);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="ef-dots">"#);
    for d in &layout.dots {
        render_dot(&mut out, d, &theme.dot_color, options.animate);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="ef-slots">"#);
    for card in &layout.cards {
        render_card(&mut out, id, card, &theme.card_background);
    }
    render_card(&mut out, id, &layout.center, &theme.card_background);
    out.push_str("</g>");

    if !layout.arrows.is_empty() {
        out.push_str(r#"<g class="ef-arrows">"#);
        for a in &layout.arrows {
            let half = a.size / 2.0;
            let _ = write!(
                &mut out,
                r#"<image class="ef-arrow" data-arrow="{}" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" transform="rotate({} {} {})"/>"#,
                escape_xml(&a.id),
                escape_xml(&a.href),
                fmt(a.center.x - half),
                fmt(a.center.y - half),
                fmt(a.size),
                fmt(a.size),
                fmt(a.rotation),
                fmt(a.center.x),
                fmt(a.center.y),
            );
        }
        out.push_str("</g>");
    }

    for block in &layout.stats {
        let _ = write!(
            &mut out,
            r#"<g class="ef-stats" data-corner="{}">"#,
            block.corner.short_name()
        );
        for row in &block.rows {
            out.push_str(r#"<g class="ef-stat-row">"#);
            for cell in &row.cells {
                if let Some(icon) = &cell.icon {
                    render_image(&mut out, "ef-stat-icon", icon);
                }
                render_text(&mut out, "ef-stat-value", &cell.value);
                if let Some(suffix) = &cell.suffix {
                    render_text(&mut out, "ef-stat-suffix", suffix);
                }
            }
            out.push_str("</g>");
        }
        out.push_str("</g>");
    }

    if let Some(erp) = &layout.erp {
        out.push_str(r#"<g class="ef-erp">"#);
        for row in &erp.rows {
            let name = match row.row {
                ErpRow::Orders => "orders",
                ErpRow::Sales => "sales",
            };
            let _ = write!(&mut out, r#"<g class="ef-erp-row" data-row="{name}">"#);
            render_text(&mut out, "ef-erp-label", &row.label);
            render_text(&mut out, "ef-erp-value", &row.value);
            render_text(&mut out, "ef-erp-suffix", &row.suffix);
            out.push_str("</g>");
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

/// Path data for a polyline whose interior corners are rounded with quadratic curves.
pub fn rounded_path_data(points: &[LayoutPoint], radius: f64) -> String {
    let mut d = String::new();
    let Some(first) = points.first() else {
        return d;
    };
    let _ = write!(&mut d, "M{} {}", fmt(first.x), fmt(first.y));

    for i in 1..points.len() {
        let p = points[i];
        let is_last = i + 1 == points.len();
        if is_last || radius <= 0.0 {
            let _ = write!(&mut d, " L{} {}", fmt(p.x), fmt(p.y));
            continue;
        }

        let prev = points[i - 1];
        let next = points[i + 1];
        let (in_len, in_dx, in_dy) = unit(prev, p);
        let (out_len, out_dx, out_dy) = unit(p, next);
        let r = radius.min(in_len / 2.0).min(out_len / 2.0);
        let _ = write!(
            &mut d,
            " L{} {} Q{} {} {} {}",
            fmt(p.x - in_dx * r),
            fmt(p.y - in_dy * r),
            fmt(p.x),
            fmt(p.y),
            fmt(p.x + out_dx * r),
            fmt(p.y + out_dy * r),
        );
    }
    d
}

fn unit(a: LayoutPoint, b: LayoutPoint) -> (f64, f64, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f64::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    (len, dx / len, dy / len)
}

fn render_connector(out: &mut String, id: &str, c: &ConnectorLayout, stroke: &str) {
    let _ = write!(
        out,
        r#"<path id="{}-{}" class="ef-connector" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-dasharray="{} {}"/>"#,
        escape_xml(id),
        escape_xml(&c.id),
        rounded_path_data(&c.points, c.corner_radius),
        escape_xml(stroke),
        fmt(c.stroke_width),
        fmt(c.dash),
        fmt(c.dash),
    );
}

fn render_dot(out: &mut String, d: &DotLayout, color: &str, animate: bool) {
    let anim = &d.animation;
    let Some(start) = anim.start() else {
        return;
    };
    let _ = write!(
        out,
        r#"<circle class="ef-dot" data-dot="{}" data-path="{}" data-direction="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}""#,
        escape_xml(&d.id),
        anim.path.name(),
        match anim.direction {
            Direction::Normal => "normal",
            Direction::Reverse => "reverse",
        },
        fmt(start.x),
        fmt(start.y),
        fmt(d.radius),
        escape_xml(color),
        escape_xml(color),
        fmt(d.stroke_width),
    );
    if !animate {
        out.push_str("/>");
        return;
    }

    out.push('>');
    let frames = anim.playback_keyframes();
    let key_times = join_numbers(frames.iter().map(|k| k.offset));
    for (attr, values) in [
        ("cx", join_numbers(frames.iter().map(|k| k.point.x))),
        ("cy", join_numbers(frames.iter().map(|k| k.point.y))),
    ] {
        let _ = write!(
            out,
            r#"<animate attributeName="{attr}" values="{values}" keyTimes="{key_times}" dur="{}s" calcMode="linear" repeatCount="indefinite"/>"#,
            fmt(anim.period),
        );
    }
    out.push_str("</circle>");
}

fn render_card(out: &mut String, id: &str, card: &CardLayout, fill: &str) {
    let r = &card.rect;
    let _ = write!(
        out,
        r#"<g class="ef-slot" data-slot="{}" data-mode="{}"><rect class="ef-card" x="{}" y="{}" width="{}" height="{}" fill="{}" filter="url(#{}-shadow)"/>"#,
        card.slot.as_str(),
        card.mode.as_str(),
        fmt(r.x),
        fmt(r.y),
        fmt(r.width),
        fmt(r.height),
        escape_xml(fill),
        escape_xml(id),
    );
    if let Some(image) = &card.image {
        render_image(out, "ef-card-image", image);
    }
    if let Some(content) = &card.number {
        render_text(out, "ef-big-number", &content.number);
        let b = &content.icon_box;
        let _ = write!(
            out,
            r#"<rect class="ef-icon-box" x="{}" y="{}" width="{}" height="{}" fill="none" data-empty="{}"/>"#,
            fmt(b.x),
            fmt(b.y),
            fmt(b.width),
            fmt(b.height),
            content.icon.is_none(),
        );
        if let Some(icon) = &content.icon {
            render_image(out, "ef-card-icon", icon);
        }
    }
    out.push_str("</g>");
}

fn render_image(out: &mut String, class: &str, image: &LayoutImage) {
    let r = &image.rect;
    let _ = write!(
        out,
        r#"<image class="{class}" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" aria-label="{alt}"><title>{alt}</title></image>"#,
        escape_xml(&image.href),
        fmt(r.x),
        fmt(r.y),
        fmt(r.width),
        fmt(r.height),
        alt = escape_xml(&image.alt),
    );
}

fn render_text(out: &mut String, class: &str, run: &TextRun) {
    let _ = write!(
        out,
        r#"<text class="{class}" x="{}" y="{}" dominant-baseline="central" font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
        fmt(run.x),
        fmt(run.y),
        fmt(run.font_size),
        run.font_weight,
        escape_xml(&run.fill),
        escape_xml(&run.text),
    );
}
