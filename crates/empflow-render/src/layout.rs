//! Template geometry.
//!
//! Corner items are described once, in fractions of the top-left quadrant, and mirrored
//! around the hub for the other three corners. The two straight items are described in the
//! top half of the frame and mirrored with [`Flip::BOTH`] into the bottom half. Text is laid
//! out after mirroring so it always reads left to right.

use crate::LayoutOptions;
use crate::animation::{Direction, DotAnimation, KeyframePath};
use crate::model::{
    ArrowLayout, CardLayout, CardMode, ConnectorLayout, DotLayout, ErpLayout, ErpRowLayout,
    FlowchartLayout, LayoutImage, LayoutPoint, LayoutRect, NumberCardContent, SlotId,
    StatCellLayout, StatRowLayout, StatsBlockLayout, TextRun,
};
use crate::overrides::{BreakpointOverrides, TextMetricsSet};
use crate::text::TextStyle;
use empflow_core::geom::{self, Flip, Point, Rect};
use empflow_core::{
    Corner, ErpRow, Measurement, ScaleTokens, SlotInputs, StatCell, Theme, format_stat,
};

/// Frame used before the container has been measured.
pub const FALLBACK_FRAME: (f64, f64) = (1800.0, 900.0);

// Top-left quadrant fractions.
const CARD_CENTER: (f64, f64) = (0.30, 0.30);
const NUMBER_CARD_SIZE: (f64, f64) = (0.35, 0.25);
const IMAGE_CARD_SIZE: (f64, f64) = (0.25, 0.25);
const CORNER_LINE: [(f64, f64); 4] = [(0.28, 0.40), (0.55, 0.40), (0.55, 0.94), (0.99, 0.94)];
const CORNER_DOT_ROUTE: [(f64, f64); 4] = [(0.28, 0.40), (0.55, 0.40), (0.55, 0.94), (0.80, 0.94)];
const STATS_ORIGIN: (f64, f64) = (0.02, 0.58);
const STATS_WIDTH: f64 = 0.34;
const NUMBER_ICON_HEIGHT: f64 = 0.9;
const NUMBER_ICON_WIDTH: f64 = 0.36;

// Top-half frame fractions.
const BOTTOM_MAIN_X: f64 = 0.491;
const BOTTOM_MAIN_LINE: (f64, f64) = (0.15, 0.41);
const BOTTOM_CARD_TOP: f64 = 0.14;
const BOTTOM_CARD_SIZE: (f64, f64) = (0.175, 0.125);
const PARALLEL_X: f64 = 0.522;
const PARALLEL_END: f64 = 0.46;
const PARALLEL_RUN: f64 = 0.45;
const DOT_HUB_STOP: f64 = 0.475;

// Whole-frame fractions.
const CENTER_CARD_SIZE: (f64, f64) = (0.216, 0.209);
const CENTER_CARD_MOBILE_WIDTH: f64 = 0.288;
const ARROWS: [(&str, f64, f64, f64); 5] = [
    ("arrow-top-left", 0.38, 0.468, 0.0),
    ("arrow-bottom-left", 0.38, 0.532, 0.0),
    ("arrow-top-right", 0.612, 0.468, 180.0),
    ("arrow-parallel", 0.478, 0.605, 270.0),
    ("arrow-bottom", 0.509, 0.732, 90.0),
];
const ERP_CENTER_X: f64 = 0.615;
const ERP_TOP: f64 = 0.88;
const ERP_WIDTH: f64 = 0.40;
const ERP_MOBILE_CENTER_X: f64 = 0.5;
const ERP_MOBILE_WIDTH: f64 = 0.65;

const LINE_HEIGHT: f64 = 1.1;

struct Ctx<'a> {
    width: f64,
    height: f64,
    hub: Point,
    tokens: &'a ScaleTokens,
    theme: &'a Theme,
    overrides: BreakpointOverrides,
    text: TextMetricsSet,
    options: &'a LayoutOptions,
}

impl Ctx<'_> {
    fn quadrant_point(&self, flip: Flip, (fx, fy): (f64, f64)) -> Point {
        let p = geom::point(fx * self.width / 2.0, fy * self.height / 2.0);
        flip.apply_point(self.hub, p)
    }

    fn top_half_point(&self, (fx, fy): (f64, f64)) -> Point {
        Flip::BOTH.apply_point(self.hub, geom::point(fx * self.width, fy * self.height))
    }

    fn measure(&self, text: &str, font_size: f64, font_weight: u16) -> f64 {
        let mut style = TextStyle::new(font_size, font_weight);
        style.font_family = Some(self.theme.font_family.clone());
        self.options.text_measurer.measure(text, &style).width
    }

    fn text_run(&self, text: String, x: f64, y: f64, font_size: f64, font_weight: u16, fill: &str) -> TextRun {
        let width = self.measure(&text, font_size, font_weight);
        TextRun {
            text,
            x,
            y,
            width,
            font_size,
            font_weight,
            fill: fill.to_string(),
        }
    }

    fn connector(&self, id: String, points: Vec<Point>, corner_radius: f64) -> ConnectorLayout {
        ConnectorLayout {
            id,
            points: points.into_iter().map(LayoutPoint::from).collect(),
            corner_radius,
            stroke_width: self.tokens.line_width,
            dash: 3.0 * self.tokens.line_width,
        }
    }

    fn dot(&self, id: String, path: KeyframePath, route: &[Point], direction: Direction) -> DotLayout {
        DotLayout {
            id,
            radius: self.tokens.dot_size / 2.0,
            stroke_width: self.tokens.dot_border,
            animation: DotAnimation::new(path, route, self.theme.animation_period, direction),
        }
    }
}

fn image(href: &str, rect: Rect, alt: &str) -> LayoutImage {
    LayoutImage {
        href: href.to_string(),
        rect: LayoutRect::from(rect),
        alt: alt.to_string(),
    }
}

struct CornerItem {
    card: CardLayout,
    connector: ConnectorLayout,
    dot: DotLayout,
    stats: Option<StatsBlockLayout>,
}

/// Lays out one corner from the top-left rules and the corner's mirroring.
fn layout_corner(ctx: &Ctx<'_>, inputs: &SlotInputs, corner: Corner) -> CornerItem {
    let flip = corner.flip();
    let qw = ctx.width / 2.0;
    let qh = ctx.height / 2.0;
    let cs = ctx.tokens.card_scale;
    let number = inputs.corner_number(corner);
    let mode = if number.is_some() {
        CardMode::NumberCard
    } else {
        CardMode::Image
    };

    let (w, h) = match (ctx.overrides.fixed_cards, mode) {
        (Some(fixed), _) => (fixed.corner_width, fixed.corner_height),
        (None, CardMode::NumberCard) => (NUMBER_CARD_SIZE.0 * qw * cs, NUMBER_CARD_SIZE.1 * qh * cs),
        (None, CardMode::Image) => (IMAGE_CARD_SIZE.0 * qw, IMAGE_CARD_SIZE.1 * qh),
    };
    let local = geom::centered_rect(CARD_CENTER.0 * qw, CARD_CENTER.1 * qh, w, h);
    let rect = flip.apply_rect(ctx.hub, &local);

    let slot = SlotId::from(corner);
    let href = inputs.corner_image(corner);
    let card = match number {
        None => CardLayout {
            slot,
            mode,
            rect: LayoutRect::from(rect),
            image: href.map(|h| image(h, rect, slot.as_str())),
            number: None,
        },
        Some(value) => {
            let padding = ctx
                .overrides
                .fixed_cards
                .map_or(ctx.tokens.card_padding, |f| f.card_padding);
            let font_size = ctx
                .overrides
                .fixed_cards
                .map_or(ctx.tokens.big_number_size, |f| f.big_number_size);
            let center = rect.center();
            let side = (NUMBER_ICON_HEIGHT * rect.height()).min(NUMBER_ICON_WIDTH * rect.width());
            let icon_box = geom::rect(rect.max_x() - padding - side, center.y - side / 2.0, side, side);
            CardLayout {
                slot,
                mode,
                rect: LayoutRect::from(rect),
                image: None,
                number: Some(NumberCardContent {
                    number: ctx.text_run(
                        value.raw(),
                        rect.min_x() + padding,
                        center.y,
                        font_size,
                        300,
                        &ctx.theme.number_color,
                    ),
                    icon_box: LayoutRect::from(icon_box),
                    icon: href.map(|h| image(h, icon_box, slot.as_str())),
                }),
            }
        }
    };

    let line = CORNER_LINE.iter().map(|&p| ctx.quadrant_point(flip, p)).collect();
    let route: Vec<Point> = CORNER_DOT_ROUTE
        .iter()
        .map(|&p| ctx.quadrant_point(flip, p))
        .collect();
    let direction = match corner {
        Corner::TopLeft | Corner::BottomLeft => Direction::Normal,
        Corner::TopRight | Corner::BottomRight => Direction::Reverse,
    };

    CornerItem {
        card,
        connector: ctx.connector(
            format!("line-{}", slot.as_str()),
            line,
            ctx.tokens.corner_radius,
        ),
        dot: ctx.dot(
            format!("dot-{}", slot.as_str()),
            KeyframePath::CornerZig,
            &route,
            direction,
        ),
        stats: layout_stats(ctx, inputs, corner),
    }
}

/// One stat row: cell runs positioned relative to the row's left edge and vertical center.
fn stat_row(ctx: &Ctx<'_>, inputs: &SlotInputs, cells: &[StatCell<'_>], left: f64, cy: f64) -> (Vec<StatCellLayout>, f64) {
    let m = &ctx.text;
    let mut x = left;
    let mut out = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            x += m.pair_gap;
        }
        let icon = inputs.icon(cell.icon).map(|href| {
            let r = geom::rect(x, cy - m.icon_size / 2.0, m.icon_size, m.icon_size);
            x += m.icon_size + m.column_gap;
            image(href, r, cell.icon.alt())
        });
        let value = ctx.text_run(
            cell.value.formatted(),
            x,
            cy,
            m.value_size,
            800,
            &ctx.theme.value_color,
        );
        x += value.width;
        let suffix = cell.currency.then(|| {
            x += m.column_gap;
            let run = ctx.text_run(
                ctx.theme.currency_suffix.clone(),
                x,
                cy,
                m.suffix_size,
                600,
                &ctx.theme.muted_color,
            );
            x += run.width;
            run
        });
        out.push(StatCellLayout {
            icon_kind: cell.icon,
            icon,
            value,
            suffix,
        });
    }
    (out, x - left)
}

fn layout_stats(ctx: &Ctx<'_>, inputs: &SlotInputs, corner: Corner) -> Option<StatsBlockLayout> {
    let rows = inputs.corner_stat_rows(corner);
    if rows.is_empty() {
        return None;
    }

    let m = &ctx.text;
    let row_heights: Vec<f64> = rows
        .iter()
        .map(|row| {
            let text_h = m.value_size * LINE_HEIGHT;
            let has_icon = row.iter().any(|c| inputs.icon(c.icon).is_some());
            if has_icon { text_h.max(m.icon_size) } else { text_h }
        })
        .collect();
    let block_h =
        row_heights.iter().sum::<f64>() + m.row_gap * (row_heights.len().saturating_sub(1)) as f64;

    let qw = ctx.width / 2.0;
    let qh = ctx.height / 2.0;
    let local = geom::rect(STATS_ORIGIN.0 * qw, STATS_ORIGIN.1 * qh, STATS_WIDTH * qw, block_h);
    let rect = corner.flip().apply_rect(ctx.hub, &local);

    let mut y = rect.min_y();
    let mut laid = Vec::with_capacity(rows.len());
    for (row, h) in rows.iter().zip(&row_heights) {
        let (cells, width) = stat_row(ctx, inputs, row, rect.min_x(), y + h / 2.0);
        laid.push(StatRowLayout {
            rect: LayoutRect::from(geom::rect(rect.min_x(), y, width, *h)),
            cells,
        });
        y += h + m.row_gap;
    }

    Some(StatsBlockLayout {
        corner,
        rect: LayoutRect::from(rect),
        rows: laid,
    })
}

fn layout_erp(ctx: &Ctx<'_>, inputs: &SlotInputs) -> Option<ErpLayout> {
    let rows = inputs.erp_rows();
    if rows.is_empty() {
        return None;
    }

    let m = &ctx.text;
    let (cx, wf) = if ctx.overrides.compact_text {
        (ERP_MOBILE_CENTER_X, ERP_MOBILE_WIDTH)
    } else {
        (ERP_CENTER_X, ERP_WIDTH)
    };
    let width = wf * ctx.width;
    let left = cx * ctx.width - width / 2.0;
    let top = ERP_TOP * ctx.height;
    let row_h = m.value_size.max(m.suffix_size) * LINE_HEIGHT;

    let mut y = top;
    let mut out = Vec::with_capacity(rows.len());
    for (row, value) in rows {
        let label_text = match row {
            ErpRow::Orders => ctx.theme.orders_label.clone(),
            ErpRow::Sales => ctx.theme.sales_label.clone(),
        };
        let cy = y + row_h / 2.0;
        let mut label = ctx.text_run(label_text, left, cy, m.suffix_size, 700, &ctx.theme.muted_color);
        let mut value = ctx.text_run(
            format_stat(value),
            0.0,
            cy,
            m.value_size,
            800,
            &ctx.theme.value_color,
        );
        let mut suffix = ctx.text_run(
            ctx.theme.currency_suffix.clone(),
            0.0,
            cy,
            m.suffix_size,
            600,
            &ctx.theme.muted_color,
        );

        let row_w = label.width + m.column_gap + value.width + m.column_gap + suffix.width;
        // Compact rows are centered in the block; wide rows hug its left edge.
        let start = if ctx.overrides.compact_text {
            left + ((width - row_w) / 2.0).max(0.0)
        } else {
            left
        };
        label.x = start;
        value.x = label.x + label.width + m.column_gap;
        suffix.x = value.x + value.width + m.column_gap;

        out.push(ErpRowLayout {
            row,
            label,
            value,
            suffix,
        });
        y += row_h + m.erp_row_gap;
    }
    let height = (y - m.erp_row_gap - top).max(0.0);

    Some(ErpLayout {
        rect: LayoutRect::from(geom::rect(left, top, width, height)),
        rows: out,
    })
}

fn layout_bottom_main(ctx: &Ctx<'_>, inputs: &SlotInputs) -> (CardLayout, ConnectorLayout, DotLayout) {
    let x = BOTTOM_MAIN_X;
    let line = vec![
        ctx.top_half_point((x, BOTTOM_MAIN_LINE.0)),
        ctx.top_half_point((x, BOTTOM_MAIN_LINE.1)),
    ];
    let route = [
        ctx.top_half_point((x, BOTTOM_MAIN_LINE.0)),
        ctx.top_half_point((x, DOT_HUB_STOP)),
    ];

    let cs = ctx.tokens.card_scale;
    let (w, h) = match ctx.overrides.fixed_cards {
        Some(fixed) => (fixed.corner_width, fixed.corner_height),
        None => (
            BOTTOM_CARD_SIZE.0 * ctx.width * cs,
            BOTTOM_CARD_SIZE.1 * ctx.height * cs,
        ),
    };
    let local = geom::rect(x * ctx.width - w / 2.0, BOTTOM_CARD_TOP * ctx.height, w, h);
    let rect = Flip::BOTH.apply_rect(ctx.hub, &local);
    let slot = SlotId::BottomCenter;
    let card = CardLayout {
        slot,
        mode: CardMode::Image,
        rect: LayoutRect::from(rect),
        image: inputs
            .bottom_center_image()
            .map(|h| image(h, rect, slot.as_str())),
        number: None,
    };

    (
        card,
        ctx.connector("line-bottom-main".to_string(), line, 0.0),
        ctx.dot(
            "dot-bottom-main".to_string(),
            KeyframePath::StraightDeep,
            &route,
            Direction::Normal,
        ),
    )
}

fn layout_parallel(ctx: &Ctx<'_>) -> (ConnectorLayout, DotLayout) {
    let x = PARALLEL_X;
    let start = PARALLEL_END - PARALLEL_RUN * ctx.overrides.straight_extent;
    let line = vec![
        ctx.top_half_point((x, start)),
        ctx.top_half_point((x, PARALLEL_END)),
    ];
    let route = [
        ctx.top_half_point((x, start)),
        ctx.top_half_point((x, DOT_HUB_STOP)),
    ];
    (
        ctx.connector("line-parallel".to_string(), line, 0.0),
        ctx.dot(
            "dot-parallel".to_string(),
            KeyframePath::StraightDeeper,
            &route,
            Direction::Reverse,
        ),
    )
}

fn layout_center(ctx: &Ctx<'_>, inputs: &SlotInputs) -> CardLayout {
    let cs = ctx.tokens.card_scale;
    let (w, h, image_w) = match ctx.overrides.fixed_cards {
        Some(fixed) => (CENTER_CARD_MOBILE_WIDTH * ctx.width * cs, fixed.center_height, 1.0),
        None => (
            CENTER_CARD_SIZE.0 * ctx.width * cs,
            CENTER_CARD_SIZE.1 * ctx.height * cs,
            0.8,
        ),
    };
    let rect = geom::centered_rect(ctx.hub.x, ctx.hub.y, w, h);
    let image_rect = geom::centered_rect(ctx.hub.x, ctx.hub.y, w * image_w, h);
    CardLayout {
        slot: SlotId::Center,
        mode: CardMode::Image,
        rect: LayoutRect::from(rect),
        image: inputs
            .center_image()
            .map(|c| image(c.src(), image_rect, c.alt())),
        number: None,
    }
}

fn layout_arrows(ctx: &Ctx<'_>, inputs: &SlotInputs) -> Vec<ArrowLayout> {
    let Some(href) = inputs.arrow_image() else {
        return Vec::new();
    };
    let size = ctx.overrides.arrow_size(ctx.width, ctx.tokens);
    ARROWS
        .iter()
        .map(|&(id, fx, fy, rotation)| ArrowLayout {
            id: id.to_string(),
            center: LayoutPoint {
                x: fx * ctx.width,
                y: fy * ctx.height,
            },
            size,
            rotation,
            href: href.to_string(),
        })
        .collect()
}

/// Computes the full frame layout for one measurement.
pub fn layout_flowchart(
    inputs: &SlotInputs,
    measurement: &Measurement,
    tokens: &ScaleTokens,
    options: &LayoutOptions,
) -> FlowchartLayout {
    let container = measurement.measured_container();
    let (width, height) = container.map_or(FALLBACK_FRAME, |c| (c.width, c.height));
    let overrides = BreakpointOverrides::for_profile(tokens.viewport);
    let ctx = Ctx {
        width,
        height,
        hub: geom::point(width / 2.0, height / 2.0),
        tokens,
        theme: &options.theme,
        overrides,
        text: TextMetricsSet::resolve(tokens, &overrides, measurement.viewport),
        options,
    };

    let mut connectors = Vec::with_capacity(6);
    let mut dots = Vec::with_capacity(6);
    let mut cards = Vec::with_capacity(5);
    let mut stats = Vec::new();
    for corner in Corner::ALL {
        let item = layout_corner(&ctx, inputs, corner);
        connectors.push(item.connector);
        dots.push(item.dot);
        cards.push(item.card);
        stats.extend(item.stats);
    }

    let (bottom_card, bottom_line, bottom_dot) = layout_bottom_main(&ctx, inputs);
    let (parallel_line, parallel_dot) = layout_parallel(&ctx);
    connectors.push(bottom_line);
    connectors.push(parallel_line);
    dots.push(bottom_dot);
    dots.push(parallel_dot);
    cards.push(bottom_card);

    let center = layout_center(&ctx, inputs);
    let arrows = layout_arrows(&ctx, inputs);
    let erp = layout_erp(&ctx, inputs);

    tracing::debug!(
        frame_width = width,
        frame_height = height,
        class = %tokens.viewport.class,
        number_cards = cards.iter().filter(|c| c.mode == CardMode::NumberCard).count(),
        stats_blocks = stats.len(),
        arrows = arrows.len(),
        erp = erp.is_some(),
        "laid out flowchart"
    );

    FlowchartLayout {
        frame: LayoutRect::from(geom::rect(0.0, 0.0, width, height)),
        hub: LayoutPoint::from(ctx.hub),
        measured: container.is_some(),
        tokens: *tokens,
        theme: options.theme.clone(),
        connectors,
        dots,
        cards,
        center,
        arrows,
        stats,
        erp,
    }
}
