use empflow_core::{
    Breakpoints, CenterImage, ContainerSize, Corner, DisplayValue, Measurement, ScaleProfile,
    ScaleTokens, SlotInputs, Viewport,
};
use empflow_render::animation::{Direction, KeyframePath};
use empflow_render::model::{CardMode, FlowchartLayout, SlotId};
use empflow_render::{LayoutOptions, layout_flowchart};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn measured(w: f64, h: f64) -> (Measurement, ScaleTokens) {
    let m = Measurement::new(Some(ContainerSize::new(w, h)), Viewport::new(w, h));
    let tokens = ScaleProfile::default().compute(&m, &Breakpoints::default());
    (m, tokens)
}

fn layout_at(inputs: &SlotInputs, w: f64, h: f64) -> FlowchartLayout {
    let (m, tokens) = measured(w, h);
    layout_flowchart(inputs, &m, &tokens, &LayoutOptions::default())
}

fn n(v: f64) -> Option<DisplayValue> {
    Some(DisplayValue::Number(v))
}

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[test]
fn corner_variant_follows_number_presence() {
    let inputs = SlotInputs {
        top_left: s("tl.png"),
        top_right: s("tr.png"),
        number3: n(12.0),
        number2: n(7.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);

    // image only
    let tl = layout.card(SlotId::TopLeft).unwrap();
    assert_eq!(tl.mode, CardMode::Image);
    assert_eq!(tl.image.as_ref().map(|i| i.href.as_str()), Some("tl.png"));
    assert!(tl.number.is_none());

    // image + number
    let tr = layout.card(SlotId::TopRight).unwrap();
    assert_eq!(tr.mode, CardMode::NumberCard);
    assert!(tr.image.is_none());
    let content = tr.number.as_ref().unwrap();
    assert_eq!(content.number.text, "12");
    assert_eq!(content.icon.as_ref().map(|i| i.href.as_str()), Some("tr.png"));

    // number only: empty icon area
    let bl = layout.card(SlotId::BottomLeft).unwrap();
    assert_eq!(bl.mode, CardMode::NumberCard);
    let content = bl.number.as_ref().unwrap();
    assert!(content.icon.is_none());
    assert!(content.icon_box.width > 0.0);

    // neither: empty simple card
    let br = layout.card(SlotId::BottomRight).unwrap();
    assert_eq!(br.mode, CardMode::Image);
    assert!(br.image.is_none());
}

#[test]
fn corners_mirror_around_the_hub() {
    let inputs = SlotInputs {
        number1: n(1.0),
        number2: n(2.0),
        number3: n(3.0),
        number4: n(4.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    assert!(approx(layout.hub.x, 900.0));
    assert!(approx(layout.hub.y, 450.0));

    let tl = layout.card(SlotId::TopLeft).unwrap().rect;
    assert!(approx(tl.width, 315.0));
    assert!(approx(tl.height, 112.5));
    assert!(approx(tl.center().x, 270.0));
    assert!(approx(tl.center().y, 135.0));

    let tr = layout.card(SlotId::TopRight).unwrap().rect;
    assert!(approx(tr.center().x, 1530.0));
    assert!(approx(tr.center().y, 135.0));

    let bl = layout.card(SlotId::BottomLeft).unwrap().rect;
    assert!(approx(bl.center().x, 270.0));
    assert!(approx(bl.center().y, 765.0));

    let br = layout.card(SlotId::BottomRight).unwrap().rect;
    assert!(approx(br.center().x, 1530.0));
    assert!(approx(br.center().y, 765.0));
    assert!(approx(br.width, tl.width));
}

#[test]
fn number_card_text_is_not_mirrored() {
    let inputs = SlotInputs {
        number4: n(99.0),
        bottom_right: s("br.png"),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    let card = layout.card(SlotId::BottomRight).unwrap();
    let content = card.number.as_ref().unwrap();
    // Number on the left, icon box on the right, in every corner.
    assert!(content.number.x < content.icon_box.x);
    assert!(approx(content.number.x, card.rect.x + 24.0));
    assert!(approx(content.icon_box.right(), card.rect.right() - 24.0));
}

#[test]
fn corner_connectors_route_to_the_hub() {
    let layout = layout_at(&SlotInputs::default(), 1800.0, 900.0);
    let tl = layout
        .connectors
        .iter()
        .find(|c| c.id == "line-top-left")
        .unwrap();
    let xs: Vec<_> = tl.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xs.len(), 4);
    assert!(approx(xs[0].0, 252.0) && approx(xs[0].1, 180.0));
    assert!(approx(xs[1].0, 495.0) && approx(xs[1].1, 180.0));
    assert!(approx(xs[2].0, 495.0) && approx(xs[2].1, 423.0));
    assert!(approx(xs[3].0, 891.0) && approx(xs[3].1, 423.0));
    assert!(approx(tl.corner_radius, layout.tokens.corner_radius));
    assert!(approx(tl.stroke_width, layout.tokens.line_width));

    let br = layout
        .connectors
        .iter()
        .find(|c| c.id == "line-bottom-right")
        .unwrap();
    assert!(approx(br.points[0].x, 1548.0));
    assert!(approx(br.points[0].y, 720.0));
}

#[test]
fn straight_items_live_in_the_bottom_half() {
    let inputs = SlotInputs {
        bottom_center: s("bottom.png"),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);

    let card = layout.card(SlotId::BottomCenter).unwrap();
    assert!(approx(card.rect.center().x, 916.2));
    assert!(card.rect.y > layout.hub.y);
    assert!(approx(card.rect.width, 315.0));
    assert!(card.image.is_some());

    let main = layout
        .connectors
        .iter()
        .find(|c| c.id == "line-bottom-main")
        .unwrap();
    assert!(approx(main.points[0].x, 916.2));
    assert!(approx(main.points[0].y, 765.0));
    assert!(approx(main.points[1].y, 531.0));

    let parallel = layout
        .connectors
        .iter()
        .find(|c| c.id == "line-parallel")
        .unwrap();
    assert!(approx(parallel.points[0].x, 860.4));
    assert!(approx(parallel.points[0].y, 729.0));
    assert!(approx(parallel.points[1].y, 486.0));
}

#[test]
fn parallel_line_grows_on_tall_viewports() {
    let short = layout_at(&SlotInputs::default(), 1800.0, 900.0);
    let tall = layout_at(&SlotInputs::default(), 1800.0, 1200.0);
    let len = |l: &FlowchartLayout| {
        let c = l.connectors.iter().find(|c| c.id == "line-parallel").unwrap();
        (c.points[0].y - c.points[1].y).abs() / l.frame.height
    };
    assert!(approx(len(&short), 0.45 * 0.6));
    assert!(approx(len(&tall), 0.45 * 0.75));
}

#[test]
fn dots_use_named_paths_and_directions() {
    let layout = layout_at(&SlotInputs::default(), 1800.0, 900.0);
    assert_eq!(layout.dots.len(), 6);

    let dot = |id: &str| layout.dots.iter().find(|d| d.id == id).unwrap();
    let tl = dot("dot-top-left");
    assert_eq!(tl.animation.path, KeyframePath::CornerZig);
    assert_eq!(tl.animation.direction, Direction::Normal);
    assert_eq!(dot("dot-bottom-left").animation.direction, Direction::Normal);
    assert_eq!(dot("dot-top-right").animation.direction, Direction::Reverse);
    assert_eq!(dot("dot-bottom-right").animation.direction, Direction::Reverse);
    assert_eq!(dot("dot-bottom-main").animation.path, KeyframePath::StraightDeep);
    assert_eq!(dot("dot-bottom-main").animation.direction, Direction::Normal);
    assert_eq!(dot("dot-parallel").animation.path, KeyframePath::StraightDeeper);
    assert_eq!(dot("dot-parallel").animation.direction, Direction::Reverse);

    // Forward dot starts at the card end of its route; reversed dots start at the hub end.
    let start = tl.animation.start().unwrap();
    assert!(approx(start.x, 252.0) && approx(start.y, 180.0));
    let tr = dot("dot-top-right").animation.clone();
    let tr_start = tr.start().unwrap();
    let tr_last = tr.keyframes.last().unwrap().point;
    assert!(approx(tr_start.x, tr_last.x) && approx(tr_start.y, tr_last.y));

    assert!(approx(tl.radius, layout.tokens.dot_size / 2.0));
    assert!(layout.dots.iter().all(|d| approx(d.animation.period, 4.0)));
}

#[test]
fn dot_positions_interpolate_linearly() {
    let layout = layout_at(&SlotInputs::default(), 1800.0, 900.0);
    let dot = layout.dots.iter().find(|d| d.id == "dot-top-left").unwrap();
    // Halfway through the first segment (offset 0.15 of 0.30).
    let p = dot.animation.position_at(0.15).unwrap();
    assert!(approx(p.x, (252.0 + 495.0) / 2.0));
    assert!(approx(p.y, 180.0));
    // Periodic.
    let q = dot.animation.position_at(1.15).unwrap();
    assert!((q.x - p.x).abs() < 1e-6 && (q.y - p.y).abs() < 1e-6);

    let main = layout.dots.iter().find(|d| d.id == "dot-bottom-main").unwrap();
    let rest = main.animation.position_at(0.8).unwrap();
    let end = main.animation.position_at(0.37).unwrap();
    assert!(approx(rest.y, end.y));
}

#[test]
fn stats_blocks_follow_presence() {
    let inputs = SlotInputs {
        icon1: s("money.png"),
        stat1: n(1_234_567.0),
        stat2_2: Some(DisplayValue::Text("N/A".to_string())),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);

    assert_eq!(layout.stats.len(), 2);
    assert!(layout.stats_for(Corner::BottomLeft).is_none());
    assert!(layout.stats_for(Corner::BottomRight).is_none());

    let tl = layout.stats_for(Corner::TopLeft).unwrap();
    assert!(approx(tl.rect.x, 18.0));
    assert!(approx(tl.rect.y, 261.0));
    assert_eq!(tl.rows.len(), 1);
    let cell = &tl.rows[0].cells[0];
    assert_eq!(cell.value.text, "1 234 567");
    assert!(cell.icon.is_some());
    let suffix = cell.suffix.as_ref().unwrap();
    assert_eq!(suffix.text, "ZŁ");
    assert!(suffix.x > cell.value.x);

    // Mirrored block, unmirrored text; no icon because icon2 is absent.
    let tr = layout.stats_for(Corner::TopRight).unwrap();
    assert!(approx(tr.rect.right(), 1800.0 - 18.0));
    let cell = &tr.rows[0].cells[0];
    assert_eq!(cell.value.text, "N/A");
    assert!(cell.icon.is_none());
    assert!(cell.suffix.is_none());
    assert!(approx(cell.value.x, tr.rect.x));
}

#[test]
fn bottom_stats_block_is_mirrored_vertically() {
    let inputs = SlotInputs {
        stat3_1: n(5.0),
        stat3_2: n(6.0),
        stat3_3: n(7.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    let bl = layout.stats_for(Corner::BottomLeft).unwrap();
    assert_eq!(bl.rows.len(), 2);
    assert_eq!(bl.rows[1].cells.len(), 2);
    assert!(approx(bl.rect.bottom(), 900.0 - 261.0));
    // Rows still run top to bottom.
    assert!(bl.rows[0].rect.y < bl.rows[1].rect.y);
}

#[test]
fn arrows_require_the_arrow_image() {
    let none = layout_at(&SlotInputs::default(), 1800.0, 900.0);
    assert!(none.arrows.is_empty());

    let inputs = SlotInputs {
        arrow: s("arrow.svg"),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    assert_eq!(layout.arrows.len(), 5);
    let rotations: Vec<f64> = layout.arrows.iter().map(|a| a.rotation).collect();
    assert_eq!(rotations, vec![0.0, 0.0, 180.0, 270.0, 90.0]);
    assert!(layout.arrows.iter().all(|a| approx(a.size, 27.0)));
    assert!(approx(layout.arrows[2].center.x, 0.612 * 1800.0));
}

#[test]
fn erp_block_requires_a_value() {
    assert!(layout_at(&SlotInputs::default(), 1800.0, 900.0).erp.is_none());

    let inputs = SlotInputs {
        stat5_2: n(25_000.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    let erp = layout.erp.as_ref().unwrap();
    assert_eq!(erp.rows.len(), 1);
    assert_eq!(erp.rows[0].label.text, "SPRZEDAŻ:");
    assert_eq!(erp.rows[0].value.text, "25 000");
    assert_eq!(erp.rows[0].suffix.text, "ZŁ");
    assert!(approx(erp.rect.y, 792.0));
    assert!(approx(erp.rect.center().x, 0.615 * 1800.0));
    assert!(erp.rows[0].value.x > erp.rows[0].label.x);
}

#[test]
fn center_card_sits_at_the_hub() {
    let inputs = SlotInputs {
        center: Some(CenterImage::Labeled {
            src: "hub.png".to_string(),
            alt: Some("Warehouse".to_string()),
        }),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);
    let c = &layout.center;
    assert_eq!(c.slot, SlotId::Center);
    assert!(approx(c.rect.center().x, 900.0));
    assert!(approx(c.rect.center().y, 450.0));
    assert!(approx(c.rect.width, 388.8));
    let img = c.image.as_ref().unwrap();
    assert_eq!(img.alt, "Warehouse");
    assert!(approx(img.rect.width, 388.8 * 0.8));
}

#[test]
fn mobile_uses_fixed_card_sizes() {
    let inputs = SlotInputs {
        number1: n(3.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 375.0, 667.0);
    assert_eq!(layout.tokens.viewport.class, empflow_core::ViewportClass::Mobile);
    for slot in [SlotId::TopLeft, SlotId::TopRight, SlotId::BottomCenter] {
        let r = layout.card(slot).unwrap().rect;
        assert!(approx(r.width, 80.0));
        assert!(approx(r.height, 60.0));
    }
    assert!(approx(layout.center.rect.height, 70.0));
    let number = &layout.card(SlotId::TopLeft).unwrap().number.as_ref().unwrap().number;
    assert!(approx(number.font_size, 20.0));
}

#[test]
fn unmeasured_layout_uses_the_fallback_frame() {
    let m = Measurement::new(None, Viewport::new(1280.0, 720.0));
    let tokens = ScaleProfile::default().compute(&m, &Breakpoints::default());
    let layout = layout_flowchart(&SlotInputs::default(), &m, &tokens, &LayoutOptions::default());
    assert!(!layout.measured);
    assert!(approx(layout.frame.width, 1800.0));
    assert!(approx(layout.frame.height, 900.0));
    assert_eq!(layout.cards.len(), 5);
}

#[test]
fn layout_is_deterministic_and_serializable() {
    let inputs = SlotInputs {
        number1: n(42.0),
        stat1: n(10.0),
        ..Default::default()
    };
    let a = layout_at(&inputs, 1440.0, 900.0);
    let b = layout_at(&inputs, 1440.0, 900.0);
    assert_eq!(a, b);

    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["cards"][0]["slot"], "top-left");
    assert_eq!(json["cards"][0]["mode"], "number-card");
    assert_eq!(json["dots"][0]["animation"]["path"], "corner-zig");
    assert_eq!(json["tokens"]["viewport"]["class"], "desktop");
}

#[test]
fn top_left_stats_render_without_icons() {
    let inputs = SlotInputs {
        stat2: n(45.0),
        ..Default::default()
    };
    let layout = layout_at(&inputs, 1800.0, 900.0);

    let tl = layout.stats_for(Corner::TopLeft).unwrap();
    assert_eq!(tl.rows.len(), 1);
    assert_eq!(tl.rows[0].cells[0].value.text, "45");
    assert!(tl.rows[0].cells[0].icon.is_none());

    let icons_only = SlotInputs {
        icon1: s("money.png"),
        icon2: s("boxes.png"),
        ..Default::default()
    };
    assert!(layout_at(&icons_only, 1800.0, 900.0).stats.is_empty());
}
