use crate::*;

fn class_at(width: f64) -> ViewportClass {
    Breakpoints::default()
        .classify(Viewport::new(width, 800.0))
        .class
}

#[test]
fn width_boundaries() {
    assert_eq!(class_at(320.0), ViewportClass::Mobile);
    assert_eq!(class_at(768.0), ViewportClass::Mobile);
    assert_eq!(class_at(769.0), ViewportClass::Tablet);
    assert_eq!(class_at(1024.0), ViewportClass::Tablet);
    assert_eq!(class_at(1025.0), ViewportClass::Desktop);
    assert_eq!(class_at(1920.0), ViewportClass::Desktop);
    assert_eq!(class_at(1921.0), ViewportClass::Large);
}

#[test]
fn tall_is_independent_of_width() {
    let b = Breakpoints::default();
    assert!(!b.classify(Viewport::new(1440.0, 1080.0)).tall);
    assert!(b.classify(Viewport::new(1440.0, 1081.0)).tall);

    let p = b.classify(Viewport::new(500.0, 1400.0));
    assert_eq!(p.class, ViewportClass::Mobile);
    assert!(p.tall);
}

#[test]
fn viewport_sanitizes_bad_sizes() {
    let v = Viewport::new(f64::NAN, -20.0);
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 0.0);
    // A zero-width viewport is the narrowest possible one.
    assert_eq!(Breakpoints::default().classify(v).class, ViewportClass::Mobile);

    let v = Viewport::new(f64::INFINITY, 600.0);
    assert_eq!(v.width, 0.0);
}

#[test]
fn container_measurement() {
    assert!(ContainerSize::new(10.0, 10.0).is_measured());
    assert!(!ContainerSize::new(0.0, 10.0).is_measured());
    assert!(!ContainerSize::new(10.0, -1.0).is_measured());

    let m = Measurement::new(Some(ContainerSize::new(0.0, 0.0)), Viewport::default());
    assert_eq!(m.measured_container(), None);
}

#[test]
fn vmin_is_one_percent_of_the_short_side() {
    assert_eq!(Viewport::new(1920.0, 1080.0).vmin(), 10.8);
    assert_eq!(Viewport::new(400.0, 900.0).vmin(), 4.0);
}

#[test]
fn class_names_serialize_lowercase() {
    assert_eq!(ViewportClass::Large.to_string(), "large");
    assert_eq!(
        serde_json::to_value(ViewportClass::Tablet).unwrap(),
        serde_json::json!("tablet")
    );
}

#[test]
fn custom_breakpoints_shift_classes() {
    let b = Breakpoints {
        mobile_max_width: 600.0,
        tablet_max_width: 900.0,
        large_min_width: 1600.0,
        tall_min_height: 1000.0,
    };
    assert_eq!(b.classify(Viewport::new(700.0, 500.0)).class, ViewportClass::Tablet);
    assert_eq!(b.classify(Viewport::new(1700.0, 500.0)).class, ViewportClass::Large);
}
