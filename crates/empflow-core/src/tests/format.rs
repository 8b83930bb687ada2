use crate::format::group_thousands;
use crate::*;

#[test]
fn groups_every_three_digits() {
    assert_eq!(format_stat(&DisplayValue::from(1_234_567.0_f64)), "1 234 567");
    assert_eq!(format_stat(&DisplayValue::from(999.0_f64)), "999");
    assert_eq!(format_stat(&DisplayValue::from(1000.0_f64)), "1 000");
    assert_eq!(format_stat(&DisplayValue::from(0.0_f64)), "0");
    assert_eq!(format_stat(&DisplayValue::from(100_000_i64)), "100 000");
}

#[test]
fn text_passes_through() {
    assert_eq!(format_stat(&DisplayValue::from("N/A")), "N/A");
    assert_eq!(format_stat(&DisplayValue::from("1234567")), "1234567");
}

#[test]
fn rounds_before_grouping() {
    assert_eq!(group_thousands(1234.4), "1 234");
    assert_eq!(group_thousands(1234.5), "1 235");
    assert_eq!(group_thousands(999.6), "1 000");
}

#[test]
fn negative_and_non_finite() {
    assert_eq!(group_thousands(-1_234_567.0), "-1 234 567");
    assert_eq!(group_thousands(-0.2), "0");
    assert_eq!(group_thousands(f64::NAN), "NaN");
    assert_eq!(group_thousands(f64::INFINITY), "∞");
    assert_eq!(group_thousands(f64::NEG_INFINITY), "-∞");
}

#[test]
fn separator_is_a_plain_space() {
    let s = group_thousands(12_345.0);
    assert!(s.chars().all(|c| c.is_ascii_digit() || c == ' '));
    assert!(!s.contains('\u{a0}'));
    assert!(!s.contains('\u{202f}'));
}

#[test]
fn number_card_values_are_raw() {
    assert_eq!(DisplayValue::from(1234.0_f64).raw(), "1234");
    assert_eq!(DisplayValue::from(12.5_f64).raw(), "12.5");
    assert_eq!(DisplayValue::from("12k").raw(), "12k");
}
