use super::*;

#[test]
fn identity_leaves_pixels_alone() {
    let mut px = vec![1u8, 2, 3, 4, 250, 128, 0, 255];
    let before = px.clone();
    ToneAdjust::IDENTITY.apply_straight_in_place(&mut px);
    assert_eq!(px, before);
}

#[test]
fn brightness_saturates_before_contrast() {
    let mut px = vec![200u8, 0, 255, 77];
    ToneAdjust::new(2.0, 1.0).apply_straight_in_place(&mut px);
    assert_eq!(px, vec![255, 0, 255, 77]);
}

#[test]
fn contrast_pivots_on_mid_grey() {
    let mut px = vec![0u8, 255, 64, 10];
    ToneAdjust::new(1.0, 0.0).apply_straight_in_place(&mut px);
    // Zero contrast collapses every channel onto 0.5.
    assert_eq!(px, vec![128, 128, 128, 10]);
}

#[test]
fn validity_rejects_negative_and_nan() {
    assert!(ToneAdjust::new(1.1, 1.15).is_valid());
    assert!(!ToneAdjust::new(-1.0, 1.0).is_valid());
    assert!(!ToneAdjust::new(1.0, f32::NAN).is_valid());
}

#[test]
fn missing_json_fields_default_to_one() {
    let t: ToneAdjust = serde_json::from_str(r#"{"contrast": 1.5}"#).unwrap();
    assert_eq!(t.brightness, 1.0);
    assert_eq!(t.contrast, 1.5);
}
