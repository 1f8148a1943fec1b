use super::*;

#[test]
fn empty_json_yields_shipped_defaults() {
    let cfg = SequenceConfig::from_json_slice(b"{}").unwrap();
    assert_eq!(cfg, SequenceConfig::default());
    assert_eq!(cfg.threshold, 4000.0);
    assert_eq!(cfg.visibility_threshold, 0.5);
    assert_eq!(
        (cfg.snap_delay_ms, cfg.lock_settle_ms, cfg.advance_delay_ms),
        (100, 300, 500)
    );
    assert_eq!(cfg.separator.color_rgb, [0, 200, 255]);
}

#[test]
fn partial_sections_keep_their_own_defaults() {
    let cfg = SequenceConfig::from_json_slice(
        br#"{
            "threshold": 1000,
            "separator": { "glow_blur_px": 0 },
            "source": { "path": "wire.png" },
            "target": { "path": "real.png", "tone": { "brightness": 0.5 } }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.threshold, 1000.0);
    assert_eq!(cfg.separator.glow_blur_px, 0.0);
    assert_eq!(cfg.separator.half_width_px, 3.0);
    assert_eq!(
        cfg.source.effective_tone(AssetSlot::Source),
        AssetSlot::Source.default_tone()
    );
    assert_eq!(
        cfg.target.effective_tone(AssetSlot::Target),
        ToneAdjust::new(0.5, 1.0)
    );
}

#[test]
fn validation_rejects_bad_values() {
    for json in [
        r#"{"threshold": 0}"#,
        r#"{"threshold": -5}"#,
        r#"{"visibility_threshold": 0}"#,
        r#"{"visibility_threshold": 1.5}"#,
        r#"{"separator": {"peak_alpha": 2.0}}"#,
        r#"{"separator": {"half_width_px": -1}}"#,
        r#"{"viewport": {"width": 0, "height": 10}}"#,
        r#"{"source": {"tone": {"brightness": -1}}}"#,
    ] {
        let err = SequenceConfig::from_json_slice(json.as_bytes()).unwrap_err();
        assert!(
            matches!(err, ScrollwipeError::Validation(_)),
            "{json} -> {err}"
        );
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SequenceConfig::from_json_slice(b"{ nope").unwrap_err();
    assert!(matches!(err, ScrollwipeError::Serde(_)));
}

#[test]
fn separator_sizes_are_capped() {
    for json in [
        r#"{"separator": {"glow_blur_px": 1e9}}"#,
        r#"{"separator": {"core_width_px": 1025}}"#,
    ] {
        let err = SequenceConfig::from_json_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ScrollwipeError::Validation(_)), "{json}");
    }
    let cfg =
        SequenceConfig::from_json_slice(br#"{"separator": {"glow_blur_px": 1024}}"#).unwrap();
    assert_eq!(cfg.separator.glow_blur_px, MAX_SEPARATOR_PX);
}
