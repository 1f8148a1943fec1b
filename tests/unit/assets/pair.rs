use super::*;

fn img() -> PreparedImage {
    PreparedImage::solid(2, 2, [0, 0, 0, 255]).unwrap()
}

#[test]
fn join_resolves_once_both_slots_load() {
    let mut pair = AssetPair::new();
    assert!(!pair.is_ready());
    assert!(!pair.resolve(AssetSlot::Target, Ok(img())));
    assert_eq!(pair.loaded_count(), 1);
    assert!(pair.images().is_none());

    assert!(pair.resolve(AssetSlot::Source, Ok(img())));
    assert!(pair.is_ready());
    assert!(pair.images().is_some());

    // Re-delivering a slot does not complete the join a second time.
    assert!(!pair.resolve(AssetSlot::Source, Ok(img())));
}

#[test]
fn failure_keeps_the_pair_unready() {
    let mut pair = AssetPair::new();
    pair.resolve(AssetSlot::Source, Ok(img()));
    pair.resolve(AssetSlot::Target, Err(ScrollwipeError::asset("404")));
    assert!(!pair.is_ready());
    assert!(pair.has_failed());
    assert!(matches!(pair.slot(AssetSlot::Target), SlotState::Failed(m) if m.contains("404")));
}

#[test]
fn default_tones_differ_per_slot() {
    assert_eq!(AssetSlot::Source.default_tone(), ToneAdjust::new(1.1, 1.15));
    assert_eq!(AssetSlot::Target.default_tone(), ToneAdjust::new(1.0, 1.08));
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("./img//a.png").unwrap(), "img/a.png");
    assert_eq!(normalize_rel_path("img\\b.svg").unwrap(), "img/b.svg");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn load_asset_reports_missing_files() {
    let err = load_asset(Path::new("target"), "definitely/missing.png", ToneAdjust::IDENTITY)
        .unwrap_err();
    assert!(matches!(err, ScrollwipeError::Asset(_)));
}
