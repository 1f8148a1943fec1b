use super::*;

fn layout() -> PageLayout {
    PageLayout {
        sections: vec![
            Section {
                id: "hero".into(),
                offset_top: 0.0,
                height: 800.0,
            },
            Section {
                id: "blend".into(),
                offset_top: 800.0,
                height: 1000.0,
            },
            Section {
                id: "contact".into(),
                offset_top: 1800.0,
                height: 600.0,
            },
        ],
    }
}

fn viewport() -> Viewport {
    Viewport {
        width: 40.0,
        height: 1000.0,
        device_pixel_ratio: 1.0,
    }
}

fn ready_page() -> Page {
    let mut page = Page::new(layout(), "blend", SequenceConfig::default(), viewport()).unwrap();
    let a = PreparedImage::solid(4, 100, [255, 255, 255, 255]).unwrap();
    let b = PreparedImage::solid(4, 100, [0, 0, 0, 255]).unwrap();
    page.on_asset_loaded(AssetSlot::Source, Ok(a));
    assert!(page.on_asset_loaded(AssetSlot::Target, Ok(b)));
    page
}

#[test]
fn layout_parses_from_json() {
    let json = br#"{"sections":[{"id":"a","offset_top":0,"height":10},{"id":"b","offset_top":10,"height":5}]}"#;
    let l: PageLayout = serde_json::from_slice(json).unwrap();
    assert_eq!(l.position("b"), Some(1));
    assert_eq!(l.position("zzz"), None);
}

#[test]
fn visible_ratio_is_overlap_over_section_height() {
    let mut page = ready_page();
    assert_eq!(page.visible_ratio(), 0.2);
    page.on_scroll(300.0, 0);
    assert_eq!(page.visible_ratio(), 0.5);
    page.on_scroll(800.0, 0);
    assert_eq!(page.visible_ratio(), 1.0);
    page.on_scroll(1_600.0, 0);
    assert_eq!(page.visible_ratio(), 0.2);
    page.on_scroll(5_000.0, 0);
    assert_eq!(page.visible_ratio(), 0.0);
}

#[test]
fn siblings_follow_layout_position() {
    let mut page = ready_page();
    assert_eq!(page.resolve(HostCommand::ScrollTo(ScrollTarget::SectionTop)), Some(800.0));
    assert_eq!(page.resolve(HostCommand::ScrollTo(ScrollTarget::NextSection)), Some(1_800.0));
    assert_eq!(page.resolve(HostCommand::ScrollTo(ScrollTarget::PreviousSection)), Some(0.0));
    assert_eq!(page.resolve(HostCommand::SetProgress { percent: 3 }), None);

    let mut first = Page::new(layout(), "hero", SequenceConfig::default(), viewport()).unwrap();
    assert_eq!(first.resolve(HostCommand::ScrollTo(ScrollTarget::PreviousSection)), None);
    assert!(first.apply(HostCommand::ScrollTo(ScrollTarget::PreviousSection), 0).is_empty());
    assert!(page.apply(HostCommand::SetLockIndicator(true), 0).is_empty());
}

#[test]
fn scrolling_into_section_arms_and_locks() {
    let mut page = ready_page();
    assert!(page.on_scroll(100.0, 0).is_empty());

    let cmds = page.on_scroll(300.0, 10);
    assert_eq!(cmds, vec![HostCommand::SetProgress { percent: 0 }]);

    let snap = page.tick(110);
    assert_eq!(snap, vec![HostCommand::ScrollTo(ScrollTarget::SectionTop)]);
    assert!(page.apply(snap[0], 110).is_empty());
    assert_eq!(page.scroll_y(), 800.0);

    page.tick(410);
    let seq = page.sequence().unwrap();
    assert!(seq.state().locked());
    assert!(page.on_wheel(100.0, 500).suppress_default);
}

#[test]
fn advance_moves_page_to_next_section_and_exits() {
    let mut page = ready_page();
    page.on_scroll(800.0, 0);
    page.tick(400);
    page.on_wheel(4_000.0, 1_000);

    let cmds = page.tick(1_500);
    assert_eq!(cmds, vec![HostCommand::ScrollTo(ScrollTarget::NextSection)]);
    let after = page.apply(cmds[0], 1_500);
    assert_eq!(page.scroll_y(), 1_800.0);
    assert_eq!(
        after,
        vec![
            HostCommand::SetScrollHint(true),
            HostCommand::SetLockIndicator(false),
        ]
    );
    assert_eq!(page.sequence().unwrap().state().progress(), 1.0);
}

#[test]
fn missing_section_makes_page_inert() {
    let mut page = Page::new(layout(), "nope", SequenceConfig::default(), viewport()).unwrap();
    assert!(page.sequence().is_none());
    assert!(!page.on_asset_loaded(
        AssetSlot::Source,
        PreparedImage::solid(1, 1, [0, 0, 0, 255])
    ));
    assert!(page.on_scroll(800.0, 0).is_empty());
    assert_eq!(page.visible_ratio(), 0.0);
    assert_eq!(page.on_wheel(500.0, 10), InputOutcome::default());
    page.on_touch_start(10.0);
    assert_eq!(page.on_touch_move(0.0, 20), InputOutcome::default());
    assert!(page.tick(10_000).is_empty());
    assert!(page.on_resize(viewport(), 0).unwrap().is_empty());
    assert_eq!(page.resolve(HostCommand::ScrollTo(ScrollTarget::SectionTop)), None);
}

#[test]
fn resize_updates_page_and_sequence() {
    let mut page = ready_page();
    let vp = Viewport {
        width: 20.0,
        height: 500.0,
        device_pixel_ratio: 1.0,
    };
    page.on_resize(vp, 0).unwrap();
    assert_eq!(page.viewport(), vp);
    let frame = page.sequence().unwrap().frame().unwrap();
    assert_eq!((frame.width, frame.height), (20, 500));
}

#[test]
fn shrinking_viewport_below_threshold_releases_lock() {
    let mut page = ready_page();
    page.on_scroll(400.0, 0);
    page.tick(1_000);
    assert!(page.sequence().unwrap().state().locked());

    let short = Viewport {
        width: 40.0,
        height: 200.0,
        device_pixel_ratio: 1.0,
    };
    let cmds = page.on_resize(short, 1_100).unwrap();
    assert_eq!(page.visible_ratio(), 0.0);
    assert_eq!(
        cmds,
        vec![
            HostCommand::SetScrollHint(true),
            HostCommand::SetLockIndicator(false),
        ]
    );
    assert!(!page.sequence().unwrap().state().locked());
}
