use super::*;

#[test]
fn signed_deltas_split() {
    assert_eq!(
        InputDelta::from_signed(-120.0),
        InputDelta {
            magnitude: 120.0,
            direction: ScrollDirection::Up
        }
    );
    assert_eq!(
        InputDelta::from_signed(53.0).direction,
        ScrollDirection::Down
    );
}

#[test]
fn touch_swipe_up_is_forward() {
    let mut t = TouchTracker::default();
    t.start(500.0);
    let d = t.move_to(300.0).unwrap();
    assert_eq!(d.magnitude, 200.0);
    assert_eq!(d.direction, ScrollDirection::Down);

    // Re-anchored on the previous sample.
    let d = t.move_to(350.0).unwrap();
    assert_eq!(d.magnitude, 50.0);
    assert_eq!(d.direction, ScrollDirection::Up);
}

#[test]
fn touch_move_without_start_only_anchors() {
    let mut t = TouchTracker::default();
    assert!(t.move_to(100.0).is_none());
    assert_eq!(t.move_to(90.0).unwrap().magnitude, 10.0);
}

#[test]
fn ambient_direction_compares_offsets() {
    let mut a = AmbientDirection::default();
    assert_eq!(a.current(), ScrollDirection::Down);
    assert_eq!(a.observe(100.0), ScrollDirection::Down);
    assert_eq!(a.observe(40.0), ScrollDirection::Up);
    // Unchanged offset reads as up.
    assert_eq!(a.observe(40.0), ScrollDirection::Up);
    assert_eq!(a.current(), ScrollDirection::Up);
}

#[test]
fn visibility_reports_crossings_only() {
    let mut v = VisibilityObserver::new(0.5);
    assert_eq!(v.observe(0.1), None);
    assert_eq!(v.observe(0.49), None);
    assert_eq!(v.observe(0.5), Some(VisibilityChange::Entered));
    assert!(v.is_intersecting());
    assert_eq!(v.observe(0.9), None);
    assert_eq!(v.observe(0.2), Some(VisibilityChange::Left));
    assert_eq!(v.observe(0.0), None);
}
