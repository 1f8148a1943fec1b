use super::*;

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h, 1.0).unwrap()
}

#[test]
fn width_fills_viewport_and_centers_vertically() {
    let l = WipeLayout::compute(vp(800.0, 600.0), 400, 200, 0.0);
    assert_eq!(l.scale, 2.0);
    assert_eq!(l.dest, Rect::new(0.0, 100.0, 800.0, 500.0));
}

#[test]
fn tall_images_overflow_symmetrically() {
    let l = WipeLayout::compute(vp(100.0, 100.0), 50, 100, 0.5);
    assert_eq!(l.dest, Rect::new(0.0, -50.0, 100.0, 150.0));
}

#[test]
fn divide_x_tracks_progress_and_clamps() {
    assert_eq!(WipeLayout::compute(vp(1000.0, 10.0), 10, 1, 0.25).divide_x, 250.0);
    assert_eq!(WipeLayout::compute(vp(1000.0, 10.0), 10, 1, 3.0).divide_x, 1000.0);
    assert_eq!(WipeLayout::compute(vp(1000.0, 10.0), 10, 1, -1.0).divide_x, 0.0);
}

#[test]
fn separator_only_strictly_inside() {
    let v = vp(10.0, 10.0);
    assert!(!WipeLayout::compute(v, 1, 1, 0.0).shows_separator());
    assert!(WipeLayout::compute(v, 1, 1, 0.01).shows_separator());
    assert!(!WipeLayout::compute(v, 1, 1, 1.0).shows_separator());
}

#[test]
fn local_visible_rect_maps_clip_into_image_space() {
    let l = WipeLayout::compute(vp(800.0, 600.0), 400, 200, 0.25);
    let target = l.local_visible_rect(l.target_clip(), 400, 200).unwrap();
    assert_eq!(target, Rect::new(0.0, 0.0, 100.0, 200.0));

    // A target of another size is stretched onto the same rect.
    let target = l.local_visible_rect(l.target_clip(), 800, 100).unwrap();
    assert_eq!(target, Rect::new(0.0, 0.0, 200.0, 100.0));

    let source = l.local_visible_rect(l.source_clip(), 400, 200).unwrap();
    assert_eq!(source, Rect::new(100.0, 0.0, 400.0, 200.0));
}

#[test]
fn empty_clip_yields_nothing() {
    let l = WipeLayout::compute(vp(800.0, 600.0), 400, 200, 0.0);
    assert!(l.local_visible_rect(l.target_clip(), 400, 200).is_none());
    assert!(l.local_visible_rect(l.source_clip(), 400, 200).is_some());
}

#[test]
fn image_transform_includes_dpr() {
    let v = Viewport::new(100.0, 100.0, 2.0).unwrap();
    let l = WipeLayout::compute(v, 50, 50, 0.0);
    let p = l.image_transform(50, 50) * kurbo::Point::new(50.0, 50.0);
    assert_eq!(p, kurbo::Point::new(200.0, 200.0));
}
