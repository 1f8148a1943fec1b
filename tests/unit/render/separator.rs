use super::*;

fn alpha(p: &SeparatorProfile, x: i64) -> u8 {
    p.at(x)[3]
}

#[test]
fn band_is_centered_on_the_boundary() {
    let style = SeparatorStyle {
        glow_blur_px: 0.0,
        ..SeparatorStyle::default()
    };
    let p = separator_profile(100.0, 1.0, &style).unwrap();

    // Band covers [97, 103); nothing outside without glow.
    assert_eq!(alpha(&p, 96), 0);
    assert_eq!(alpha(&p, 103), 0);
    for x in 97..103 {
        assert!(alpha(&p, x) > 0, "column {x}");
    }
    // Brightest at the two columns touching the boundary.
    assert!(alpha(&p, 99) > alpha(&p, 97));
    assert!(alpha(&p, 100) > alpha(&p, 102));
    assert!((i32::from(alpha(&p, 99)) - i32::from(alpha(&p, 100))).abs() <= 1);
}

#[test]
fn glow_reaches_beyond_the_band() {
    let with_glow = separator_profile(100.0, 1.0, &SeparatorStyle::default()).unwrap();
    assert!(alpha(&with_glow, 92) > 0);
    assert_eq!(alpha(&with_glow, 10), 0);
    // sigma 10 -> radius 30 on each side.
    assert_eq!(with_glow.x0, 96 - 30);
}

#[test]
fn profile_is_mirror_symmetric() {
    let p = separator_profile(100.0, 1.0, &SeparatorStyle::default()).unwrap();
    for x in 60..100 {
        let l = i32::from(alpha(&p, x));
        let r = i32::from(alpha(&p, 199 - x));
        assert!((l - r).abs() <= 1, "columns {x} vs {}", 199 - x);
    }
}

#[test]
fn color_follows_style() {
    let style = SeparatorStyle {
        color_rgb: [255, 0, 0],
        glow_blur_px: 0.0,
        peak_alpha: 1.0,
        ..SeparatorStyle::default()
    };
    let p = separator_profile(50.0, 1.0, &style).unwrap();
    let px = p.at(49);
    assert!(px[3] > 0);
    assert_eq!(px[0], px[3]);
    assert_eq!((px[1], px[2]), (0, 0));
}

#[test]
fn dpr_scales_the_band() {
    let style = SeparatorStyle {
        glow_blur_px: 0.0,
        ..SeparatorStyle::default()
    };
    let p1 = separator_profile(100.0, 1.0, &style).unwrap();
    let p2 = separator_profile(100.0, 2.0, &style).unwrap();
    let lit = |p: &SeparatorProfile| p.pixels.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert_eq!(lit(&p1), 6);
    assert_eq!(lit(&p2), 12);
    assert_eq!(alpha(&p2, 193), 0);
    assert!(alpha(&p2, 194) > 0);
}

#[test]
fn zero_width_band_draws_nothing() {
    let style = SeparatorStyle {
        half_width_px: 0.0,
        ..SeparatorStyle::default()
    };
    let p = separator_profile(10.0, 1.0, &style).unwrap();
    assert!(p.pixels.iter().all(|&b| b == 0));
}
