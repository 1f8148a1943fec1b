use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels, with an extra opacity on `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a one-row premultiplied profile over every row of `dst`, left edge at `x0`.
///
/// Columns falling outside `dst` are skipped.
pub fn over_row_profile_in_place(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    profile: &[u8],
    x0: i64,
) -> ScrollwipeResult<()> {
    let dst_len = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ScrollwipeError::render("composite buffer size overflow"))?;
    if dst.len() != dst_len || !profile.len().is_multiple_of(4) {
        return Err(ScrollwipeError::render(
            "over_row_profile_in_place expects dst matching width*height*4",
        ));
    }

    let row_bytes = dst_w as usize * 4;
    for (i, s) in profile.chunks_exact(4).enumerate() {
        let dx = x0 + i as i64;
        if s[3] == 0 || dx < 0 || dx >= i64::from(dst_w) {
            continue;
        }
        let src = [s[0], s[1], s[2], s[3]];
        let off = dx as usize * 4;
        for row in dst.chunks_exact_mut(row_bytes) {
            let d = [row[off], row[off + 1], row[off + 2], row[off + 3]];
            row[off..off + 4].copy_from_slice(&over(d, src, 1.0));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
