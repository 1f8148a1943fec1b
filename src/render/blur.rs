use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Gaussian blur of one row of premultiplied RGBA8 pixels.
///
/// Pixels outside the row are transparent, like a canvas shadow, so the output is `2 * radius`
/// pixels wider than the input and the input sits at offset `radius`.
pub fn blur_row_rgba8_premul(src: &[u8], radius: u32, sigma: f32) -> ScrollwipeResult<Vec<u8>> {
    if !src.len().is_multiple_of(4) {
        return Err(ScrollwipeError::render(
            "blur_row_rgba8_premul expects whole rgba8 pixels",
        ));
    }
    let n = src.len() / 4;
    let r = radius as usize;
    let out_n = n + 2 * r;
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut out = vec![0u8; out_n * 4];
    for (ox, px) in out.chunks_exact_mut(4).enumerate() {
        let mut acc = [0u64; 4];
        // Output pixel `ox` is centered on input pixel `ox - r`.
        for (ki, &kw) in kernel.iter().enumerate() {
            let Some(sx) = (ox + ki).checked_sub(2 * r) else {
                continue;
            };
            if sx >= n {
                continue;
            }
            let idx = sx * 4;
            for c in 0..4 {
                acc[c] += u64::from(kw) * u64::from(src[idx + c]);
            }
        }
        for c in 0..4 {
            px[c] = q16_to_u8(acc[c]);
        }
    }
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ScrollwipeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ScrollwipeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ScrollwipeError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding error into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
