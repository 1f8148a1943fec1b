use crate::foundation::core::{Affine, Rect, Viewport};
use crate::foundation::math::clamp01;

/// Geometry of one wipe frame, in CSS pixels.
///
/// Both images share the destination rect derived from the source image: width fills the
/// viewport, aspect ratio is preserved, and the rect is centered vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WipeLayout {
    /// Uniform scale applied to the source image.
    pub scale: f64,
    /// Destination rect of both images.
    pub dest: Rect,
    /// X of the boundary: target is shown left of it, source right of it.
    pub divide_x: f64,
    /// Viewport size the layout was computed for.
    pub viewport: Viewport,
    /// Clamped progress the layout was computed for.
    pub progress: f64,
}

impl WipeLayout {
    /// Compute the layout for a source image of `source_w x source_h` pixels.
    pub fn compute(viewport: Viewport, source_w: u32, source_h: u32, progress: f64) -> Self {
        let progress = clamp01(progress);
        let scale = viewport.width / f64::from(source_w.max(1));
        let width = f64::from(source_w) * scale;
        let height = f64::from(source_h) * scale;
        let y = (viewport.height - height) / 2.0;
        Self {
            scale,
            dest: Rect::new(0.0, y, width, y + height),
            divide_x: viewport.width * progress,
            viewport,
            progress,
        }
    }

    /// The glowing divider is only drawn strictly between the endpoints.
    pub fn shows_separator(&self) -> bool {
        self.progress > 0.0 && self.progress < 1.0
    }

    /// Region that shows the target image.
    pub fn target_clip(&self) -> Rect {
        Rect::new(0.0, 0.0, self.divide_x, self.viewport.height)
    }

    /// Region that shows the source image.
    pub fn source_clip(&self) -> Rect {
        Rect::new(self.divide_x, 0.0, self.viewport.width, self.viewport.height)
    }

    /// Device-space transform mapping an image of `w x h` pixels onto `dest`.
    ///
    /// Images whose size differs from the source are stretched onto the same rect.
    pub fn image_transform(&self, w: u32, h: u32) -> Affine {
        let sx = self.dest.width() / f64::from(w.max(1));
        let sy = self.dest.height() / f64::from(h.max(1));
        Affine::scale(self.viewport.device_pixel_ratio)
            * Affine::translate((self.dest.x0, self.dest.y0))
            * Affine::scale_non_uniform(sx, sy)
    }

    /// Part of an image of `w x h` pixels, in image-local coordinates, that lands inside `clip`.
    ///
    /// Returns `None` when nothing of the image is visible.
    pub fn local_visible_rect(&self, clip: Rect, w: u32, h: u32) -> Option<Rect> {
        let sx = self.dest.width() / f64::from(w.max(1));
        let sy = self.dest.height() / f64::from(h.max(1));
        if !(sx > 0.0 && sy > 0.0) {
            return None;
        }
        let visible = clip.intersect(self.dest);
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return None;
        }
        Some(Rect::new(
            (visible.x0 - self.dest.x0) / sx,
            (visible.y0 - self.dest.y0) / sy,
            (visible.x1 - self.dest.x0) / sx,
            (visible.y1 - self.dest.y0) / sy,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
