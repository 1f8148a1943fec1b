use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};
use crate::render::backend::{FrameRGBA, WipeBackend, WipeRequest};
use crate::render::composite::over_row_profile_in_place;
use crate::render::layout::WipeLayout;
use crate::render::separator::separator_profile;

const PAINT_CACHE_CAPACITY: usize = 4;

#[derive(Clone)]
struct ImagePaint {
    // Keeps the source bytes alive so the pointer key cannot be reused.
    pixels: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

/// CPU wipe renderer powered by `vello_cpu`.
///
/// Image paints are cached per decoded image, so repeated frames only pay for rasterization.
#[derive(Default)]
pub struct CpuWipeBackend {
    ctx: Option<vello_cpu::RenderContext>,
    paints: Vec<ImagePaint>,
    frame: Option<FrameRGBA>,
}

impl CpuWipeBackend {
    /// Create a backend with an empty paint cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn paint_for(&mut self, img: &PreparedImage) -> ScrollwipeResult<vello_cpu::Image> {
        if let Some(p) = self
            .paints
            .iter()
            .find(|p| Arc::ptr_eq(&p.pixels, &img.rgba8_premul))
        {
            return Ok(p.paint.clone());
        }

        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        if self.paints.len() >= PAINT_CACHE_CAPACITY {
            self.paints.remove(0);
        }
        self.paints.push(ImagePaint {
            pixels: Arc::clone(&img.rgba8_premul),
            paint: paint.clone(),
        });
        Ok(paint)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ScrollwipeResult<R>,
    ) -> ScrollwipeResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl WipeBackend for CpuWipeBackend {
    #[tracing::instrument(skip(self, req), fields(progress = req.progress))]
    fn render_wipe(&mut self, req: &WipeRequest<'_>) -> ScrollwipeResult<()> {
        req.viewport.validate()?;
        let (width, height) = req.viewport.surface_size();
        let w16: u16 = width
            .try_into()
            .map_err(|_| ScrollwipeError::render("surface width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| ScrollwipeError::render("surface height exceeds u16"))?;

        let layout = WipeLayout::compute(
            req.viewport,
            req.source.width,
            req.source.height,
            req.progress,
        );
        let dpr = req.viewport.device_pixel_ratio;
        // Snap the boundary to a device column so the two clips tile without a seam.
        let divide = (layout.divide_x * dpr).round() / dpr;
        let target_clip = Rect::new(0.0, 0.0, divide, req.viewport.height);
        let source_clip = Rect::new(divide, 0.0, req.viewport.width, req.viewport.height);

        let target_paint = self.paint_for(req.target)?;
        let source_paint = self.paint_for(req.source)?;

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        self.with_ctx_mut(w16, h16, |ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

            if let Some([r, g, b, a]) = req.background_rgba {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }

            draw_clipped(ctx, &layout, target_clip, req.target, target_paint);
            draw_clipped(ctx, &layout, source_clip, req.source, source_paint);

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        let mut data = pixmap.data_as_u8_slice_mut().to_vec();
        if layout.shows_separator() {
            let profile = separator_profile(divide, dpr, req.separator)?;
            over_row_profile_in_place(&mut data, width, height, &profile.pixels, profile.x0)?;
        }

        tracing::trace!(width, height, divide, "wipe frame rendered");
        self.frame = Some(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        });
        Ok(())
    }

    fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }
}

fn draw_clipped(
    ctx: &mut vello_cpu::RenderContext,
    layout: &WipeLayout,
    clip: Rect,
    img: &PreparedImage,
    paint: vello_cpu::Image,
) {
    let Some(local) = layout.local_visible_rect(clip, img.width, img.height) else {
        return;
    };
    ctx.set_transform(affine_to_cpu(layout.image_transform(img.width, img.height)));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        local.x0, local.y0, local.x1, local.y1,
    ));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ScrollwipeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScrollwipeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScrollwipeError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ScrollwipeError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
