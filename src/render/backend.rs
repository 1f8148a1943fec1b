use crate::assets::decode::PreparedImage;
use crate::config::SeparatorStyle;
use crate::foundation::core::Viewport;
use crate::foundation::error::ScrollwipeResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Copy of the pixels with straight (non-premultiplied) alpha, as PNG encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::assets::decode::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Everything a backend needs to draw one wipe frame.
#[derive(Clone, Copy, Debug)]
pub struct WipeRequest<'a> {
    /// Viewport the surface is sized to.
    pub viewport: Viewport,
    /// Blend progress in `[0, 1]`.
    pub progress: f64,
    /// Image A, visible right of the boundary.
    pub source: &'a PreparedImage,
    /// Image B, visible left of the boundary.
    pub target: &'a PreparedImage,
    /// Divider look.
    pub separator: &'a SeparatorStyle,
    /// Straight RGBA clear color, transparent when `None`.
    pub background_rgba: Option<[u8; 4]>,
}

/// The raster surface a sequence draws into.
pub trait WipeBackend {
    /// Draw one frame, replacing the previous one.
    fn render_wipe(&mut self, req: &WipeRequest<'_>) -> ScrollwipeResult<()>;

    /// Most recently rendered frame, if any.
    fn frame(&self) -> Option<&FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn WipeBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuWipeBackend::new()),
    }
}
