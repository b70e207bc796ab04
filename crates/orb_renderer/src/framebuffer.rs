//! Pixel buffers and frame publication.
//!
//! The renderer writes into a private back buffer and publishes it whole once
//! the frame is done. Readers load the latest published frame through an
//! `ArcSwap`: they never see a frame that is still being written, and they
//! never block the renderer.

use std::sync::Arc;

use arc_swap::ArcSwap;
use orb_core::{Color, Viewport};

/// A row-major image of `width * height` colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    viewport: Viewport,
    pixels: Vec<Color>,
    frame: u64,
}

impl Framebuffer {
    /// Create a new framebuffer filled with `fill`.
    pub fn new(viewport: Viewport, fill: Color) -> Self {
        Self {
            viewport,
            pixels: vec![fill; viewport.pixel_count()],
            frame: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.viewport.width()
    }

    pub fn height(&self) -> u32 {
        self.viewport.height()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of the frame held in this buffer. 0 until the first render.
    pub fn frame_number(&self) -> u64 {
        self.frame
    }

    pub(crate) fn set_frame_number(&mut self, frame: u64) {
        self.frame = frame;
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.viewport.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.viewport.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Packed RGB bytes, three per pixel, for display surfaces.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to RGBA bytes (for display).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgba());
        }
        bytes
    }
}

/// Read handle on the most recently published frame.
///
/// Cheap to clone; hand one to each display or presenter.
#[derive(Clone)]
pub struct FrameReader {
    front: Arc<ArcSwap<Framebuffer>>,
}

impl FrameReader {
    /// The latest complete frame.
    ///
    /// The returned frame stays valid and unchanged for as long as it is held,
    /// even while newer frames are published.
    pub fn latest(&self) -> Arc<Framebuffer> {
        self.front.load_full()
    }

    /// Pixel (x, y) of the latest complete frame.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.front.load().get(x, y)
    }

    /// Number of the latest published frame.
    pub fn frame_number(&self) -> u64 {
        self.front.load().frame_number()
    }
}

/// Double buffer: one private back buffer, one published front buffer.
pub(crate) struct FrameQueue {
    front: Arc<ArcSwap<Framebuffer>>,
    back: Option<Framebuffer>,
    viewport: Viewport,
    fill: Color,
}

impl FrameQueue {
    /// Start with a published frame 0 filled with `fill`.
    pub(crate) fn new(viewport: Viewport, fill: Color) -> Self {
        let initial = Framebuffer::new(viewport, fill);
        Self {
            front: Arc::new(ArcSwap::from_pointee(initial)),
            back: None,
            viewport,
            fill,
        }
    }

    pub(crate) fn reader(&self) -> FrameReader {
        FrameReader {
            front: Arc::clone(&self.front),
        }
    }

    /// Take the buffer to render the next frame into.
    pub(crate) fn take_back(&mut self) -> Framebuffer {
        self.back
            .take()
            .unwrap_or_else(|| Framebuffer::new(self.viewport, self.fill))
    }

    /// Publish a finished frame and keep the retired one for reuse.
    pub(crate) fn publish(&mut self, frame: Framebuffer) {
        let retired = self.front.swap(Arc::new(frame));
        // A reader may still hold the retired frame; then it is theirs to drop
        self.back = Arc::try_unwrap(retired).ok();
        if self.back.is_none() {
            log::trace!("Retired frame still held by a reader, allocating a new back buffer");
        }
    }

    #[cfg(test)]
    pub(crate) fn has_spare(&self) -> bool {
        self.back.is_some()
    }
}
