//! 8-bit RGB colors.

use bytemuck::{Pod, Zeroable};
use orb_math::Interval;

/// Valid range of a single channel.
const CHANNEL_RANGE: Interval = Interval {
    min: 0.0,
    max: 255.0,
};

/// An RGB color with one byte per channel.
///
/// Laid out as three packed bytes so a frame of colors can be handed to a
/// display as raw RGB through `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `intensity` and clamp the result to `[0, 255]`.
    ///
    /// This is the only place where light intensity is clamped. Intensities
    /// accumulated from several lights may exceed 1.0 and saturate here.
    pub fn apply_intensity(self, intensity: f64) -> Color {
        let scale = |channel: u8| CHANNEL_RANGE.clamp(channel as f64 * intensity) as u8;
        Color::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Convert to 8-bit RGBA with an opaque alpha channel.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Relative luminance in `[0, 1]` (Rec. 709 weights).
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::new(r, g, b)
    }
}
