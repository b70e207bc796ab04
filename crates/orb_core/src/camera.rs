//! Camera and viewport.
//!
//! The viewport is the image plane: one unit per pixel, `width` by `height`
//! units, centered on the camera's optical axis at `distance_to_viewport`
//! along +z.

use orb_math::DVec3;

use crate::scene::SceneError;

/// A pinhole camera looking down +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: DVec3,
    /// Focal length: z of the viewport plane.
    pub distance_to_viewport: f64,
    /// Largest ray parameter still considered visible.
    pub view_distance_multiple: f64,
}

impl Camera {
    /// Create a camera. Both distances must be positive, the focal length finite.
    pub fn new(
        center: DVec3,
        distance_to_viewport: f64,
        view_distance_multiple: f64,
    ) -> Result<Self, SceneError> {
        if !center.is_finite() {
            return Err(SceneError::InvalidCamera("center must be finite"));
        }
        if !distance_to_viewport.is_finite() || distance_to_viewport <= 0.0 {
            return Err(SceneError::InvalidCamera(
                "distance to viewport must be positive",
            ));
        }
        if view_distance_multiple.is_nan() || view_distance_multiple <= 0.0 {
            return Err(SceneError::InvalidCamera(
                "view distance multiple must be positive",
            ));
        }
        if view_distance_multiple < 1.0 {
            log::warn!(
                "View distance multiple {} is below 1, nothing past the viewport will be visible",
                view_distance_multiple
            );
        }
        Ok(Self {
            center,
            distance_to_viewport,
            view_distance_multiple,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            distance_to_viewport: 500.0,
            view_distance_multiple: 10.0,
        }
    }
}

/// Pixel dimensions of the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of pixel (x, y), or `None` outside the viewport.
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}
