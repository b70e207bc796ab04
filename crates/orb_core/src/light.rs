//! Scene lights.

use orb_math::DVec3;

use crate::scene::SceneError;

/// A light source.
///
/// The set of light kinds is closed; shading code matches on every variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Constant light reaching every surface, never shadowed.
    Ambient { intensity: f64 },

    /// Light emitted from a single point in space.
    Point { intensity: f64, position: DVec3 },

    /// Light arriving from infinitely far away.
    ///
    /// `direction` points from the light into the scene. It is used as given,
    /// callers are expected to pass a unit vector.
    Directional { intensity: f64, direction: DVec3 },
}

impl Light {
    pub fn ambient(intensity: f64) -> Self {
        Light::Ambient { intensity }
    }

    pub fn point(intensity: f64, position: DVec3) -> Self {
        Light::Point {
            intensity,
            position,
        }
    }

    pub fn directional(intensity: f64, direction: DVec3) -> Self {
        Light::Directional {
            intensity,
            direction,
        }
    }

    /// Get the intensity of this light.
    pub fn intensity(&self) -> f64 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }

    /// Short name of the light kind, used in logs and scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Light::Ambient { .. } => "ambient",
            Light::Point { .. } => "point",
            Light::Directional { .. } => "directional",
        }
    }

    /// Check the light's invariants: a finite, non-negative intensity.
    pub fn validate(&self) -> Result<(), SceneError> {
        let intensity = self.intensity();
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(SceneError::NegativeIntensity(intensity));
        }
        Ok(())
    }
}
