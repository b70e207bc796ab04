//! Scene model: spheres, their materials and the lights that shade them.
//!
//! A scene is built once, by appending spheres and lights, and is read-only
//! from then on. Insertion order is kept: it decides which sphere wins when two
//! are hit at exactly the same distance.

use orb_math::DVec3;
use thiserror::Error;

use crate::{Color, Light};

/// Valid range of the Phong specular exponent.
pub const SPECULAR_RANGE: (f64, f64) = (1.0, 1000.0);

/// Errors raised when building a scene from invalid values.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("specular exponent must lie in [1, 1000], got {0}")]
    SpecularOutOfRange(f64),

    #[error("reflective coefficient must lie in [0, 1], got {0}")]
    ReflectiveOutOfRange(f64),

    #[error("light intensity must be non-negative and finite, got {0}")]
    NegativeIntensity(f64),

    #[error("viewport must be at least 1x1 pixels, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),
}

/// Surface properties of a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    color: Color,
    specular: f64,
    reflective: f64,
}

impl Material {
    /// Create a material with a base color and Phong specular exponent.
    ///
    /// The exponent must lie in [1, 1000]; values outside are rejected.
    pub fn new(color: Color, specular: f64) -> Result<Self, SceneError> {
        if !(SPECULAR_RANGE.0..=SPECULAR_RANGE.1).contains(&specular) {
            return Err(SceneError::SpecularOutOfRange(specular));
        }
        Ok(Self {
            color,
            specular,
            reflective: 0.0,
        })
    }

    /// Set the reflective coefficient in [0, 1].
    ///
    /// Stored with the material for scene files and future use; shading is
    /// single-bounce and does not read it.
    pub fn with_reflective(mut self, reflective: f64) -> Result<Self, SceneError> {
        if !(0.0..=1.0).contains(&reflective) {
            return Err(SceneError::ReflectiveOutOfRange(reflective));
        }
        self.reflective = reflective;
        Ok(self)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn specular(&self) -> f64 {
        self.specular
    }

    pub fn reflective(&self) -> f64 {
        self.reflective
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Result<Self, SceneError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// An ordered, append-only collection of spheres and lights.
#[derive(Clone, Debug)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with a white background.
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            background: Color::WHITE,
        }
    }

    /// Set the color returned for rays that hit nothing.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Append a sphere. Returns its index in insertion order.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        log::debug!(
            "Added sphere #{} at {} (r={})",
            self.spheres.len() - 1,
            sphere.center,
            sphere.radius
        );
        self.spheres.len() - 1
    }

    /// Append a light after checking its intensity.
    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        light.validate()?;
        log::debug!("Added {} light (intensity {})", light.kind(), light.intensity());
        self.lights.push(light);
        Ok(())
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Get the number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get the number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
