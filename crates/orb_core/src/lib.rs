//! orb core - scene model for the sphere ray caster.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Sphere`, `Material`, `Light`
//! - **View setup**: `Camera`, `Viewport`
//! - **Colors**: 8-bit `Color` with intensity application
//! - **Scene files**: JSON scene description loading
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{Color, Light, Material, Scene, Sphere, DVec3};
//!
//! let mut scene = Scene::new();
//! let material = Material::new(Color::GREEN, 500.0)?;
//! scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, 4000.0), 1500.0, material)?);
//! scene.add_light(Light::ambient(0.2))?;
//! ```

pub mod camera;
pub mod color;
pub mod light;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, Viewport};
pub use color::Color;
pub use light::Light;
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadedScene};
pub use scene::{Material, Scene, SceneError, Sphere};

pub use orb_math::DVec3;
