//! JSON scene description loading.
//!
//! A scene file lists spheres and lights in insertion order, with an optional
//! camera and background:
//!
//! ```json
//! {
//!   "camera": { "center": [0, 0, 0], "distance_to_viewport": 500, "view_distance_multiple": 10 },
//!   "background": [255, 255, 255],
//!   "spheres": [
//!     { "center": [0, 0, 4000], "radius": 1500, "color": [0, 255, 0], "specular": 500 }
//!   ],
//!   "lights": [
//!     { "type": "ambient", "intensity": 0.2 },
//!     { "type": "point", "intensity": 0.6, "position": [2000, 1000, 0] }
//!   ]
//! }
//! ```
//!
//! Every value goes through the same constructors as the programmatic API, so
//! a file can never produce a scene that code could not.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use orb_math::DVec3;
use serde::Deserialize;
use thiserror::Error;

use crate::{Camera, Color, Light, Material, Scene, SceneError, Sphere};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraDescription {
    #[serde(default)]
    center: [f64; 3],
    distance_to_viewport: f64,
    view_distance_multiple: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereDescription {
    center: [f64; 3],
    radius: f64,
    color: [u8; 3],
    specular: f64,
    #[serde(default)]
    reflective: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
enum LightDescription {
    Ambient { intensity: f64 },
    Point { intensity: f64, position: [f64; 3] },
    Directional { intensity: f64, direction: [f64; 3] },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDescription {
    camera: Option<CameraDescription>,
    background: Option<[u8; 3]>,
    #[serde(default)]
    spheres: Vec<SphereDescription>,
    #[serde(default)]
    lights: Vec<LightDescription>,
}

/// A scene loaded from a file, with the camera the file asked for (if any).
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Option<Camera>,
}

/// Load a JSON scene file.
///
/// # Example
///
/// ```ignore
/// use orb_core::load_scene;
///
/// let loaded = load_scene("scenes/three_spheres.json")?;
/// println!("Loaded {} spheres", loaded.scene.sphere_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let description: SceneDescription = serde_json::from_reader(BufReader::new(file))?;

    let loaded = build_scene(description)?;
    log::info!(
        "Loaded {} spheres and {} lights from {}",
        loaded.scene.sphere_count(),
        loaded.scene.light_count(),
        path.display()
    );
    Ok(loaded)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    build_scene(description)
}

fn build_scene(description: SceneDescription) -> LoadResult<LoadedScene> {
    let mut scene = Scene::new();
    if let Some(background) = description.background {
        scene = scene.with_background(Color::from(background));
    }

    for sphere in &description.spheres {
        let material = Material::new(Color::from(sphere.color), sphere.specular)?
            .with_reflective(sphere.reflective)?;
        scene.add_sphere(Sphere::new(DVec3::from(sphere.center), sphere.radius, material)?);
    }

    for light in &description.lights {
        let light = match *light {
            LightDescription::Ambient { intensity } => Light::ambient(intensity),
            LightDescription::Point {
                intensity,
                position,
            } => Light::point(intensity, DVec3::from(position)),
            LightDescription::Directional {
                intensity,
                direction,
            } => {
                let direction = DVec3::from(direction);
                if (direction.length() - 1.0).abs() > 1e-3 {
                    log::warn!(
                        "Directional light direction {} is not unit length; it is used as given",
                        direction
                    );
                }
                Light::directional(intensity, direction)
            }
        };
        scene.add_light(light)?;
    }

    if scene.sphere_count() == 0 {
        log::warn!("Scene has no spheres, every pixel will be background");
    }

    let camera = description
        .camera
        .map(|camera| {
            Camera::new(
                DVec3::from(camera.center),
                camera.distance_to_viewport,
                camera.view_distance_multiple,
            )
        })
        .transpose()?;

    Ok(LoadedScene { scene, camera })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_SPHERES: &str = r#"
    {
        "camera": { "center": [0, 0, 0], "distance_to_viewport": 500, "view_distance_multiple": 10 },
        "background": [0, 0, 0],
        "spheres": [
            { "center": [0, -1000, 3000], "radius": 1000, "color": [255, 0, 0], "specular": 500 },
            { "center": [2000, 0, 4000], "radius": 1000, "color": [0, 0, 255], "specular": 500, "reflective": 0.3 },
            { "center": [-2000, 0, 4000], "radius": 1000, "color": [0, 255, 0], "specular": 10 }
        ],
        "lights": [
            { "type": "ambient", "intensity": 0.2 },
            { "type": "point", "intensity": 0.6, "position": [2000, 1000, 0] },
            { "type": "directional", "intensity": 0.2, "direction": [0, -1, 0] }
        ]
    }
    "#;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_load_full_scene() {
        init_logging();
        let loaded = load_scene_from_str(THREE_SPHERES).unwrap();
        let scene = &loaded.scene;

        assert_eq!(scene.sphere_count(), 3);
        assert_eq!(scene.light_count(), 3);
        assert_eq!(scene.background(), Color::BLACK);

        // Order is preserved
        assert_eq!(scene.spheres()[0].material().color(), Color::RED);
        assert_eq!(scene.spheres()[1].material().reflective(), 0.3);
        assert_eq!(scene.spheres()[2].material().specular(), 10.0);
        assert_eq!(scene.lights()[0], Light::ambient(0.2));
        assert_eq!(
            scene.lights()[2],
            Light::directional(0.2, DVec3::new(0.0, -1.0, 0.0))
        );

        let camera = loaded.camera.unwrap();
        assert_eq!(camera.distance_to_viewport, 500.0);
        assert_eq!(camera.view_distance_multiple, 10.0);
    }

    #[test]
    fn test_optional_sections() {
        let loaded = load_scene_from_str(r#"{ "spheres": [] }"#).unwrap();
        assert!(loaded.camera.is_none());
        assert_eq!(loaded.scene.background(), Color::WHITE);
        assert_eq!(loaded.scene.light_count(), 0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_radius = r#"{ "spheres": [
            { "center": [0, 0, 0], "radius": -1, "color": [1, 2, 3], "specular": 10 }
        ] }"#;
        assert!(matches!(
            load_scene_from_str(bad_radius),
            Err(LoadError::Scene(SceneError::InvalidRadius(_)))
        ));

        let bad_specular = r#"{ "spheres": [
            { "center": [0, 0, 0], "radius": 1, "color": [1, 2, 3], "specular": 5000 }
        ] }"#;
        assert!(matches!(
            load_scene_from_str(bad_specular),
            Err(LoadError::Scene(SceneError::SpecularOutOfRange(_)))
        ));

        let bad_light = r#"{ "lights": [ { "type": "ambient", "intensity": -0.5 } ] }"#;
        assert!(matches!(
            load_scene_from_str(bad_light),
            Err(LoadError::Scene(SceneError::NegativeIntensity(_)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_scene_from_str("{ not json"),
            Err(LoadError::Json(_))
        ));

        // Unknown light kind
        let unknown = r#"{ "lights": [ { "type": "spot", "intensity": 1.0 } ] }"#;
        assert!(matches!(load_scene_from_str(unknown), Err(LoadError::Json(_))));

        // Color channel out of byte range
        let bright = r#"{ "spheres": [
            { "center": [0, 0, 0], "radius": 1, "color": [300, 0, 0], "specular": 10 }
        ] }"#;
        assert!(matches!(load_scene_from_str(bright), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}
