//! Local illumination: ambient, diffuse and specular terms with hard shadows.
//!
//! Intensities from all lights are summed without clamping; the total may
//! exceed 1.0 and is only clamped when applied to a color.

use crate::hittable::closest_hit;
use orb_core::{Light, Scene};
use orb_math::{vector, DVec3, Interval, Ray};

/// Shadow rays start this far along `L` so the surface they leave from does
/// not shadow itself.
pub const SHADOW_EPSILON: f64 = 0.001;

/// Sum of all ambient light intensities in the scene.
pub fn ambient_intensity(scene: &Scene) -> f64 {
    scene
        .lights()
        .iter()
        .map(|light| match *light {
            Light::Ambient { intensity } => intensity,
            Light::Point { .. } | Light::Directional { .. } => 0.0,
        })
        .sum()
}

/// Compute the light intensity reaching `point`.
///
/// * `normal` - outward unit normal of the surface at `point`
/// * `view` - direction of the incoming ray (not normalized)
/// * `specular` - Phong exponent of the surface
pub fn compute_lighting(
    scene: &Scene,
    point: DVec3,
    normal: DVec3,
    view: DVec3,
    specular: f64,
) -> f64 {
    let mut intensity = 0.0;

    for light in scene.lights() {
        let (light_intensity, to_light, shadow_window) = match *light {
            Light::Ambient { intensity: ambient } => {
                intensity += ambient;
                continue;
            }
            // L reaches the light at t = 1, anything past it cannot cast a shadow
            Light::Point {
                intensity,
                position,
            } => (
                intensity,
                vector::subtract(position, point),
                Interval::new(SHADOW_EPSILON, 1.0),
            ),
            Light::Directional {
                intensity,
                direction,
            } => (
                intensity,
                vector::scale(direction, -1.0),
                Interval::from_min(SHADOW_EPSILON),
            ),
        };

        let shadow_ray = Ray::new(point, to_light);
        if closest_hit(scene.spheres(), &shadow_ray, shadow_window).is_some() {
            continue;
        }

        intensity += light_intensity * diffuse(normal, to_light);
        intensity += light_intensity * phong(normal, to_light, view, specular);
    }

    intensity
}

/// Lambert term `cos(N, L)`, zero for light arriving from behind.
fn diffuse(normal: DVec3, to_light: DVec3) -> f64 {
    let n_dot_l = vector::dot(normal, to_light);
    if n_dot_l > 0.0 {
        n_dot_l / (vector::length(normal) * vector::length(to_light))
    } else {
        0.0
    }
}

/// Phong term `cos(R, V)^s` where R is `L` mirrored about the normal.
fn phong(normal: DVec3, to_light: DVec3, view: DVec3, specular: f64) -> f64 {
    let reflected = vector::reflect(to_light, normal);
    let to_eye = vector::scale(view, -1.0);
    let r_dot_v = vector::dot(reflected, to_eye);
    if r_dot_v > 0.0 {
        (r_dot_v / (vector::length(reflected) * vector::length(to_eye))).powf(specular)
    } else {
        0.0
    }
}
