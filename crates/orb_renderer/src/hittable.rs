//! Closest-hit selection over a list of spheres.

use crate::sphere::intersect;
use orb_core::Sphere;
use orb_math::{Interval, Ray};

/// Record of the nearest ray–sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Position of the sphere in scene insertion order
    pub index: usize,
    pub sphere: &'a Sphere,
}

/// Find the nearest sphere hit by `ray` with `t` inside `window` (inclusive).
///
/// Every sphere is tested; there is no acceleration structure. A root
/// replaces the current best only when strictly smaller, so among spheres hit
/// at exactly the same `t` the one added to the scene first wins.
pub fn closest_hit<'a>(spheres: &'a [Sphere], ray: &Ray, window: Interval) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut closest_t = f64::INFINITY;

    for (index, sphere) in spheres.iter().enumerate() {
        let Some(roots) = intersect(ray, sphere) else {
            continue;
        };

        for t in [roots.t1, roots.t2] {
            if window.contains(t) && t < closest_t {
                closest_t = t;
                closest = Some(Hit { t, index, sphere });
            }
        }
    }

    closest
}
