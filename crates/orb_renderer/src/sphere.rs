//! Ray–sphere intersection.

use orb_core::Sphere;
use orb_math::{vector, Ray};

/// Both ray parameters where a ray crosses a sphere's surface.
///
/// `t1 >= t2`. Neither root is clamped to a window; callers decide which
/// parameters count as a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots {
    pub t1: f64,
    pub t2: f64,
}

/// Solve `|O + tD - C|² = r²` for `t`.
///
/// Returns `None` when the ray misses the sphere (negative discriminant) or
/// when the ray has a zero-length direction, which has no parameterisation.
pub fn intersect(ray: &Ray, sphere: &Sphere) -> Option<Roots> {
    let co = vector::subtract(ray.origin(), sphere.center());
    let d = ray.direction();

    let a = vector::dot(d, d);
    if a == 0.0 {
        return None;
    }
    let b = vector::dot(co, d);
    let c = vector::dot(co, co) - sphere.radius() * sphere.radius();

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    Some(Roots {
        t1: (-b + sqrtd) / a,
        t2: (-b - sqrtd) / a,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::{Color, Material};
    use orb_math::DVec3;

    fn sphere(center: DVec3, radius: f64) -> Sphere {
        let material = Material::new(Color::GREEN, 10.0).unwrap();
        Sphere::new(center, radius, material).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = sphere(DVec3::new(0.0, 0.0, 10.0), 2.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);

        let roots = intersect(&ray, &sphere).unwrap();
        assert!((roots.t1 - 12.0).abs() < 1e-5);
        assert!((roots.t2 - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = sphere(DVec3::new(0.0, 0.0, 10.0), 2.0);

        // Ray passing beside the sphere
        let ray = Ray::new(DVec3::new(5.0, 0.0, 0.0), DVec3::Z);
        assert_eq!(intersect(&ray, &sphere), None);

        // Ray pointing away from sphere
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert_eq!(intersect(&ray, &sphere), None);
    }

    #[test]
    fn test_roots_symmetric_through_center() {
        let sphere = sphere(DVec3::new(3.0, -4.0, 50.0), 5.0);
        let origin = DVec3::new(1.0, 2.0, 0.0);
        // Unnormalized direction aimed straight at the center
        let direction = (sphere.center() - origin) * 0.5;
        let ray = Ray::new(origin, direction);

        let roots = intersect(&ray, &sphere).unwrap();
        // Center is reached at t = 2 for this direction
        let t_mid = 2.0;
        assert!(roots.t1 >= roots.t2);
        assert!(((roots.t1 - t_mid) - (t_mid - roots.t2)).abs() < 1e-4);
        assert!(((ray.at(roots.t2) - sphere.center()).length() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_roots_behind_origin_are_reported() {
        let sphere = sphere(DVec3::ZERO, 1.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);

        // Both roots are negative; filtering them out is the caller's job
        let roots = intersect(&ray, &sphere).unwrap();
        assert!((roots.t1 + 4.0).abs() < 1e-5);
        assert!((roots.t2 + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_tangent_ray_has_double_root() {
        let sphere = sphere(DVec3::new(0.0, 1.0, 10.0), 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);

        let roots = intersect(&ray, &sphere).unwrap();
        assert_eq!(roots.t1, roots.t2);
        assert!((roots.t1 - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_direction_is_a_miss() {
        let sphere = sphere(DVec3::ZERO, 1.0);

        // Even from inside the sphere a degenerate ray hits nothing
        let ray = Ray::new(DVec3::ZERO, DVec3::ZERO);
        assert_eq!(intersect(&ray, &sphere), None);
    }
}
