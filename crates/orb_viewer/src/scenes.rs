//! Built-in scenes.

use anyhow::Result;
use orb_core::{Color, Light, Material, Scene, Sphere};
use orb_math::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Three colored spheres on a large ground sphere, lit by one light of each kind.
pub fn default_scene() -> Result<Scene> {
    let mut scene = Scene::new();

    let spheres = [
        (DVec3::new(0.0, 0.0, 4000.0), 1500.0, Color::GREEN, 500.0),
        (DVec3::new(1500.0, -300.0, 3000.0), 600.0, Color::RED, 10.0),
        (DVec3::new(-1600.0, 200.0, 3500.0), 700.0, Color::BLUE, 1000.0),
        (DVec3::new(0.0, -101000.0, 3000.0), 100000.0, Color::new(255, 255, 0), 1000.0),
    ];
    for (center, radius, color, specular) in spheres {
        scene.add_sphere(Sphere::new(center, radius, Material::new(color, specular)?)?);
    }

    add_light_rig(&mut scene)?;
    Ok(scene)
}

/// `count` spheres with random position, size and color.
///
/// The same seed always produces the same scene.
pub fn random_scene(count: usize, seed: u64) -> Result<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    for _ in 0..count {
        let center = DVec3::new(
            rng.gen::<f64>() * 100.0,
            rng.gen::<f64>() * 100.0,
            rng.gen::<f64>() * 1000.0,
        );
        let mut radius = 0.0;
        while radius == 0.0 {
            radius = rng.gen::<f64>() * 1000.0;
        }
        let color = Color::new(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255));
        let specular = rng.gen_range(1.0..=1000.0);

        scene.add_sphere(Sphere::new(center, radius, Material::new(color, specular)?)?);
    }

    add_light_rig(&mut scene)?;
    log::info!("Generated {} random spheres (seed {})", count, seed);
    Ok(scene)
}

fn add_light_rig(scene: &mut Scene) -> Result<()> {
    scene.add_light(Light::ambient(0.2))?;
    scene.add_light(Light::point(0.6, DVec3::new(2000.0, 1000.0, 0.0)))?;
    scene.add_light(Light::directional(0.2, DVec3::new(-0.2, -0.7, 0.7).normalize()))?;
    Ok(())
}
