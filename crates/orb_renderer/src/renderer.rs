//! Ray tracing and the framebuffer renderer.
//!
//! Implements single-bounce local shading:
//! - Closest-hit visibility against every sphere
//! - Ambient, diffuse and specular lighting with hard shadows
//! - A full re-render of every pixel per frame

use std::time::Instant;

use crate::framebuffer::{FrameQueue, FrameReader, Framebuffer};
use crate::hittable::closest_hit;
use crate::lighting::{ambient_intensity, compute_lighting};
use orb_core::{Camera, Color, Light, Scene, SceneError, Sphere, Viewport};
use orb_math::{vector, DVec3, Interval, Ray};

/// Primary rays ignore everything closer than the viewport plane.
pub const PRIMARY_T_MIN: f64 = 1.0;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderConfig {
    pub camera: Camera,
    pub viewport: Viewport,
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Result<Self, SceneError> {
        self.viewport = Viewport::new(width, height)?;
        Ok(self)
    }

    /// Set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }
}

/// Build the primary ray from the camera through pixel (x, y).
///
/// Pixel rows grow downward while the scene's y axis points up, so the
/// vertical offset is negated.
pub fn primary_ray(camera: &Camera, viewport: &Viewport, x: u32, y: u32) -> Ray {
    let half_width = (viewport.width() / 2) as f64;
    let half_height = (viewport.height() / 2) as f64;
    let on_viewport = DVec3::new(
        x as f64 - half_width,
        -(y as f64 - half_height),
        camera.distance_to_viewport,
    );
    Ray::new(camera.center, vector::subtract(on_viewport, camera.center))
}

/// Compute the color seen by a ray.
///
/// Misses return the scene background. Hits are shaded once with the local
/// lighting model; no secondary rays other than shadow rays are cast.
pub fn trace_ray(scene: &Scene, camera: &Camera, ray: &Ray) -> Color {
    let window = Interval::new(PRIMARY_T_MIN, camera.view_distance_multiple);
    let Some(hit) = closest_hit(scene.spheres(), ray, window) else {
        return scene.background();
    };

    let material = hit.sphere.material();
    let point = ray.at(hit.t);
    let intensity = match vector::normalize(vector::subtract(point, hit.sphere.center())) {
        Ok(normal) => compute_lighting(scene, point, normal, ray.direction(), material.specular()),
        Err(err) => {
            // Only reachable through float underflow on a tiny sphere
            log::warn!("{} at sphere #{}, using ambient light only", err, hit.index);
            ambient_intensity(scene)
        }
    };

    material.color().apply_intensity(intensity)
}

/// Render every pixel of `frame`.
pub fn render_into(scene: &Scene, camera: &Camera, frame: &mut Framebuffer) {
    let viewport = frame.viewport();
    for y in 0..viewport.height() {
        for x in 0..viewport.width() {
            let ray = primary_ray(camera, &viewport, x, y);
            frame.set(x, y, trace_ray(scene, camera, &ray));
        }
    }
}

/// Render the entire scene to a new framebuffer.
///
/// This is a one-shot render that bypasses frame publication.
pub fn render(scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let mut frame = Framebuffer::new(config.viewport, scene.background());
    render_into(scene, &config.camera, &mut frame);
    frame
}

/// Owns a scene and renders it into a double-buffered framebuffer.
///
/// Spheres and lights are appended before rendering starts. Once the renderer
/// is moved into a [`RenderLoop`](crate::RenderLoop) the scene can no longer
/// change.
pub struct Renderer {
    scene: Scene,
    config: RenderConfig,
    frames: FrameQueue,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with an empty scene.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_scene(config, Scene::new())
    }

    /// Create a renderer for an existing scene.
    pub fn with_scene(config: RenderConfig, scene: Scene) -> Self {
        log::info!(
            "Renderer {}x{}, {} spheres, {} lights",
            config.viewport.width(),
            config.viewport.height(),
            scene.sphere_count(),
            scene.light_count()
        );
        let frames = FrameQueue::new(config.viewport, scene.background());
        Self {
            scene,
            config,
            frames,
            frame_count: 0,
        }
    }

    /// Append a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.scene.add_sphere(sphere)
    }

    /// Append a light to the scene.
    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        self.scene.add_light(light)
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Re-render every pixel and publish the finished frame.
    pub fn update_framebuffer(&mut self) {
        let start = Instant::now();

        let mut frame = self.frames.take_back();
        render_into(&self.scene, &self.config.camera, &mut frame);
        self.frame_count += 1;
        frame.set_frame_number(self.frame_count);
        self.frames.publish(frame);

        log::debug!("Frame {} rendered in {:?}", self.frame_count, start.elapsed());
    }

    /// Pixel (x, y) of the latest published frame, `None` outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.frames.reader().get_pixel(x, y)
    }

    /// A read handle for display collaborators.
    pub fn reader(&self) -> FrameReader {
        self.frames.reader()
    }
}
