//! orb renderer - CPU ray casting for sphere scenes.
//!
//! One primary ray per pixel, closest-hit visibility, Phong shading with
//! hard shadows. Frames are rendered into a private buffer and published
//! whole, so display code always reads a finished image.

mod framebuffer;
mod hittable;
mod lighting;
mod render_loop;
mod renderer;
mod sphere;

pub use framebuffer::{FrameReader, Framebuffer};
pub use hittable::{closest_hit, Hit};
pub use lighting::{ambient_intensity, compute_lighting, SHADOW_EPSILON};
pub use render_loop::{LoopConfig, RenderError, RenderLoop};
pub use renderer::{
    primary_ray, render, render_into, trace_ray, RenderConfig, Renderer, PRIMARY_T_MIN,
};
pub use sphere::{intersect, Roots};

/// Re-export DVec3 and common math types from orb_math
pub use orb_math::{DVec3, Interval, Ray};
