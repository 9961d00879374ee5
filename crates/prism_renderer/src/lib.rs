//! Prism Renderer - CPU Whitted-style ray tracing
//!
//! Turns a `prism_core::Scene` into an RGBA8 frame. One primary ray per
//! pixel, Lambertian direct lighting with hard shadows, and recursive
//! reflection and refraction up to the scene's maximum depth.
//!
//! Rendering is deterministic: the same scene always produces the same
//! bytes, regardless of how rows are scheduled across threads.

mod camera;
mod hittable;
mod renderer;
mod tracer;

pub use camera::Camera;
pub use hittable::{hit_nearest, is_occluded, HitRecord};
pub use renderer::{
    clamp_01, color_to_rgba, render, render_image, render_into, render_pixel, RenderError,
    BYTES_PER_PIXEL,
};
pub use tracer::{Tracer, BACKGROUND};

/// Re-export the scene description and math types used by the renderer API
pub use prism_core::{Color, Scene};
pub use prism_math::{DVec3, Interval, Ray};
