//! Frame assembly.
//!
//! Every pixel gets one primary ray through its center. Rows are rendered
//! in parallel with rayon, each worker writing its own disjoint row of the
//! RGBA8 output buffer.

use std::time::Instant;

use prism_core::{Color, Scene};
use prism_math::Interval;
use rayon::prelude::*;
use thiserror::Error;

use crate::{Camera, Tracer};

/// Bytes per output pixel (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// Errors that can occur when rendering into caller-provided storage.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Output buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Render the scene into a new row-major RGBA8 buffer, top row first.
///
/// The buffer is exactly `width * height * 4` bytes with a stride of
/// `width * 4`.
pub fn render(scene: &Scene) -> Vec<u8> {
    let mut buffer = vec![0u8; scene.settings().frame_len()];
    render_rows(scene, &mut buffer);
    buffer
}

/// Render the scene into an existing buffer of exactly `width * height * 4` bytes.
pub fn render_into(scene: &Scene, buffer: &mut [u8]) -> Result<(), RenderError> {
    let expected = scene.settings().frame_len();
    if buffer.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: buffer.len(),
        });
    }

    render_rows(scene, buffer);
    Ok(())
}

/// Render the scene into an `image` buffer, ready for encoding.
pub fn render_image(scene: &Scene) -> Result<image::RgbaImage, RenderError> {
    let buffer = render(scene);
    let actual = buffer.len();
    image::RgbaImage::from_raw(scene.width(), scene.height(), buffer).ok_or(
        RenderError::BufferSize {
            expected: scene.settings().frame_len(),
            actual,
        },
    )
}

/// Compute the unclamped color of pixel (x, y).
pub fn render_pixel(camera: &Camera, tracer: &Tracer, x: u32, y: u32) -> Color {
    tracer.trace(&camera.get_ray(x, y), 0)
}

fn render_rows(scene: &Scene, buffer: &mut [u8]) {
    let start = Instant::now();
    let camera = Camera::new(scene.settings());
    let tracer = Tracer::new(scene);
    let stride = scene.width() as usize * BYTES_PER_PIXEL;

    log::info!(
        "Rendering {}x{} ({} primitives, {} lights, depth {})",
        scene.width(),
        scene.height(),
        scene.primitive_count(),
        scene.light_count(),
        scene.max_recursion_depth()
    );

    buffer
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let color = render_pixel(&camera, &tracer, x as u32, y as u32);
                pixel.copy_from_slice(&color_to_rgba(color));
            }
        });

    log::info!("Rendered in {:?}", start.elapsed());
}

/// Clamp a value to [0, 1] range. NaN maps to 0.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        Interval::UNIT.clamp(x)
    }
}

/// Convert a color to 8-bit RGBA with opaque alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Coloration, Material, RenderSettings, SurfaceType};
    use prism_math::DVec3;
    use std::sync::Arc;

    fn lit_sphere_scene(width: u32, height: u32) -> Scene {
        let mut scene = Scene::new(RenderSettings {
            width,
            height,
            fov: 90.0,
            shadow_bias: 1e-9,
            max_recursion_depth: 3,
        })
        .unwrap();
        let white = Material::new(
            Arc::new(Coloration::solid(1.0, 1.0, 1.0).unwrap()),
            Arc::new(SurfaceType::Diffuse),
            1.0,
        )
        .unwrap();
        scene
            .add_sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, white)
            .unwrap();
        scene
            .add_directional_light(DVec3::NEG_Z, Color::ONE, 1.0)
            .unwrap();
        scene
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(7.0, -3.0, 0.5)), [255, 0, 127, 255]);
        assert_eq!(color_to_rgba(Color::new(f64::NAN, 0.0, 0.0)), [0, 0, 0, 255]);
    }

    #[test]
    fn test_buffer_layout() {
        let scene = lit_sphere_scene(5, 3);
        let buffer = render(&scene);
        assert_eq!(buffer.len(), 5 * 3 * 4);
        assert!(buffer.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_render_into_checks_length() {
        let scene = lit_sphere_scene(4, 4);

        let mut short = vec![0u8; 10];
        assert!(matches!(
            render_into(&scene, &mut short),
            Err(RenderError::BufferSize { expected: 64, actual: 10 })
        ));

        let mut exact = vec![0u8; 64];
        render_into(&scene, &mut exact).unwrap();
        assert_eq!(exact, render(&scene));
    }

    #[test]
    fn test_render_image_dimensions() {
        let scene = lit_sphere_scene(6, 2);
        let image = render_image(&scene).unwrap();
        assert_eq!(image.dimensions(), (6, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_pixel_matches_buffer() {
        let scene = lit_sphere_scene(9, 9);
        let camera = Camera::new(scene.settings());
        let tracer = Tracer::new(&scene);
        let buffer = render(&scene);

        let center = render_pixel(&camera, &tracer, 4, 4);
        let offset = (4 * 9 + 4) * 4;
        assert_eq!(&buffer[offset..offset + 4], &color_to_rgba(center));
        assert!(center.max_element() > 0.0);
    }
}
