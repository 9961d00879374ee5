//! Simple ray tracer example.
//!
//! Renders a 5x5 grid of spheres in front of a gray wall, cycling through
//! every coloration and surface type, and saves the frame as a PNG.
//!
//! Usage: `cargo run --example simple_render -- [checkerboard.png] [output.png]`
//!
//! Without a texture path a procedural checkerboard is used.

use std::sync::Arc;

use anyhow::Context;
use prism_core::{Coloration, Material, RenderSettings, SurfaceType, Texture, TextureCache};
use prism_renderer::{render_image, Color, DVec3, Scene};

const ALBEDO: f64 = 0.18;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let texture_path = args.next();
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let start = std::time::Instant::now();
    let scene = build_scene(texture_path.as_deref())?;
    log::info!(
        "Scene built in {:?}: {} primitives, {} lights",
        start.elapsed(),
        scene.primitive_count(),
        scene.light_count()
    );

    let image = render_image(&scene)?;
    image
        .save(&output)
        .with_context(|| format!("Failed to save {}", output))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene(texture_path: Option<&str>) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(RenderSettings {
        width: 800,
        height: 600,
        fov: 90.0,
        shadow_bias: 1e-13,
        max_recursion_depth: 10,
    })?;

    let checkerboard = match texture_path {
        Some(path) => {
            let mut cache = TextureCache::new();
            Coloration::cached_texture(&mut cache, path)?
        }
        None => Coloration::texture(Arc::new(checkerboard(64, 8)?)),
    };

    let colorations = [
        Arc::new(Coloration::solid(1.0, 1.0, 1.0)?),
        Arc::new(Coloration::solid(1.0, 0.0, 0.0)?),
        Arc::new(Coloration::solid(0.0, 1.0, 0.0)?),
        Arc::new(Coloration::solid(0.0, 0.0, 1.0)?),
        Arc::new(checkerboard),
    ];
    let surfaces = [
        Arc::new(SurfaceType::diffuse()),
        Arc::new(SurfaceType::reflective(0.95)?),
        Arc::new(SurfaceType::refractive(1.5, 0.5)?),
        Arc::new(SurfaceType::reflective(0.45)?),
    ];

    let mut n = 0;
    for y in -2..=2 {
        for x in -2..=2 {
            let material = Material::new(
                colorations[n % colorations.len()].clone(),
                surfaces[n % surfaces.len()].clone(),
                ALBEDO,
            )?;
            scene.add_sphere(DVec3::new(x as f64, y as f64, -5.0), 0.4, material)?;
            n += 1;
        }
    }

    let wall = Material::new(
        Arc::new(Coloration::solid(0.5, 0.5, 0.5)?),
        surfaces[0].clone(),
        ALBEDO,
    )?;
    scene.add_plane(DVec3::new(0.0, 0.0, -10.0), DVec3::Z, wall)?;

    scene.add_spherical_light(
        DVec3::new(0.0, 0.0, -7.5),
        Color::new(0.25, 1.0, 0.25),
        10000.0,
    )?;
    scene.add_directional_light(DVec3::NEG_Z, Color::ONE, 5.0)?;

    Ok(scene)
}

/// Black and white checkerboard of `size`x`size` pixels with `cells` squares per side.
fn checkerboard(size: u32, cells: u32) -> anyhow::Result<Texture> {
    let cell = (size / cells).max(1);
    let bytes: Vec<u8> = (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            let value = if (x / cell + y / cell) % 2 == 0 { 255 } else { 0 };
            [value; 3]
        })
        .collect();

    Ok(Texture::from_rgb8(size, size, &bytes)?)
}
