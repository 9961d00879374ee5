//! Prism Core - scene description for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Appearance**: `Coloration`, `SurfaceType`, `Material`, `Texture`
//! - **Geometry**: `Sphere`, `Plane` and the `Primitive` enum
//! - **Lighting**: `DirectionalLight`, `SphericalLight` and the `Light` enum
//! - **Scene**: `Scene` and its `RenderSettings`
//!
//! Colorations and surface types are reference counted so many materials
//! can share them. A scene holds its own references, so resources stay
//! alive for as long as any scene that uses them.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use prism_core::{Coloration, Material, Scene, SurfaceType};
//!
//! let mut scene = Scene::with_dimensions(640, 480, 90.0, 1e-9, 5)?;
//! let red = Material::new(
//!     Arc::new(Coloration::solid(1.0, 0.0, 0.0)?),
//!     Arc::new(SurfaceType::diffuse()),
//!     0.18,
//! )?;
//! scene.add_sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, red)?;
//! ```

pub mod coloration;
pub mod error;
pub mod light;
pub mod material;
pub mod plane;
pub mod primitive;
pub mod scene;
pub mod sphere;
pub mod surface;
pub mod texture;

// Re-export commonly used types
pub use coloration::Coloration;
pub use error::{SceneError, SceneResult};
pub use light::{DirectionalLight, Light, LightSample, SphericalLight};
pub use material::{Color, Material};
pub use plane::Plane;
pub use primitive::Primitive;
pub use scene::{RenderSettings, Scene};
pub use sphere::Sphere;
pub use surface::SurfaceType;
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
