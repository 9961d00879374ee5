//! Surface color lookup: a constant color or a texture mapped onto a primitive.

use std::path::Path;
use std::sync::Arc;

use prism_math::Point3;

use crate::error::{check_color, SceneResult};
use crate::texture::{Texture, TextureCache};
use crate::{Color, Primitive};

/// Source of a surface's base color.
#[derive(Clone, Debug)]
pub enum Coloration {
    /// The same color everywhere.
    Color(Color),
    /// A decoded texture addressed through the primitive's UV mapping.
    Texture(Arc<Texture>),
}

impl Coloration {
    /// Create a solid color. Channels must be finite and non-negative.
    pub fn solid(red: f64, green: f64, blue: f64) -> SceneResult<Self> {
        Ok(Coloration::Color(check_color(Color::new(red, green, blue))?))
    }

    /// Wrap an already decoded texture.
    pub fn texture(texture: Arc<Texture>) -> Self {
        Coloration::Texture(texture)
    }

    /// Decode a texture file now, so decode failures surface before any render.
    pub fn open_texture(path: impl AsRef<Path>) -> SceneResult<Self> {
        Ok(Coloration::Texture(Arc::new(Texture::open(path)?)))
    }

    /// Decode a texture through a cache, sharing the grid with earlier loads.
    pub fn cached_texture(cache: &mut TextureCache, path: &str) -> SceneResult<Self> {
        Ok(Coloration::Texture(cache.load(path)?))
    }

    pub(crate) fn validate(&self) -> SceneResult<()> {
        if let Coloration::Color(color) = self {
            check_color(*color)?;
        }
        Ok(())
    }

    /// Base color of `primitive` at `point`.
    pub fn color_at(&self, primitive: &Primitive, point: Point3) -> Color {
        match self {
            Coloration::Color(color) => *color,
            Coloration::Texture(texture) => {
                let (u, v) = primitive.surface_coords(point);
                texture.sample(u, v)
            }
        }
    }
}
