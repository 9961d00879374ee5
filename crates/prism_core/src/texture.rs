//! Texture loading and caching for colorations.
//!
//! Textures are decoded once, before rendering, into an in-memory grid of
//! RGB samples in [0, 1]. Sampling is a pure read with wrap-around addressing,
//! so it is safe to call from any render worker.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture grid must be non-empty, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Texture data holds {actual} samples, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture with RGB samples in [0, 1].
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    width: u32,

    /// Texture height in pixels
    height: u32,

    /// Row-major samples, top row first
    pixels: Vec<Color>,

    /// Original file path (for debugging)
    path: String,
}

impl Texture {
    /// Create a texture from RGB samples in row-major order, top row first.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Create a texture from packed RGB bytes (3 per pixel).
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> TextureResult<Self> {
        if bytes.len() % 3 != 0 {
            return Err(TextureError::SizeMismatch {
                expected: width as usize * height as usize,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|p| {
                Color::new(
                    unit_channel(p[0]),
                    unit_channel(p[1]),
                    unit_channel(p[2]),
                )
            })
            .collect();

        Self::new(width, height, pixels, "<memory>")
    }

    /// Decode a texture from an image file.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        load_texture_file(path.as_ref())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sample the nearest pixel at UV coordinates.
    ///
    /// Both axes wrap, so any real (u, v) addresses a pixel and the texture
    /// repeats infinitely. (0, 0) is the bottom-left corner.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = wrap(u, self.width);
        let y = self.height - 1 - wrap(v, self.height);
        self.get_pixel(x, y)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Map a texture coordinate onto `[0, bound)` with modulo wrap.
fn wrap(coord: f64, bound: u32) -> u32 {
    let scaled = (coord * bound as f64).floor();
    if !scaled.is_finite() {
        return 0;
    }
    (scaled as i64).rem_euclid(bound as i64) as u32
}

/// Cache for loaded textures.
///
/// A file is decoded once and the resulting grid is shared by every
/// coloration that references it.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            log::debug!("Texture cache hit: {}", path);
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        Ok(texture)
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop the cache's references. Colorations already holding a texture keep it alive.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|e| {
        TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels: Vec<Color> = rgb
        .pixels()
        .map(|p| {
            Color::new(
                unit_channel(p[0]),
                unit_channel(p[1]),
                unit_channel(p[2]),
            )
        })
        .collect();

    let texture = Texture::new(width, height, pixels, path.to_string_lossy())?;

    log::debug!(
        "Loaded texture: {} ({}x{}, {:.1} KB)",
        path.display(),
        width,
        height,
        texture.size_bytes() as f32 / 1024.0
    );

    Ok(texture)
}

/// Map a stored byte onto [0, 1]. Output writes `255 * c` truncated, so
/// every byte survives the trip back unchanged.
fn unit_channel(value: u8) -> f64 {
    value as f64 / 255.0
}
