//! Construction-time validation errors.
//!
//! Every check happens while a scene is being built, so a scene that was
//! built successfully always renders.

use prism_math::{DomainError, Interval};
use thiserror::Error;

use crate::texture::TextureError;
use crate::Color;

/// Errors raised while building colorations, materials, lights and scenes.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("Shadow bias must be positive, got {0}")]
    InvalidShadowBias(f64),

    #[error("Sphere radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("Refractive index must be positive, got {0}")]
    InvalidRefractiveIndex(f64),

    #[error("{name} must be in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Color channels must be finite and non-negative, got {0}")]
    InvalidColor(Color),

    #[error("Degenerate {name}: {source}")]
    Degenerate {
        name: &'static str,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Check that a coefficient lies in [0, 1].
pub(crate) fn check_unit(name: &'static str, value: f64) -> SceneResult<f64> {
    if Interval::UNIT.contains(value) {
        Ok(value)
    } else {
        Err(SceneError::OutOfRange { name, value })
    }
}

/// Check that an intensity is finite and non-negative.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> SceneResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SceneError::Negative { name, value })
    }
}

/// Check that every channel of a color is finite and non-negative.
pub(crate) fn check_color(color: Color) -> SceneResult<Color> {
    if color.is_finite() && color.min_element() >= 0.0 {
        Ok(color)
    } else {
        Err(SceneError::InvalidColor(color))
    }
}
