//! Surface model: how a surface's diffuse term combines with secondary rays.
//!
//! This is pure data. The blending itself lives in the tracer, which is the
//! only place with recursive access to the scene.

use serde::{Deserialize, Serialize};

use crate::error::{check_unit, SceneError, SceneResult};

/// How light leaving a surface is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceType {
    /// Lambertian shading only.
    #[default]
    Diffuse,
    /// Blend of diffuse and a mirror reflection, weighted by `reflectivity`.
    Reflective { reflectivity: f64 },
    /// Blend of diffuse and the transmitted ray, weighted by `transparency`.
    Refractive { index: f64, transparency: f64 },
}

impl SurfaceType {
    pub fn diffuse() -> Self {
        SurfaceType::Diffuse
    }

    /// Create a mirror-like surface. `reflectivity` must be in [0, 1].
    pub fn reflective(reflectivity: f64) -> SceneResult<Self> {
        SurfaceType::Reflective { reflectivity }.validate()
    }

    /// Create a transmissive surface.
    ///
    /// `index` is the refractive index relative to the surrounding medium and
    /// must be positive; `transparency` must be in [0, 1].
    pub fn refractive(index: f64, transparency: f64) -> SceneResult<Self> {
        SurfaceType::Refractive {
            index,
            transparency,
        }
        .validate()
    }

    /// Check the variant's parameters, returning the surface unchanged when valid.
    pub fn validate(self) -> SceneResult<Self> {
        match self {
            SurfaceType::Diffuse => {}
            SurfaceType::Reflective { reflectivity } => {
                check_unit("reflectivity", reflectivity)?;
            }
            SurfaceType::Refractive {
                index,
                transparency,
            } => {
                if !(index.is_finite() && index > 0.0) {
                    return Err(SceneError::InvalidRefractiveIndex(index));
                }
                check_unit("transparency", transparency)?;
            }
        }
        Ok(self)
    }
}
