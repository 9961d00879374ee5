//! Materials: a coloration, a surface model and an albedo.

use std::sync::Arc;

use prism_math::DVec3;

use crate::error::{check_unit, SceneResult};
use crate::{Coloration, SurfaceType};

/// Color type alias (linear RGB, channels non-negative and not clamped)
pub type Color = DVec3;

/// Surface appearance of a primitive.
///
/// Colorations and surface types are built independently and shared by
/// reference count, so one texture can back many materials. A scene keeps
/// every resource it references alive until the scene itself is dropped;
/// the caller's own handles may be released at any time without affecting
/// renders in flight.
#[derive(Clone, Debug)]
pub struct Material {
    coloration: Arc<Coloration>,
    surface: Arc<SurfaceType>,
    albedo: f64,
}

impl Material {
    /// Create a material. `albedo` must be in [0, 1].
    pub fn new(
        coloration: Arc<Coloration>,
        surface: Arc<SurfaceType>,
        albedo: f64,
    ) -> SceneResult<Self> {
        coloration.validate()?;
        surface.validate()?;
        let albedo = check_unit("albedo", albedo)?;

        Ok(Self {
            coloration,
            surface,
            albedo,
        })
    }

    pub fn coloration(&self) -> &Coloration {
        &self.coloration
    }

    pub fn surface(&self) -> SurfaceType {
        *self.surface
    }

    /// Diffuse reflectance coefficient.
    pub fn albedo(&self) -> f64 {
        self.albedo
    }
}
