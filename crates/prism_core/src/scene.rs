//! Scene container for rendering.
//!
//! A scene is built incrementally with append-only operations and then
//! handed to the renderer by shared reference. Nothing in it changes while
//! a render runs, and the same scene can be rendered any number of times.

use serde::{Deserialize, Serialize};

use prism_math::{DVec3, Point3};

use crate::error::{SceneError, SceneResult};
use crate::{Color, DirectionalLight, Light, Material, Plane, Primitive, Sphere, SphericalLight};

/// Camera and recursion settings for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f64,
    /// Offset applied to secondary ray origins to avoid self-intersection
    pub shadow_bias: f64,
    /// Maximum number of reflection/refraction bounces
    pub max_recursion_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 90.0,
            shadow_bias: 1e-13,
            max_recursion_depth: 10,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SceneError::InvalidFov(self.fov));
        }
        if !(self.shadow_bias.is_finite() && self.shadow_bias > 0.0) {
            return Err(SceneError::InvalidShadowBias(self.shadow_bias));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Size in bytes of an RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Primitives, lights and render settings.
#[derive(Clone, Debug)]
pub struct Scene {
    settings: RenderSettings,
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene from validated settings.
    pub fn new(settings: RenderSettings) -> SceneResult<Self> {
        settings.validate()?;
        log::debug!(
            "Created scene {}x{} fov={} bias={:e} depth={}",
            settings.width,
            settings.height,
            settings.fov,
            settings.shadow_bias,
            settings.max_recursion_depth
        );

        Ok(Self {
            settings,
            primitives: Vec::new(),
            lights: Vec::new(),
        })
    }

    /// Create an empty scene from individual settings.
    pub fn with_dimensions(
        width: u32,
        height: u32,
        fov: f64,
        shadow_bias: f64,
        max_recursion_depth: u32,
    ) -> SceneResult<Self> {
        Self::new(RenderSettings {
            width,
            height,
            fov,
            shadow_bias,
            max_recursion_depth,
        })
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(
        &mut self,
        center: Point3,
        radius: f64,
        material: Material,
    ) -> SceneResult<usize> {
        let sphere = Sphere::new(center, radius, material)?;
        Ok(self.add_primitive(sphere))
    }

    /// Add a plane and return its index. The normal is normalized.
    pub fn add_plane(
        &mut self,
        origin: Point3,
        normal: DVec3,
        material: Material,
    ) -> SceneResult<usize> {
        let plane = Plane::new(origin, normal, material)?;
        Ok(self.add_primitive(plane))
    }

    /// Add an already constructed primitive and return its index.
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) -> usize {
        let id = self.primitives.len();
        self.primitives.push(primitive.into());
        log::debug!("Added primitive {}", id);
        id
    }

    /// Add a directional light shining along `direction`.
    pub fn add_directional_light(
        &mut self,
        direction: DVec3,
        color: Color,
        intensity: f64,
    ) -> SceneResult<usize> {
        let light = DirectionalLight::new(direction, color, intensity)?;
        self.add_light(light.into())
    }

    /// Add a point light at `position`.
    pub fn add_spherical_light(
        &mut self,
        position: Point3,
        color: Color,
        intensity: f64,
    ) -> SceneResult<usize> {
        let light = SphericalLight::new(position, color, intensity)?;
        self.add_light(light.into())
    }

    /// Validate and add a light, returning its index.
    pub fn add_light(&mut self, light: Light) -> SceneResult<usize> {
        let light = light.validate()?;
        let id = self.lights.len();
        self.lights.push(light);
        log::debug!("Added light {}", id);
        Ok(id)
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn width(&self) -> u32 {
        self.settings.width
    }

    pub fn height(&self) -> u32 {
        self.settings.height
    }

    pub fn shadow_bias(&self) -> f64 {
        self.settings.shadow_bias
    }

    pub fn max_recursion_depth(&self) -> u32 {
        self.settings.max_recursion_depth
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coloration, SurfaceType};
    use std::sync::Arc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn white() -> Material {
        Material::new(
            Arc::new(Coloration::solid(1.0, 1.0, 1.0).unwrap()),
            Arc::new(SurfaceType::Diffuse),
            0.18,
        )
        .unwrap()
    }

    #[test]
    fn test_scene_creation() {
        init_logging();
        let mut scene = Scene::with_dimensions(4, 2, 60.0, 1e-9, 3).unwrap();

        let id = scene
            .add_sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, white())
            .unwrap();
        assert_eq!(id, 0);
        let id = scene.add_plane(DVec3::NEG_Y, DVec3::Y * 2.0, white()).unwrap();
        assert_eq!(id, 1);

        scene
            .add_directional_light(DVec3::NEG_Z, Color::ONE, 1.0)
            .unwrap();
        scene
            .add_spherical_light(DVec3::new(0.0, 5.0, 0.0), Color::ONE, 1000.0)
            .unwrap();

        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.settings().aspect_ratio(), 2.0);
        assert_eq!(scene.settings().frame_len(), 32);
        assert_eq!(scene.max_recursion_depth(), 3);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Scene::with_dimensions(0, 10, 90.0, 1e-9, 1),
            Err(SceneError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Scene::with_dimensions(10, 0, 90.0, 1e-9, 1).is_err());
        assert!(matches!(
            Scene::with_dimensions(10, 10, 90.0, 0.0, 1),
            Err(SceneError::InvalidShadowBias(_))
        ));
        assert!(Scene::with_dimensions(10, 10, 90.0, -1e-6, 1).is_err());
        assert!(matches!(
            Scene::with_dimensions(10, 10, 180.0, 1e-9, 1),
            Err(SceneError::InvalidFov(_))
        ));
    }

    #[test]
    fn test_failed_add_leaves_scene_unchanged() {
        let mut scene = Scene::new(RenderSettings::default()).unwrap();
        assert!(scene.add_sphere(DVec3::ZERO, -1.0, white()).is_err());
        assert!(scene.add_plane(DVec3::ZERO, DVec3::ZERO, white()).is_err());
        assert!(scene
            .add_spherical_light(DVec3::ZERO, Color::ONE, -5.0)
            .is_err());
        assert_eq!(scene.primitive_count(), 0);
        assert_eq!(scene.light_count(), 0);
    }

    #[test]
    fn test_settings_from_json_uses_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{"width": 320, "height": 240}"#).unwrap();
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 240);
        assert_eq!(settings.fov, 90.0);
        assert_eq!(settings.max_recursion_depth, 10);
        assert!(Scene::new(settings).is_ok());
    }

    #[test]
    fn test_shared_material_outlives_caller_handles() {
        let coloration = Arc::new(Coloration::solid(0.3, 0.6, 0.9).unwrap());
        let surface = Arc::new(SurfaceType::reflective(0.4).unwrap());
        let material = Material::new(coloration.clone(), surface.clone(), 0.5).unwrap();

        let mut scene = Scene::new(RenderSettings::default()).unwrap();
        scene.add_sphere(DVec3::NEG_Z, 0.5, material.clone()).unwrap();
        scene.add_sphere(DVec3::Z, 0.5, material).unwrap();
        drop(coloration);
        drop(surface);

        for primitive in scene.primitives() {
            assert_eq!(
                primitive.material().surface(),
                SurfaceType::Reflective { reflectivity: 0.4 }
            );
        }
    }
}
