//! Directional and point lights.

use std::f64::consts::PI;

use prism_math::{normalize, DVec3, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{check_color, check_non_negative, SceneError, SceneResult};
use crate::Color;

/// Light arriving at a point from one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the point toward the light
    pub direction: DVec3,
    pub color: Color,
    /// Intensity after attenuation
    pub intensity: f64,
    /// Occluders at or beyond this distance cast no shadow
    pub max_distance: f64,
}

/// A light infinitely far away, shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    direction: DVec3,
    color: Color,
    intensity: f64,
}

impl DirectionalLight {
    /// `direction` points from the light toward the scene and is normalized here.
    pub fn new(direction: DVec3, color: Color, intensity: f64) -> SceneResult<Self> {
        let direction = normalize(direction).map_err(|source| SceneError::Degenerate {
            name: "light direction",
            source,
        })?;

        Ok(Self {
            direction,
            color: check_color(color)?,
            intensity: check_non_negative("intensity", intensity)?,
        })
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    fn sample(&self) -> LightSample {
        LightSample {
            direction: -self.direction,
            color: self.color,
            intensity: self.intensity,
            max_distance: f64::INFINITY,
        }
    }
}

/// A point light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalLight {
    position: Point3,
    color: Color,
    intensity: f64,
}

impl SphericalLight {
    pub fn new(position: Point3, color: Color, intensity: f64) -> SceneResult<Self> {
        Ok(Self {
            position,
            color: check_color(color)?,
            intensity: check_non_negative("intensity", intensity)?,
        })
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    fn sample(&self, point: Point3) -> Option<LightSample> {
        let to_light = self.position - point;
        // A point sitting on the light receives no well-defined direction.
        let direction = match normalize(to_light) {
            Ok(direction) => direction,
            Err(err) => {
                log::trace!("Skipping point light: {}", err);
                return None;
            }
        };
        let distance_squared = to_light.length_squared();

        Some(LightSample {
            direction,
            color: self.color,
            intensity: self.intensity / (4.0 * PI * distance_squared),
            max_distance: distance_squared.sqrt(),
        })
    }
}

/// A light source in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Directional(DirectionalLight),
    Spherical(SphericalLight),
}

impl Light {
    /// Direction, color and attenuated intensity of this light as seen from `point`.
    ///
    /// Returns `None` when the light cannot illuminate the point at all.
    pub fn sample(&self, point: Point3) -> Option<LightSample> {
        match self {
            Light::Directional(light) => Some(light.sample()),
            Light::Spherical(light) => light.sample(point),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Directional(light) => light.color,
            Light::Spherical(light) => light.color,
        }
    }

    pub fn intensity(&self) -> f64 {
        match self {
            Light::Directional(light) => light.intensity,
            Light::Spherical(light) => light.intensity,
        }
    }

    /// Re-run construction checks, e.g. on a deserialized light.
    pub fn validate(self) -> SceneResult<Self> {
        Ok(match self {
            Light::Directional(l) => {
                Light::Directional(DirectionalLight::new(l.direction, l.color, l.intensity)?)
            }
            Light::Spherical(l) => {
                Light::Spherical(SphericalLight::new(l.position, l.color, l.intensity)?)
            }
        })
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<SphericalLight> for Light {
    fn from(light: SphericalLight) -> Self {
        Light::Spherical(light)
    }
}
