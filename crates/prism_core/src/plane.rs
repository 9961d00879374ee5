//! Infinite, two-sided plane primitive.

use prism_math::{normalize, DVec3, Point3, Ray};

use crate::error::{SceneError, SceneResult};
use crate::Material;

/// An infinite plane through `origin` with unit `normal`.
#[derive(Clone, Debug)]
pub struct Plane {
    origin: Point3,
    normal: DVec3,
    material: Material,
    /// In-plane basis used for texture coordinates
    u_axis: DVec3,
    v_axis: DVec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized and must be non-zero.
    pub fn new(origin: Point3, normal: DVec3, material: Material) -> SceneResult<Self> {
        let normal = normalize(normal).map_err(|source| SceneError::Degenerate {
            name: "plane normal",
            source,
        })?;

        let mut u_axis = normal.cross(DVec3::Z);
        if u_axis.length_squared() < 1e-12 {
            u_axis = normal.cross(DVec3::Y);
        }
        let u_axis = u_axis.normalize();
        let v_axis = normal.cross(u_axis);

        Ok(Self {
            origin,
            normal,
            material,
            u_axis,
            v_axis,
        })
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Stored unit normal. Not oriented toward any particular ray.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Ray parameter strictly greater than `bias`, if any.
    ///
    /// Rays within `bias` of parallel to the plane never hit it.
    pub fn intersect(&self, ray: &Ray, bias: f64) -> Option<f64> {
        let denom = ray.direction().dot(self.normal);
        if denom.is_nan() || denom.abs() <= bias {
            return None;
        }

        let t = (self.origin - ray.origin()).dot(self.normal) / denom;
        if t > bias && t.is_finite() {
            Some(t)
        } else {
            None
        }
    }

    /// Planar UV coordinates in world units, measured from `origin`.
    pub fn surface_coords(&self, point: Point3) -> (f64, f64) {
        let offset = point - self.origin;
        (offset.dot(self.u_axis), offset.dot(self.v_axis))
    }
}
