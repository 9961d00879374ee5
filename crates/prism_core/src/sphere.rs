//! Sphere primitive.

use std::f64::consts::PI;

use prism_math::{normalize, DVec3, Interval, Point3, Ray};

use crate::error::{SceneError, SceneResult};
use crate::Material;

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Point3, radius: f64, material: Material) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Nearest ray parameter strictly greater than `bias`, if any.
    pub fn intersect(&self, ray: &Ray, bias: f64) -> Option<f64> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        // A tangent ray grazes the surface without entering it.
        if a == 0.0 || discriminant.is_nan() || discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let ray_t = Interval::beyond(bias);

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Point3) -> DVec3 {
        // Only the center itself has no direction.
        normalize(point - self.center).unwrap_or(DVec3::Y)
    }

    /// Spherical UV coordinates of a point on the surface.
    ///
    /// u wraps once around the Y axis starting at -X; v runs from the
    /// bottom pole (0) to the top pole (1).
    pub fn surface_coords(&self, point: Point3) -> (f64, f64) {
        let p = self.normal_at(point);
        // theta: angle up from -Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}
