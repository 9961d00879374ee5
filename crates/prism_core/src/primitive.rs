//! Closed set of renderable primitives.

use prism_math::{DVec3, Point3, Ray};

use crate::{Material, Plane, Sphere};

/// A renderable primitive.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}

impl Primitive {
    /// Nearest ray parameter strictly greater than `bias`, if any.
    pub fn intersect(&self, ray: &Ray, bias: f64) -> Option<f64> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray, bias),
            Primitive::Plane(plane) => plane.intersect(ray, bias),
        }
    }

    /// Geometric unit normal at `point`, not oriented toward any ray.
    pub fn normal_at(&self, point: Point3) -> DVec3 {
        match self {
            Primitive::Sphere(sphere) => sphere.normal_at(point),
            Primitive::Plane(plane) => plane.normal(),
        }
    }

    /// Texture coordinates of `point`.
    pub fn surface_coords(&self, point: Point3) -> (f64, f64) {
        match self {
            Primitive::Sphere(sphere) => sphere.surface_coords(point),
            Primitive::Plane(plane) => plane.surface_coords(point),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::Plane(plane) => plane.material(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}
