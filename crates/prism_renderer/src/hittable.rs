//! HitRecord and nearest-hit search over the scene's primitives.

use prism_core::Primitive;
use prism_math::{DVec3, Interval, Ray};

/// Record of a ray-primitive intersection.
#[derive(Clone, Debug)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: DVec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: DVec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
    /// Index of the primitive in the scene
    pub index: usize,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t`.
    pub fn new(ray: &Ray, t: f64, primitive: &'a Primitive, index: usize) -> Self {
        let p = ray.at(t);
        let mut rec = Self {
            p,
            normal: DVec3::ZERO,
            t,
            front_face: false,
            primitive,
            index,
        };
        rec.set_face_normal(ray, primitive.normal_at(p));
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: DVec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Find the closest primitive hit with `t` beyond `bias`.
///
/// This is a linear scan; every primitive is tested for every ray.
pub fn hit_nearest<'a>(primitives: &'a [Primitive], ray: &Ray, bias: f64) -> Option<HitRecord<'a>> {
    let mut closest: Option<(f64, usize)> = None;

    for (index, primitive) in primitives.iter().enumerate() {
        if let Some(t) = primitive.intersect(ray, bias) {
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, index));
            }
        }
    }

    closest.map(|(t, index)| HitRecord::new(ray, t, &primitives[index], index))
}

/// True if any primitive other than `skip` blocks `ray` within `range`.
pub fn is_occluded(
    primitives: &[Primitive],
    ray: &Ray,
    range: Interval,
    skip: Option<usize>,
) -> bool {
    primitives.iter().enumerate().any(|(index, primitive)| {
        Some(index) != skip
            && primitive
                .intersect(ray, range.min)
                .is_some_and(|t| range.surrounds(t))
    })
}
