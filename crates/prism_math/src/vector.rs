//! Vector helpers that glam does not provide in the form the tracer needs.

use crate::DVec3;
use thiserror::Error;

/// Raised when an operation is undefined for its input, such as
/// normalizing a zero-length vector.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot normalize vector {0} with zero or non-finite length")]
pub struct DomainError(pub DVec3);

/// Normalize a vector, failing on zero-length or non-finite input.
pub fn normalize(v: DVec3) -> Result<DVec3, DomainError> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Ok(v / length)
    } else {
        Err(DomainError(v))
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(incoming: DVec3, normal: DVec3) -> DVec3 {
    incoming - 2.0 * incoming.dot(normal) * normal
}

/// Refract a unit vector through a surface using Snell's law.
///
/// `normal` must face the incoming vector (`dot(incoming, normal) <= 0`) and
/// `eta_ratio` is the ratio of the refractive indices (incident / transmitted).
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(incoming: DVec3, normal: DVec3, eta_ratio: f64) -> Option<DVec3> {
    let cos_i = (-incoming.dot(normal)).min(1.0);
    let k = 1.0 - eta_ratio * eta_ratio * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta_ratio * incoming + (eta_ratio * cos_i - k.sqrt()) * normal)
}
