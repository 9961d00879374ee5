// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{normalize, reflect, refract, DomainError};

/// A point in world space.
pub type Point3 = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::splat(3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
        assert_eq!(DVec3::new(3.0, 4.0, 0.0).length(), 5.0);
    }
}
