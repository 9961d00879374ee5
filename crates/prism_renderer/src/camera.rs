//! Pinhole camera for primary ray generation.

use prism_core::RenderSettings;
use prism_math::{DVec3, Ray};

/// Pinhole camera at the origin looking down -Z with +Y up.
#[derive(Clone, Debug)]
pub struct Camera {
    center: DVec3,
    pixel00_loc: DVec3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
}

impl Camera {
    /// Build the viewport for the given settings.
    ///
    /// `settings.fov` is the vertical field of view in degrees; the
    /// horizontal extent follows from the aspect ratio.
    pub fn new(settings: &RenderSettings) -> Self {
        let center = DVec3::ZERO;

        // Viewport sits one unit in front of the camera
        let theta = settings.fov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * settings.aspect_ratio();

        // Rows run top to bottom, so v points down
        let viewport_u = DVec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = DVec3::new(0.0, -viewport_height, 0.0);

        let pixel_delta_u = viewport_u / settings.width as f64;
        let pixel_delta_v = viewport_v / settings.height as f64;

        let viewport_upper_left = center + DVec3::NEG_Z - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Generate the ray through the center of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f64) * self.pixel_delta_u + (j as f64) * self.pixel_delta_v;

        Ray::new(self.center, (pixel_center - self.center).normalize())
    }
}
