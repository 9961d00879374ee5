//! Recursive Whitted-style shading.
//!
//! For each ray:
//! - nearest-hit search over every primitive
//! - Lambertian shading from every unoccluded light
//! - one reflected or refracted secondary ray, bounded by the scene's
//!   maximum recursion depth

use std::f64::consts::PI;

use prism_core::{Color, Scene, SurfaceType};
use prism_math::{reflect, refract, Interval, Ray};

use crate::hittable::{hit_nearest, is_occluded, HitRecord};

/// Color returned for rays that leave the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Traces rays against a built scene. Holds no mutable state, so one tracer
/// can be shared by every render worker.
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Compute the color seen along `ray` at recursion level `depth`.
    ///
    /// Primary rays start at depth 0. Each secondary ray is traced at
    /// `depth + 1`, and no secondary ray is spawned once `depth` reaches the
    /// scene's maximum recursion depth.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        match hit_nearest(self.scene.primitives(), ray, self.scene.shadow_bias()) {
            Some(rec) => self.shade(ray, &rec, depth),
            None => BACKGROUND,
        }
    }

    fn shade(&self, ray: &Ray, rec: &HitRecord, depth: u32) -> Color {
        let material = rec.primitive.material();
        let base_color = material.coloration().color_at(rec.primitive, rec.p);
        let diffuse = self.shade_diffuse(rec, base_color, material.albedo());

        // At the depth limit every surface collapses to its diffuse term,
        // unblended, so a depth-0 frame matches an all-diffuse one.
        if depth >= self.scene.max_recursion_depth() {
            return diffuse;
        }

        match material.surface() {
            SurfaceType::Diffuse => diffuse,
            SurfaceType::Reflective { reflectivity } => {
                let reflected = self.trace_reflection(ray, rec, depth);
                diffuse.lerp(reflected, reflectivity)
            }
            SurfaceType::Refractive {
                index,
                transparency,
            } => {
                let transmitted = self.trace_refraction(ray, rec, index, depth);
                diffuse.lerp(transmitted, transparency)
            }
        }
    }

    /// Sum of Lambertian contributions from every light that reaches the hit.
    fn shade_diffuse(&self, rec: &HitRecord, base_color: Color, albedo: f64) -> Color {
        let bias = self.scene.shadow_bias();
        let shadow_origin = rec.p + rec.normal * bias;

        self.scene
            .lights()
            .iter()
            .filter_map(|light| light.sample(rec.p))
            .fold(Color::ZERO, |acc, sample| {
                let cos_theta = rec.normal.dot(sample.direction);
                if cos_theta <= 0.0 {
                    return acc;
                }

                let shadow_ray = Ray::new(shadow_origin, sample.direction);
                let range = Interval::new(bias, sample.max_distance);
                if is_occluded(self.scene.primitives(), &shadow_ray, range, Some(rec.index)) {
                    return acc;
                }

                let light_power = sample.intensity * cos_theta;
                acc + base_color * sample.color * light_power * albedo / PI
            })
    }

    fn trace_reflection(&self, ray: &Ray, rec: &HitRecord, depth: u32) -> Color {
        let origin = rec.p + rec.normal * self.scene.shadow_bias();
        let direction = reflect(ray.direction(), rec.normal);
        self.trace(&Ray::new(origin, direction), depth + 1)
    }

    /// Trace the transmitted ray, or the reflected one on total internal reflection.
    fn trace_refraction(&self, ray: &Ray, rec: &HitRecord, index: f64, depth: u32) -> Color {
        // Entering the surface goes from the outer medium into `index`.
        let eta_ratio = if rec.front_face { 1.0 / index } else { index };

        match refract(ray.direction(), rec.normal, eta_ratio) {
            Some(direction) => {
                let origin = rec.p - rec.normal * self.scene.shadow_bias();
                self.trace(&Ray::new(origin, direction), depth + 1)
            }
            None => self.trace_reflection(ray, rec, depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Coloration, Material, RenderSettings};
    use prism_math::DVec3;
    use std::sync::Arc;

    fn material(color: Color, surface: SurfaceType, albedo: f64) -> Material {
        Material::new(
            Arc::new(Coloration::solid(color.x, color.y, color.z).unwrap()),
            Arc::new(surface),
            albedo,
        )
        .unwrap()
    }

    fn scene(depth: u32) -> Scene {
        Scene::new(RenderSettings {
            width: 8,
            height: 8,
            fov: 90.0,
            shadow_bias: 1e-9,
            max_recursion_depth: depth,
        })
        .unwrap()
    }

    fn close(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < 1e-9
    }

    #[test]
    fn test_miss_is_background() {
        let scene = scene(3);
        let color = Tracer::new(&scene).trace(&Ray::default(), 0);
        assert_eq!(color, BACKGROUND);
    }

    #[test]
    fn test_head_on_diffuse_value() {
        let mut scene = scene(3);
        scene
            .add_sphere(
                DVec3::new(0.0, 0.0, -5.0),
                1.0,
                material(Color::new(1.0, 0.5, 0.25), SurfaceType::Diffuse, 0.5),
            )
            .unwrap();
        scene
            .add_directional_light(DVec3::NEG_Z, Color::ONE, 2.0)
            .unwrap();

        let color = Tracer::new(&scene).trace(&Ray::default(), 0);
        let expected = Color::new(1.0, 0.5, 0.25) * 2.0 * 0.5 / PI;
        assert!(close(color, expected), "{} != {}", color, expected);
    }

    #[test]
    fn test_no_lights_is_black() {
        let mut scene = scene(3);
        scene
            .add_sphere(
                DVec3::new(0.0, 0.0, -5.0),
                1.0,
                material(Color::ONE, SurfaceType::Diffuse, 1.0),
            )
            .unwrap();

        let color = Tracer::new(&scene).trace(&Ray::default(), 0);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let mut scene = scene(3);
        scene
            .add_sphere(
                DVec3::new(0.0, 0.0, -5.0),
                1.0,
                material(Color::ONE, SurfaceType::Diffuse, 1.0),
            )
            .unwrap();
        // Shining toward the camera, onto the far side of the sphere.
        scene
            .add_directional_light(DVec3::Z, Color::ONE, 1.0)
            .unwrap();

        assert_eq!(Tracer::new(&scene).trace(&Ray::default(), 0), Color::ZERO);
    }

    #[test]
    fn test_point_light_falloff() {
        let mut scene = scene(0);
        scene
            .add_plane(
                DVec3::new(0.0, 0.0, -4.0),
                DVec3::Z,
                material(Color::ONE, SurfaceType::Diffuse, 1.0),
            )
            .unwrap();
        scene
            .add_spherical_light(DVec3::new(0.0, 0.0, -2.0), Color::ONE, 100.0)
            .unwrap();

        let color = Tracer::new(&scene).trace(&Ray::default(), 0);
        let expected = 100.0 / (4.0 * PI * 4.0) / PI;
        assert!(close(color, Color::splat(expected)));
    }

    #[test]
    fn test_mirror_sees_lit_sphere() {
        let mut scene = scene(2);
        // Mirror floor facing up, viewed at 45 degrees.
        scene
            .add_plane(
                DVec3::new(0.0, -1.0, 0.0),
                DVec3::Y,
                material(Color::ZERO, SurfaceType::reflective(1.0).unwrap(), 0.0),
            )
            .unwrap();
        // Diffuse sphere where the reflected ray lands.
        scene
            .add_sphere(
                DVec3::new(0.0, 0.0, -2.0),
                0.5,
                material(Color::ONE, SurfaceType::Diffuse, 1.0),
            )
            .unwrap();
        scene
            .add_directional_light(DVec3::NEG_Z, Color::ONE, 1.0)
            .unwrap();

        let tracer = Tracer::new(&scene);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, -1.0, -1.0).normalize());
        let through_mirror = tracer.trace(&ray, 0);
        assert!(through_mirror.max_element() > 0.0);

        // At the depth limit the mirror shows only its own (black) diffuse term.
        assert_eq!(tracer.trace(&ray, 2), Color::ZERO);
    }

    #[test]
    fn test_full_mirror_at_depth_limit_keeps_diffuse() {
        let mut scene = scene(1);
        scene
            .add_sphere(
                DVec3::new(0.0, 0.0, -5.0),
                1.0,
                material(Color::ONE, SurfaceType::reflective(1.0).unwrap(), 1.0),
            )
            .unwrap();
        scene
            .add_directional_light(DVec3::NEG_Z, Color::ONE, 1.0)
            .unwrap();

        let tracer = Tracer::new(&scene);
        let ray = Ray::default();

        // Below the limit the bounce heads back out to the background.
        assert_eq!(tracer.trace(&ray, 0), BACKGROUND);

        // At the limit no bounce is traced and the diffuse term is not blended away.
        let at_limit = tracer.trace(&ray, 1);
        assert!(close(at_limit, Color::splat(1.0 / PI)), "{}", at_limit);
        assert_ne!(at_limit, BACKGROUND);
    }

    #[test]
    fn test_total_internal_reflection_falls_back_to_reflection() {
        let angle = 70f64.to_radians();
        let hit = DVec3::new(2.0, 0.0, 0.0);
        let incoming = DVec3::new(angle.sin(), angle.cos(), 0.0);
        let mirrored = DVec3::new(angle.sin(), -angle.cos(), 0.0);

        let mut scene = scene(4);
        // Underside of a glass surface, reached from inside the medium.
        scene
            .add_plane(
                DVec3::ZERO,
                DVec3::Y,
                material(Color::ZERO, SurfaceType::refractive(1.5, 1.0).unwrap(), 0.0),
            )
            .unwrap();
        // A lit sphere sitting on the internally reflected path.
        scene
            .add_sphere(
                hit + mirrored * 3.0,
                1.0,
                material(Color::ONE, SurfaceType::Diffuse, 1.0),
            )
            .unwrap();
        scene
            .add_directional_light(DVec3::X, Color::ONE, 1.0)
            .unwrap();

        let ray = Ray::new(hit - incoming * 4.0, incoming);
        assert!(refract(ray.direction(), DVec3::NEG_Y, 1.5).is_none());

        let color = Tracer::new(&scene).trace(&ray, 0);
        assert!(color.max_element() > 0.0);
    }
}
