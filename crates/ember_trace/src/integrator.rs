//! Recursive path-tracing integrator.

use crate::hittable::{HitRecord, Hittable};
use crate::material::Color;
use crate::Ray;
use ember_math::Interval;
use rand::RngCore;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Constant color in every direction.
    Solid(Color),
    /// Vertical gradient blended on the normalized ray direction's y.
    SkyGradient { bottom: Color, top: Color },
}

impl Background {
    pub fn sample(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::SkyGradient { bottom, top } => {
                let unit_direction = ray.direction().normalize();
                let t = 0.5 * (unit_direction.y + 1.0);
                (1.0 - t) * bottom + t * top
            }
        }
    }
}

/// Trace a ray into the scene and return the radiance it carries.
///
/// Emission is added at every hit whether or not the surface scatters,
/// so lights stay visible to camera rays. The near bound of 1e-3 keeps
/// secondary rays from re-intersecting the surface they left.
pub fn ray_color(
    ray: &Ray,
    background: &Background,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(1e-3, f32::INFINITY), &mut rec) {
        return background.sample(ray);
    }

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);
    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, background, world, depth - 1, rng)
        }
        None => emitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{DiffuseLight, Lambertian, Metal};
    use crate::sphere::Sphere;
    use crate::HittableList;
    use ember_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_depth_zero_is_black() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);

        let color = ray_color(
            &ray,
            &Background::Solid(Color::ONE),
            &world,
            0,
            &mut rng,
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let color = ray_color(
            &ray,
            &Background::Solid(Color::new(0.1, 0.2, 0.3)),
            &world,
            10,
            &mut rng,
        );
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));

        // Gradient: straight up gives the top color, straight down the bottom
        let background = Background::SkyGradient {
            bottom: Color::ONE,
            top: Color::new(0.5, 0.7, 1.0),
        };
        let up = ray_color(
            &Ray::new(Vec3::ZERO, Vec3::Y),
            &background,
            &world,
            10,
            &mut rng,
        );
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        let down = ray_color(
            &Ray::new(Vec3::ZERO, -Vec3::Y),
            &background,
            &world,
            10,
            &mut rng,
        );
        assert!((down - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_light_emits_against_black_background() {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0))),
        )));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let color = ray_color(
            &ray,
            &Background::Solid(Color::ZERO),
            &world,
            10,
            &mut rng,
        );
        assert_eq!(color, Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        // Fuzz-free metal hit head on scatters back out, but a diffuse
        // surface under depth 1 recursion terminates at black
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.8))),
        )));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let color = ray_color(
            &ray,
            &Background::Solid(Color::ZERO),
            &world,
            1,
            &mut rng,
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_mirror_bounce_picks_up_background() {
        // Metal plate at the origin facing +Z reflects a -Z ray straight
        // back toward the solid background
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Metal::new(Color::new(0.5, 0.5, 0.5), 0.0)),
        )));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let color = ray_color(
            &ray,
            &Background::Solid(Color::ONE),
            &world,
            5,
            &mut rng,
        );
        assert!((color - Color::new(0.5, 0.5, 0.5)).length() < 1e-6);
    }
}
