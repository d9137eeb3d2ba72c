//! Random sampling and scattering-direction helpers.
//!
//! Every stochastic function takes the generator as an argument; there is
//! no process-wide RNG anywhere in the workspace. Callers that need
//! determinism seed their own generator, and parallel workers each own an
//! independently seeded one.

use crate::{Vec2, Vec3};
use rand::{Rng, RngCore};

/// Generate a random f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random f32 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Generate a random vector with each component in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// Sample a random point inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random unit vector (uniform on the sphere surface).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit sphere, flipped into the hemisphere
/// oriented by `normal`.
pub fn random_in_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let in_sphere = random_in_unit_sphere(rng);
    if in_sphere.dot(normal) > 0.0 {
        in_sphere
    } else {
        -in_sphere
    }
}

/// Sample a random point in the unit disk on the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
pub fn sample_square(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}

/// True if every component of `v` is near zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    let s = 1e-8;
    v.x.abs() < s && v.y.abs() < s && v.z.abs() < s
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refraction indices across the
/// boundary. Snell's law, decomposed into components perpendicular and
/// parallel to the normal.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = random_unit_vector(&mut rng);
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_random_in_hemisphere_faces_normal() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Vec3::Y;
        for _ in 0..100 {
            let p = random_in_hemisphere(&mut rng, normal);
            assert!(p.dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_random_in_unit_disk_is_planar() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_reflect_involution() {
        // Reflecting twice about the same normal returns the original
        let v = Vec3::new(0.3, -0.7, 0.2);
        let n = Vec3::Y;
        let twice = reflect(reflect(v, n), n);
        assert!((twice - v).length() < 1e-6);
    }

    #[test]
    fn test_reflect_mirrors_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(v, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_refract_normal_incidence() {
        // At normal incidence the refracted direction is parallel to the
        // incident ray, scaled by the index ratio.
        let uv = -Vec3::Y;
        let n = Vec3::Y;
        let ratio = 0.75;
        let r = refract(uv, n, ratio);

        assert!(r.cross(uv).length() < 1e-6);
        assert!(r.dot(uv) > 0.0);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }
}
