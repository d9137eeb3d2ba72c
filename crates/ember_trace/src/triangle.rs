//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Determinants smaller than this are treated as ray-parallel-to-plane.
const PARALLEL_EPSILON: f32 = 1e-5;

/// A triangle primitive with per-vertex shading normals.
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Per-vertex normals (all equal for flat shading)
    n0: Vec3,
    n1: Vec3,
    n2: Vec3,
    /// Material
    material: Arc<dyn Material>,
    /// Bounding box
    bbox: Aabb,
}

impl Triangle {
    /// Create a flat-shaded triangle from three vertices.
    ///
    /// The face normal (normalized cross product of the edges) is used at
    /// every hit point.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self::with_normals(v0, v1, v2, normal, normal, normal, material)
    }

    /// Create a triangle with explicit per-vertex normals (smooth shading).
    ///
    /// The shading normal at a hit is the barycentric interpolation of the
    /// three vertex normals.
    pub fn with_normals(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        n0: Vec3,
        n1: Vec3,
        n2: Vec3,
        material: Arc<dyn Material>,
    ) -> Self {
        let min = v0.min(v1).min(v2);
        let max = v0.max(v1).max(v2);
        // Aabb::from_points pads degenerate axes for coplanar triangles
        let bbox = Aabb::from_points(min, max);

        Self {
            v0,
            v1,
            v2,
            n0,
            n1,
            n2,
            material,
            bbox,
        }
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let q = ray.direction().cross(edge2);
        let a = edge1.dot(q);

        // Ray is parallel to the triangle plane
        if a.abs() < PARALLEL_EPSILON {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(q);

        // Intersection outside the triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let r = s.cross(edge1);
        let v = f * ray.direction().dot(r);

        // Intersection outside the triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(r);
        if !ray_t.contains(t) {
            return false;
        }

        // Interpolate the shading normal from the vertex normals
        let normal = self.n0 * (1.0 - u - v) + self.n1 * u + self.n2 * v;

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, normal);
        rec.u = u;
        rec.v = v;
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}
