//! Object transforms via instancing.
//!
//! Rather than baking transforms into primitives, each wrapper moves the
//! ray into object space, delegates to the wrapped object, and moves the
//! hit back out. Wrapped objects are shared handles, so one primitive
//! can appear several times under different transforms or materials.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Translates a wrapped object by a fixed displacement.
pub struct Translate {
    object: Arc<dyn Hittable>,
    displacement: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, displacement: Vec3) -> Self {
        Self {
            object,
            displacement,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Move the ray into object space instead of moving the object
        let moved = Ray::new(ray.origin() - self.displacement, ray.direction());
        if !self.object.hit(&moved, ray_t, rec) {
            return false;
        }

        rec.p += self.displacement;
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.object
            .bounding_box()
            .map(|b| b.translate(self.displacement))
    }
}

/// Rotates a wrapped object about the y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Create a rotation of `angle` degrees about the y axis.
    ///
    /// The world-space bounding box is computed once here by rotating all
    /// 8 corners of the child's box and taking their extent.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let radians = angle.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let bbox = object.bounding_box().map(|b| {
            let mut min = Vec3::splat(f32::INFINITY);
            let mut max = Vec3::splat(f32::NEG_INFINITY);

            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let x = if i == 0 { b.x.min } else { b.x.max };
                        let y = if j == 0 { b.y.min } else { b.y.max };
                        let z = if k == 0 { b.z.min } else { b.z.max };

                        let newx = cos_theta * x + sin_theta * z;
                        let newz = -sin_theta * x + cos_theta * z;

                        let corner = Vec3::new(newx, y, newz);
                        min = min.min(corner);
                        max = max.max(corner);
                    }
                }
            }

            Aabb::from_points(min, max)
        });

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    /// World -> object space rotation (by -angle).
    fn to_object(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Object -> world space rotation (by +angle).
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(self.to_object(ray.origin()), self.to_object(ray.direction()));
        if !self.object.hit(&rotated, ray_t, rec) {
            return false;
        }

        // Rotation preserves dot products, so the front-face decision the
        // child made in object space holds in world space; only the
        // vectors need rotating back
        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

/// Re-materials a wrapped object.
///
/// Delegates the geometric hit entirely and overwrites the resulting
/// material reference, so one piece of geometry can be instanced with
/// several surface appearances.
pub struct Recolor {
    object: Arc<dyn Hittable>,
    material: Arc<dyn Material>,
}

impl Recolor {
    pub fn new(object: Arc<dyn Hittable>, material: Arc<dyn Material>) -> Self {
        Self { object, material }
    }
}

impl Hittable for Recolor {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.object.hit(ray, ray_t, rec) {
            return false;
        }

        rec.material = self.material.as_ref();
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.object.bounding_box()
    }
}
