//! Axis-aligned rectangle primitives.
//!
//! One variant per coordinate plane, each at a fixed offset `k` along its
//! normal axis. Off-axis rectangles are built by wrapping these in the
//! instancing transforms.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// A rectangle in an XY plane at z = k.
pub struct XyRect {
    material: Arc<dyn Material>,
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    k: f32,
    bbox: Aabb,
}

impl XyRect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        // from_points pads the zero-width normal axis
        let bbox = Aabb::from_points(Vec3::new(x0, y0, k), Vec3::new(x1, y1, k));
        Self {
            material,
            x0,
            x1,
            y0,
            y1,
            k,
            bbox,
        }
    }
}

impl Hittable for XyRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let t = (self.k - ray.origin().z) / ray.direction().z;
        if !ray_t.contains(t) {
            return false;
        }

        let x = ray.origin().x + t * ray.direction().x;
        let y = ray.origin().y + t * ray.direction().y;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return false;
        }

        rec.u = (x - self.x0) / (self.x1 - self.x0);
        rec.v = (y - self.y0) / (self.y1 - self.y0);
        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, Vec3::Z);
        rec.material = self.material.as_ref();
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

/// A rectangle in a YZ plane at x = k.
pub struct YzRect {
    material: Arc<dyn Material>,
    y0: f32,
    y1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    bbox: Aabb,
}

impl YzRect {
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(Vec3::new(k, y0, z0), Vec3::new(k, y1, z1));
        Self {
            material,
            y0,
            y1,
            z0,
            z1,
            k,
            bbox,
        }
    }
}

impl Hittable for YzRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let t = (self.k - ray.origin().x) / ray.direction().x;
        if !ray_t.contains(t) {
            return false;
        }

        let y = ray.origin().y + t * ray.direction().y;
        let z = ray.origin().z + t * ray.direction().z;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return false;
        }

        rec.u = (y - self.y0) / (self.y1 - self.y0);
        rec.v = (z - self.z0) / (self.z1 - self.z0);
        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, Vec3::X);
        rec.material = self.material.as_ref();
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

/// A rectangle in an XZ plane at y = k (floors and ceilings).
pub struct XzRect {
    material: Arc<dyn Material>,
    x0: f32,
    x1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    bbox: Aabb,
}

impl XzRect {
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(Vec3::new(x0, k, z0), Vec3::new(x1, k, z1));
        Self {
            material,
            x0,
            x1,
            z0,
            z1,
            k,
            bbox,
        }
    }
}

impl Hittable for XzRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let t = (self.k - ray.origin().y) / ray.direction().y;
        if !ray_t.contains(t) {
            return false;
        }

        let x = ray.origin().x + t * ray.direction().x;
        let z = ray.origin().z + t * ray.direction().z;
        if x < self.x0 || x > self.x1 || z < self.z0 || z > self.z1 {
            return false;
        }

        rec.u = (x - self.x0) / (self.x1 - self.x0);
        rec.v = (z - self.z0) / (self.z1 - self.z0);
        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, Vec3::Y);
        rec.material = self.material.as_ref();
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}
