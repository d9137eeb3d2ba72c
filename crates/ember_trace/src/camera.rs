//! Camera for ray generation.

use crate::Ray;
use ember_math::sampling::random_in_unit_disk;
use ember_math::Vec3;
use rand::RngCore;

/// How viewport points become rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Rays diverge from the camera position (optionally through a lens).
    Perspective,
    /// Parallel rays from the viewport plane along the view direction.
    Orthographic,
}

/// Camera for generating rays into the scene.
///
/// Immutable once constructed: the orthonormal basis and viewport
/// geometry are derived up front, and `get_ray` maps normalized screen
/// coordinates (s, t) in [0, 1]^2 straight to world-space rays.
#[derive(Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: w looks backward, u right, v up
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `look_from`: camera position
    /// - `look_at`: point the camera faces
    /// - `vup`: world up, tilts the viewport around the view axis
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: viewport width / height
    /// - `aperture`: lens diameter; 0 disables depth of field
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through normalized screen coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner of the viewport, (1, 1) the
    /// upper-right. In perspective mode with a nonzero aperture the ray
    /// origin is jittered across the lens disk for depth of field.
    pub fn get_ray(&self, s: f32, t: f32, projection: Projection, rng: &mut dyn RngCore) -> Ray {
        let screen_point = self.lower_left_corner + s * self.horizontal + t * self.vertical;

        match projection {
            Projection::Perspective => {
                let origin = if self.lens_radius > 0.0 {
                    let rd = self.lens_radius * random_in_unit_disk(rng);
                    self.origin + self.u * rd.x + self.v * rd.y
                } else {
                    self.origin
                };
                Ray::new(origin, screen_point - origin)
            }
            Projection::Orthographic => Ray::new(screen_point, -self.w),
        }
    }
}
