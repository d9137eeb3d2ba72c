//! Ember - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering:
//! spheres, triangle meshes and axis-aligned rects behind a BVH,
//! diffuse/metal/dielectric/emissive materials, and a bucketed
//! parallel render driver.

mod aa_rect;
mod bucket;
mod bvh;
mod camera;
mod hittable;
mod instance;
mod integrator;
mod material;
mod mesh;
mod renderer;
mod sampler;
mod sphere;
mod texture;
mod triangle;

pub use aa_rect::{XyRect, XzRect, YzRect};
pub use bucket::{generate_buckets, render, render_bucket, Bucket, DEFAULT_BUCKET_SIZE};
pub use bvh::{BvhError, BvhNode};
pub use camera::{Camera, Projection};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{Recolor, RotateY, Translate};
pub use integrator::{ray_color, Background};
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use mesh::{MeshError, TriangleMesh};
pub use renderer::{color_to_rgba, linear_to_gamma, render_pixel, ImageBuffer, RenderConfig};
pub use sampler::multi_jitter;
pub use sphere::Sphere;
pub use texture::{Checker, ImageTexture, SolidColor, Texture, TextureError};
pub use triangle::Triangle;

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Interval, Ray, Vec2, Vec3};
