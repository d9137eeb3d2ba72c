//! Indexed triangle mesh with smooth per-vertex normals.
//!
//! The mesh consumes an already-decoded vertex/index buffer (file
//! parsing lives outside the core) and wraps its faces in a private BVH,
//! so a mesh behaves like any other primitive to the scene.

use std::sync::Arc;

use crate::{
    bvh::{BvhError, BvhNode},
    hittable::{HitRecord, Hittable},
    Material, Ray, Triangle,
};
use ember_math::{Aabb, Interval, Vec3};
use thiserror::Error;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    RaggedIndexBuffer(usize),

    #[error("vertex index {index} out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("mesh has no faces")]
    Empty,

    #[error("failed to build face hierarchy: {0}")]
    Bvh(#[from] BvhError),
}

/// A triangle mesh with smooth shading, accelerated by an internal BVH.
pub struct TriangleMesh {
    faces: BvhNode,
}

impl TriangleMesh {
    /// Build a mesh from vertex positions and a triangle index buffer.
    ///
    /// Vertex normals are the normalized sum of adjoining face normals,
    /// each weighted by its face's area (the unnormalized cross product
    /// already carries the area factor), so large faces dominate the
    /// shared-vertex shading.
    pub fn new(
        positions: &[Vec3],
        indices: &[u32],
        material: Arc<dyn Material>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndexBuffer(indices.len()));
        }
        if indices.is_empty() {
            return Err(MeshError::Empty);
        }
        for &index in indices {
            if index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfBounds {
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        // Accumulate area-weighted face normals into each vertex
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for face in indices.chunks_exact(3) {
            let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
            let e1 = positions[i1] - positions[i0];
            let e2 = positions[i2] - positions[i0];
            let area_normal = e1.cross(e2);

            normals[i0] += area_normal;
            normals[i1] += area_normal;
            normals[i2] += area_normal;
        }
        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        let triangles: Vec<Arc<dyn Hittable>> = indices
            .chunks_exact(3)
            .map(|face| {
                let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
                Arc::new(Triangle::with_normals(
                    positions[i0],
                    positions[i1],
                    positions[i2],
                    normals[i0],
                    normals[i1],
                    normals[i2],
                    material.clone(),
                )) as Arc<dyn Hittable>
            })
            .collect();

        let face_count = triangles.len();
        let faces = BvhNode::new(triangles)?;
        log::info!(
            "built triangle mesh: {} faces over {} vertices",
            face_count,
            positions.len()
        );

        Ok(Self { faces })
    }
}

impl Hittable for TriangleMesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.faces.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.faces.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    const T_ALL: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    /// Two triangles forming a unit quad in the z = -2 plane.
    fn quad() -> TriangleMesh {
        let positions = [
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(1.0, 1.0, -2.0),
            Vec3::new(-1.0, 1.0, -2.0),
        ];
        let indices = [0, 1, 2, 0, 2, 3];
        TriangleMesh::new(&positions, &indices, gray()).unwrap()
    }

    #[test]
    fn test_mesh_hit_delegates_to_faces() {
        let mesh = quad();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, T_ALL, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_mesh_bounding_box_covers_quad() {
        let mesh = quad();
        let bbox = mesh.bounding_box().unwrap();
        assert!(bbox.x.contains(-1.0) && bbox.x.contains(1.0));
        assert!(bbox.y.contains(-1.0) && bbox.y.contains(1.0));
        assert!(bbox.z.contains(-2.0));
    }

    #[test]
    fn test_mesh_smooth_normals_average_faces() {
        // A shallow tent: two faces folded along the y axis. The shared
        // ridge vertices get the area-weighted average of both face
        // normals, so a hit on either slope near the ridge shades with a
        // near-vertical normal.
        let positions = [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.2, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.2, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = [0, 1, 4, 0, 4, 3, 1, 2, 5, 1, 5, 4];
        let mesh = TriangleMesh::new(&positions, &indices, gray()).unwrap();

        // Straight down onto the ridge
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, T_ALL, &mut rec));
        assert!(rec.normal.y > 0.99);
    }

    #[test]
    fn test_mesh_rejects_bad_buffers() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];

        assert!(matches!(
            TriangleMesh::new(&positions, &[0, 1], gray()),
            Err(MeshError::RaggedIndexBuffer(2))
        ));
        assert!(matches!(
            TriangleMesh::new(&positions, &[], gray()),
            Err(MeshError::Empty)
        ));
        assert!(matches!(
            TriangleMesh::new(&positions, &[0, 1, 7], gray()),
            Err(MeshError::IndexOutOfBounds { index: 7, .. })
        ));
    }
}
