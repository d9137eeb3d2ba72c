//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes built once over a snapshot of the
//! scene and queried many times. Traversal prunes whole subtrees whose
//! box the ray misses, taking nearest-hit search from O(n) to ~O(log n).

use std::sync::Arc;

use crate::{HitRecord, Hittable, Ray};
use ember_math::{Aabb, Interval};
use thiserror::Error;

/// Leaves hold at most this many objects.
const LEAF_MAX_SIZE: usize = 2;

/// Errors that can occur while building a hierarchy.
#[derive(Error, Debug)]
pub enum BvhError {
    #[error("cannot build a BVH over an empty object list")]
    EmptyScene,

    #[error("object without a bounding box cannot be placed in the hierarchy")]
    UnboundedObject,
}

/// BVH node - either a branch with two children or a leaf with objects.
///
/// An enum keeps traversal free of null checks: every node is either a
/// populated leaf or a branch with exactly two children.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with one or two objects.
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Build a BVH from a list of hittable objects.
    ///
    /// Objects are held by shared handle, so the same primitives can stay
    /// reachable through a `HittableList` or an instancing wrapper.
    /// Fails if the list is empty or any object has no bounding box: a
    /// boxless object can never be found by box-pruned traversal.
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Result<Self, BvhError> {
        if objects.is_empty() {
            return Err(BvhError::EmptyScene);
        }

        // Pair every object with its box up front; this is also where a
        // malformed object surfaces, before any partitioning work
        let mut boxed = Vec::with_capacity(objects.len());
        for object in objects {
            let bbox = object.bounding_box().ok_or(BvhError::UnboundedObject)?;
            boxed.push((object, bbox));
        }

        let count = boxed.len();
        let root = Self::build(boxed);
        log::debug!("built BVH over {} objects", count);
        Ok(root)
    }

    /// Recursive construction over (object, box) pairs.
    ///
    /// Split axis is the longest extent of the centroid bounds; objects
    /// are partitioned by whether their centroid falls below the midpoint
    /// of that extent. A clustered input can push everything to one side,
    /// in which case we fall back to an even positional split so both
    /// subtrees always receive at least one object.
    fn build(objects: Vec<(Arc<dyn Hittable>, Aabb)>) -> Self {
        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects: objects.into_iter().map(|(o, _)| o).collect(),
                bbox: bounds,
            };
        }

        // Centroid bounds decide the split axis
        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, (_, b)| {
            let c = b.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();
        let midpoint = centroid_bounds.centroid()[axis];

        let total = objects.len();
        let (mut left_objects, mut right_objects): (Vec<_>, Vec<_>) = objects
            .into_iter()
            .partition(|(_, b)| b.centroid()[axis] < midpoint);

        // Degenerate partition: split evenly by position instead
        if left_objects.is_empty() || right_objects.is_empty() {
            let mut all: Vec<_> = left_objects.into_iter().chain(right_objects).collect();
            let right_half = all.split_off(total / 2);
            left_objects = all;
            right_objects = right_half;
        }

        BvhNode::Branch {
            left: Box::new(Self::build(left_objects)),
            right: Box::new(Self::build(right_objects)),
            bbox: bounds,
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;

                for obj in objects {
                    let interval = Interval::new(ray_t.min, closest);
                    if obj.hit(ray, interval, rec) {
                        hit_anything = true;
                        closest = rec.t;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Always test the right subtree too, but only out to the
                // closest hit found so far: a nearer right hit can still
                // override, a farther one cannot
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            BvhNode::Leaf { bbox, .. } => Some(*bbox),
            BvhNode::Branch { bbox, .. } => Some(*bbox),
        }
    }
}
