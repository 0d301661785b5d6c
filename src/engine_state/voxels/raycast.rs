//! # Block Targeting
//!
//! Finds the first solid block along a ray by marching in fixed steps and
//! sampling the cell under each step. The result also names the cell sampled
//! one step earlier, which is where a new block gets placed.
//!
//! Fixed steps can clip the corner of a block at grazing angles, and the
//! placement cell can then be diagonal to the hit rather than face-adjacent.

use cgmath::{InnerSpace, Point3, Vector3};

use super::block::block_type::BlockType;
use super::world::World;
use crate::engine_state::config::RaycastConfig;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }
}

/// The block a ray ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    pub block_type: BlockType,
    /// World coordinates of the hit block.
    pub position: Point3<i32>,
    /// Cell sampled by the step before the hit.
    pub placement: Point3<i32>,
}

fn floor_point(point: Point3<f32>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

impl World {
    /// Marches `ray` until it meets a solid block or travels `max_distance`.
    ///
    /// # Returns
    /// `None` if nothing solid lies within range or the ray has no direction.
    pub fn raycast(&self, ray: &Ray, config: &RaycastConfig) -> Option<RaycastHit> {
        if ray.direction.magnitude2() == 0.0 || config.step <= 0.0 {
            return None;
        }
        let direction = ray.direction.normalize();
        let sample = |distance: f32| floor_point(ray.origin + direction * distance);

        let steps = (config.max_distance / config.step).ceil() as usize;
        for i in 0..steps {
            let distance = i as f32 * config.step;
            if distance >= config.max_distance {
                break;
            }

            let position = sample(distance);
            let block_type = self.get_block(position.x, position.y, position.z);
            if block_type.is_solid() {
                return Some(RaycastHit {
                    block_type,
                    position,
                    placement: sample(distance - config.step),
                });
            }
        }

        None
    }
}
