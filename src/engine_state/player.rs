//! # Player Controller
//!
//! Gravity and directional movement for the player's eye, colliding against
//! the voxel grid through a solidity predicate.
//!
//! Each [`PlayerController::update`] runs, in order:
//! 1. gravity on the vertical velocity (semi-implicit Euler)
//! 2. horizontal movement, committed whole or rejected whole
//! 3. vertical movement, tested one foot offset below the eye
//!
//! There is no axis-separated sliding: walking into a wall cancels all
//! horizontal motion for that tick.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::camera_state::camera::Camera;
use crate::engine_state::config::PlayerConfig;

/// Directional movement flags latched from input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Airborne,
    Grounded,
}

/// Kinematic controller for the player's eye position.
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Eye position, shared with the camera every tick
    pub position: Point3<f32>,
    /// Horizontal components are recomputed from input every tick
    pub velocity: Vector3<f32>,
    grounded: bool,
    can_jump: bool,
    config: PlayerConfig,
}

impl PlayerController {
    /// Creates an airborne controller at `position`.
    pub fn new(position: Point3<f32>, config: PlayerConfig) -> Self {
        PlayerController {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            grounded: false,
            can_jump: false,
            config,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn state(&self) -> PlayerState {
        if self.grounded {
            PlayerState::Grounded
        } else {
            PlayerState::Airborne
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Starts a jump if the controller has touched ground since the last one.
    ///
    /// # Returns
    /// Whether the jump happened
    pub fn jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.velocity.y = self.config.jump_speed;
        self.can_jump = false;
        self.grounded = false;
        true
    }

    /// Advances the controller by `dt` seconds.
    ///
    /// # Arguments
    /// * `dt` - Elapsed time in seconds
    /// * `camera` - Orientation the movement keys are relative to; pitch is ignored
    /// * `input` - Active movement flags
    /// * `is_solid` - Whether the cell containing a world position is solid
    pub fn update<F>(&mut self, dt: f32, camera: &Camera, input: MovementInput, is_solid: F)
    where
        F: Fn(f32, f32, f32) -> bool,
    {
        self.velocity.y += self.config.gravity * dt;

        let walk = horizontal_direction(camera, input) * self.config.move_speed;
        self.velocity.x = walk.x;
        self.velocity.z = walk.z;
        let step = walk * dt;
        if step.x != 0.0 || step.z != 0.0 {
            let candidate_x = self.position.x + step.x;
            let candidate_z = self.position.z + step.z;
            if !is_solid(candidate_x, self.position.y, candidate_z) {
                self.position.x = candidate_x;
                self.position.z = candidate_z;
            }
        }

        let candidate_y = self.position.y + self.velocity.y * dt;
        if !is_solid(
            self.position.x,
            candidate_y - self.config.foot_offset,
            self.position.z,
        ) {
            self.position.y = candidate_y;
            self.grounded = false;
        } else {
            if self.velocity.y <= 0.0 {
                self.grounded = true;
                self.can_jump = true;
            }
            self.velocity.y = 0.0;
        }
    }
}

/// Unit horizontal direction of the active inputs, or zero.
fn horizontal_direction(camera: &Camera, input: MovementInput) -> Vector3<f32> {
    let zero = Vector3::new(0.0, 0.0, 0.0);
    if input.is_idle() {
        return zero;
    }
    let heading = camera.heading();
    let right = camera.right();

    let mut direction = zero;
    if input.forward {
        direction += heading;
    }
    if input.backward {
        direction -= heading;
    }
    if input.right {
        direction += right;
    }
    if input.left {
        direction -= right;
    }

    if direction.magnitude2() <= f32::EPSILON {
        zero
    } else {
        direction.normalize()
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use cgmath::Deg;

    use super::*;
    use crate::engine_state::camera_state::camera::SAFE_FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn floor_at_ten(_x: f32, y: f32, _z: f32) -> bool {
        y < 10.0
    }

    fn facing_x() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0))
    }

    #[test]
    fn falls_until_grounded_on_floor() {
        let mut player = PlayerController::new(Point3::new(0.5, 20.0, 0.5), PlayerConfig::default());
        assert_eq!(player.state(), PlayerState::Airborne);

        let mut ticks = 0;
        while !player.is_grounded() {
            player.update(DT, &facing_x(), MovementInput::default(), floor_at_ten);
            ticks += 1;
            assert!(ticks < 1000, "never reached the floor");
        }

        assert_eq!(player.velocity.y, 0.0);
        assert!(player.can_jump());
        assert!(player.position.y - player.config().foot_offset >= 10.0);
    }

    #[test]
    fn wall_cancels_all_horizontal_motion() {
        let mut player = PlayerController::new(Point3::new(4.9, 20.0, 0.5), PlayerConfig::default());
        let wall = |x: f32, y: f32, _z: f32| x >= 5.0 || y < 10.0;
        let input = MovementInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        player.update(DT, &facing_x(), input, wall);
        assert_eq!(player.position.x, 4.9);
        assert_eq!(player.position.z, 0.5);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut player = PlayerController::new(Point3::new(0.0, 20.0, 0.0), PlayerConfig::default());
        let input = MovementInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        player.update(DT, &facing_x(), input, |_, _, _| false);
        let travelled = (player.position.x.powi(2) + player.position.z.powi(2)).sqrt();
        assert_relative_eq!(travelled, player.config().move_speed * DT, epsilon = 1e-5);
        assert!(player.position.x > 0.0 && player.position.z > 0.0);
    }

    #[test]
    fn opposing_input_does_not_move() {
        let mut player = PlayerController::new(Point3::new(0.0, 20.0, 0.0), PlayerConfig::default());
        let opposing = MovementInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        player.update(DT, &facing_x(), opposing, |_, _, _| false);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.position.z, 0.0);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn walks_forward_while_looking_straight_down() {
        let mut player = PlayerController::new(Point3::new(0.0, 20.0, 0.0), PlayerConfig::default());
        let mut camera = facing_x();
        camera.rotate(0.0, 10.0);
        assert_abs_diff_eq!(camera.pitch.0, -SAFE_FRAC_PI_2);

        let forward_only = MovementInput {
            forward: true,
            ..Default::default()
        };
        player.update(DT, &camera, forward_only, |_, _, _| false);
        assert_relative_eq!(player.position.x, player.config().move_speed * DT, epsilon = 1e-5);
        assert_abs_diff_eq!(player.position.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn horizontal_velocity_is_speed_not_displacement() {
        let mut player = PlayerController::new(Point3::new(0.0, 20.0, 0.0), PlayerConfig::default());
        let forward_only = MovementInput {
            forward: true,
            ..Default::default()
        };
        player.update(DT, &facing_x(), forward_only, |_, _, _| false);
        assert_relative_eq!(player.velocity.x, player.config().move_speed, epsilon = 1e-5);
        assert_relative_eq!(player.position.x, player.velocity.x * DT, epsilon = 1e-5);
    }

    #[test]
    fn jump_requires_ground_contact() {
        let mut player = PlayerController::new(Point3::new(0.5, 11.8, 0.5), PlayerConfig::default());
        assert!(!player.jump());

        player.update(DT, &facing_x(), MovementInput::default(), floor_at_ten);
        assert!(player.is_grounded());

        assert!(player.jump());
        assert_abs_diff_eq!(player.velocity.y, player.config().jump_speed);
        assert!(!player.jump());

        player.update(DT, &facing_x(), MovementInput::default(), floor_at_ten);
        assert_eq!(player.state(), PlayerState::Airborne);
        assert!(player.position.y > 11.8);
    }

    #[test]
    fn ceiling_contact_zeroes_velocity_without_grounding() {
        let mut player = PlayerController::new(Point3::new(0.5, 11.8, 0.5), PlayerConfig::default());
        player.velocity.y = 5.0;
        player.update(DT, &facing_x(), MovementInput::default(), |_, _, _| true);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.is_grounded());
    }
}
