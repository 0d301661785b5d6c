//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and view direction
//! - First/third person view placement
//! - View matrix calculation for renderers
//! - Projection matrix handling
//!
//! ## Key Components
//! - `Camera`: Represents the eye position and orientation in 3D space
//! - `CameraMode`: Whether the view sits at the eye or behind it
//! - `Projection`: Manages perspective projection settings
//! - `CameraUniform`: Packed data structure for GPU shaders

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Transformation matrix to convert from OpenGL's clip space to WGPU's.
///
/// cgmath produces depth in [-1, 1]; WGPU expects [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Safe limit for pitch to prevent gimbal lock
pub const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Distance the third person view sits behind the eye.
pub const THIRD_PERSON_DISTANCE: f32 = 4.0;

/// Where the rendered view is placed relative to the player's eye.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
        }
    }
}

/// Represents the player's eye in 3D space.
///
/// The eye position is owned by the player controller and copied in every
/// tick; the camera owns the orientation.
///
/// # Fields
/// - `position`: The eye position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
/// - `mode`: First or third person view placement
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The eye position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
    pub mode: CameraMode,
}

impl Camera {
    /// Creates a new first person camera with the specified position and orientation.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!(camera.forward().x > 0.99);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            mode: CameraMode::FirstPerson,
        };
        camera.clamp_pitch();
        camera
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector representing the direction the eye is facing
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Gets the horizontal direction the camera faces, ignoring pitch.
    pub fn heading(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin)
    }

    /// Gets the horizontal vector pointing to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Position the scene is viewed from.
    ///
    /// Equal to the eye in first person; in third person it sits
    /// [`THIRD_PERSON_DISTANCE`] behind the eye along the view direction.
    pub fn view_position(&self) -> Point3<f32> {
        match self.mode {
            CameraMode::FirstPerson => self.position,
            CameraMode::ThirdPerson => self.position - self.forward() * THIRD_PERSON_DISTANCE,
        }
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.view_position(), self.forward(), Vector3::unit_y())
    }

    /// Rotates the view by already scaled angle deltas.
    ///
    /// Positive `yaw_delta` turns right; positive `pitch_delta` looks down,
    /// matching screen-space mouse motion.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += Rad(yaw_delta);
        self.pitch += Rad(-pitch_delta);
        self.clamp_pitch();
    }

    fn clamp_pitch(&mut self) {
        // Clamp pitch to prevent gimbal lock
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

/// Perspective projection used to draw the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a projection for a `width` x `height` viewport.
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: Self::aspect_of(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the aspect ratio after the viewport changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::aspect_of(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Perspective matrix in WGPU clip space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    fn aspect_of(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }
}

/// Camera data as laid out in the shaders' uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath types are not Pod, so the matrix is stored as plain arrays
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    /// Combines a view matrix with the projection.
    pub fn update_view_proj(&mut self, view: Matrix4<f32>, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * view).into();
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn right_is_perpendicular_to_forward() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(37.0), Deg(20.0));
        assert_abs_diff_eq!(camera.forward().dot(camera.right()), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.right().magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn heading_stays_horizontal_at_pitch_limit() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(90.0), Deg(-90.0));
        let heading = camera.heading();
        assert_abs_diff_eq!(heading.y, 0.0);
        assert_abs_diff_eq!(heading.z, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(heading.dot(camera.right()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.rotate(0.0, 10.0);
        assert_abs_diff_eq!(camera.pitch.0, -SAFE_FRAC_PI_2);
        camera.rotate(0.0, -20.0);
        assert_abs_diff_eq!(camera.pitch.0, SAFE_FRAC_PI_2);
        assert!(camera.forward().y > 0.99);
    }

    #[test]
    fn projection_maps_near_and_far_planes_to_wgpu_depth() {
        let projection = Projection::new(800, 600, Deg(70.0), 0.1, 500.0);
        let matrix = projection.calc_matrix();
        let depth = |distance: f32| {
            let clip = matrix * Vector4::new(0.0, 0.0, -distance, 1.0);
            clip.z / clip.w
        };
        assert_abs_diff_eq!(depth(0.1), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(depth(500.0), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn projection_survives_zero_sized_viewport() {
        let mut projection = Projection::new(800, 400, Deg(70.0), 0.1, 500.0);
        assert_abs_diff_eq!(projection.aspect(), 2.0);
        projection.resize(0, 0);
        assert_abs_diff_eq!(projection.aspect(), 1.0);
    }

    #[test]
    fn uniform_puts_block_ahead_inside_clip_volume() {
        let camera = Camera::new(Point3::new(0.5, 20.0, 0.5), Deg(0.0), Deg(0.0));
        let projection = Projection::new(800, 600, Deg(70.0), 0.1, 500.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera.calc_matrix(), &projection);

        let clip = uniform.view_proj() * Vector4::new(5.5, 20.0, 0.5, 1.0);
        assert!(clip.w > 0.0);
        assert_abs_diff_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert!((0.0..1.0).contains(&(clip.z / clip.w)));

        let behind = uniform.view_proj() * Vector4::new(-5.5, 20.0, 0.5, 1.0);
        assert!(behind.w < 0.0);
    }

    #[test]
    fn third_person_view_sits_behind_eye() {
        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Deg(0.0), Deg(0.0));
        assert_eq!(camera.view_position(), camera.position);

        camera.mode = camera.mode.toggled();
        let view = camera.view_position();
        assert_abs_diff_eq!(view.x, 1.0 - THIRD_PERSON_DISTANCE, epsilon = 1e-5);
        assert_abs_diff_eq!(view.y, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(view.z, 3.0, epsilon = 1e-5);
    }
}
