//! Camera rig: pose targets, a perspective camera and the orbit control
//!
//! # Components
//!
//! - [`PoseTarget`]: Capability for anything a controller can position
//! - [`Camera`]: Perspective camera with position, rotation (quaternion) and fov
//! - [`OrbitControl`]: Spherical-coordinate rig that drives a [`PoseTarget`]
//! - [`OrbitControlConfig`]: Sensitivities and limits, loadable from RON
//! - [`WheelBinding`]: Policy mapping wheel events to zoom or field of view

use glam::{Mat4, Quat, Vec3};

mod binding;
mod config;
mod orbit;

pub use binding::{WheelAction, WheelBinding, WheelModifier};
pub use config::{ConfigError, OrbitControlConfig};
pub use orbit::{
    spherical_orientation, spherical_position, spherical_from_pose, DragState, OrbitControl,
    Spherical, POLE_EPSILON,
};

// ============================================================================
// Pose Target
// ============================================================================

/// Anything with a position and orientation that a controller can drive.
///
/// Controllers only ever write through [`PoseTarget::set_pose`], so one call
/// is one observable pose change.
///
/// Implemented by:
/// - [`Camera`] in this module
/// - scene graph nodes through their target adapter
/// - `&mut T` for any target, so a controller can borrow one temporarily
pub trait PoseTarget {
    /// Get the current position
    fn position(&self) -> Vec3;

    /// Get the current orientation as a quaternion
    fn orientation(&self) -> Quat;

    /// Replace position and orientation together
    fn set_pose(&mut self, position: Vec3, orientation: Quat);

    /// Vertical field of view in radians, for targets that have one
    fn field_of_view(&self) -> Option<f32> {
        None
    }

    /// Set the vertical field of view. Ignored by targets without one.
    fn set_field_of_view(&mut self, _vfov: f32) {}
}

impl<T: PoseTarget + ?Sized> PoseTarget for &mut T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn orientation(&self) -> Quat {
        (**self).orientation()
    }

    fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        (**self).set_pose(position, orientation);
    }

    fn field_of_view(&self) -> Option<f32> {
        (**self).field_of_view()
    }

    fn set_field_of_view(&mut self, vfov: f32) {
        (**self).set_field_of_view(vfov);
    }
}

// ============================================================================
// Camera
// ============================================================================

/// Default vertical field of view: 60 degrees
pub const DEFAULT_VFOV: f32 = 60.0 * std::f32::consts::PI / 180.0;

/// Perspective camera
///
/// # Coordinate System
///
/// Uses OpenGL convention:
/// - +X is right
/// - +Y is up
/// - -Z is forward (into the screen)
///
/// The projection matrix is kept apart from the model/view chain: it is not
/// affine and must never be multiplied into scene-graph transforms.
///
/// # Examples
///
/// ```
/// use glance_core::camera::Camera;
/// use glam::Vec3;
///
/// let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
/// assert!(camera.forward().z < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation (orientation) as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub vfov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Create a new camera with default settings at the given position
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            vfov: DEFAULT_VFOV,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Create camera with position looking at target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let cam_up = right.cross(forward);

        // In camera space: right=+X, up=+Y, forward=-Z
        let rotation_matrix = glam::Mat3::from_cols(right, cam_up, -forward);

        Self {
            rotation: Quat::from_mat3(&rotation_matrix),
            ..Self::new(position)
        }
    }

    /// Get the forward direction vector
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction vector
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction vector
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Camera-to-world transform
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// World-to-camera transform
    pub fn view(&self) -> Mat4 {
        self.model().inverse()
    }

    /// Right-handed OpenGL perspective projection
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.vfov, self.aspect, self.near, self.far)
    }
}

impl PoseTarget for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        self.rotation
    }

    fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        self.position = position;
        self.rotation = orientation;
    }

    fn field_of_view(&self) -> Option<f32> {
        Some(self.vfov)
    }

    fn set_field_of_view(&mut self, vfov: f32) {
        self.vfov = vfov;
    }
}
