//! Affine transform helpers
//!
//! Vectors, quaternions and matrices are plain `glam` types. This module adds
//! the few operations the scene graph and camera rig need on top of them:
//!
//! - [`local_model`]: Build a TRS matrix from origin, orientation and scale
//! - [`AffineExt`]: Incremental translate / rotate / scale on an existing matrix
//! - [`compose_rotation`]: Quaternion composition that renormalises
//! - [`axis_angle`]: Axis-angle rotation that rejects a zero-length axis

use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
use std::f32::consts::TAU;

/// Axis lengths below this are treated as zero
pub const AXIS_EPSILON: f32 = 1e-6;

/// Build the local model matrix of a node.
///
/// Starts from identity, writes the rotation block from `orientation`, writes
/// the translation column from `origin`, then multiplies the three axis columns
/// by `scale`. A local point is scaled, then rotated, then translated.
pub fn local_model(origin: Vec3, orientation: Quat, scale: Vec3) -> Mat4 {
    let rotation = Mat3::from_quat(orientation);
    let mut model = Mat4::IDENTITY;
    model.x_axis = rotation.x_axis.extend(0.0);
    model.y_axis = rotation.y_axis.extend(0.0);
    model.z_axis = rotation.z_axis.extend(0.0);
    model.w_axis = origin.extend(1.0);
    model.scale_local(scale);
    model
}

/// In-place edits of an affine matrix. Each one post-multiplies, so the new
/// operation applies in the matrix's local frame.
pub trait AffineExt {
    /// `self = self * T(offset)`
    fn translate_local(&mut self, offset: Vec3);

    /// `self = self * R(rotation)`
    fn rotate_local(&mut self, rotation: Quat);

    /// `self = self * S(scale)`
    fn scale_local(&mut self, scale: Vec3);

    /// Last row is `[0, 0, 0, 1]`
    fn is_affine(&self) -> bool;
}

impl AffineExt for Mat4 {
    fn translate_local(&mut self, offset: Vec3) {
        self.w_axis += self.x_axis * offset.x + self.y_axis * offset.y + self.z_axis * offset.z;
    }

    fn rotate_local(&mut self, rotation: Quat) {
        *self *= Mat4::from_quat(rotation);
    }

    fn scale_local(&mut self, scale: Vec3) {
        self.x_axis *= scale.x;
        self.y_axis *= scale.y;
        self.z_axis *= scale.z;
    }

    fn is_affine(&self) -> bool {
        self.row(3).abs_diff_eq(Vec4::W, 1e-6)
    }
}

/// Compose `delta` onto `orientation` (`delta * orientation`) and renormalise.
///
/// Every incremental rotation in the crate goes through here so repeated
/// composition cannot drift away from unit length.
pub fn compose_rotation(delta: Quat, orientation: Quat) -> Quat {
    (delta * orientation).normalize()
}

/// Rotation of `angle` radians around `axis`, or `None` if the axis has no length.
pub fn axis_angle(axis: Vec3, angle: f32) -> Option<Quat> {
    if axis.length_squared() < AXIS_EPSILON * AXIS_EPSILON {
        return None;
    }
    axis.try_normalize().map(|unit| Quat::from_axis_angle(unit, angle))
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}
