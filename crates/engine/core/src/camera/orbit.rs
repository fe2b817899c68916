//! Orbit control
//!
//! Keeps a target on a sphere around `offset`, described by `radius`,
//! `azimuth` (around +Y, measured from +Z) and `inclination` (from +Y).
//! Every mutation recomputes the cartesian pose and pushes it to the target
//! immediately.

use super::{OrbitControlConfig, PoseTarget, WheelAction};
use crate::input::{Modifiers, MouseButton, PointerEvent, PointerEventKind};
use crate::math::wrap_angle;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Horizontal extent of the view axis below which azimuth is undefined
pub const POLE_EPSILON: f32 = 1e-6;

// ============================================================================
// Spherical Coordinates
// ============================================================================

/// A point on the orbit sphere, relative to its offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub azimuth: f32,
    pub inclination: f32,
}

impl Default for Spherical {
    /// Unit sphere, looking from +Z toward the center, level
    fn default() -> Self {
        Self {
            radius: 1.0,
            azimuth: 0.0,
            inclination: FRAC_PI_2,
        }
    }
}

/// Cartesian position of `coords` on the sphere centered at `offset`
pub fn spherical_position(offset: Vec3, coords: Spherical) -> Vec3 {
    let (sin_i, cos_i) = coords.inclination.sin_cos();
    let (sin_a, cos_a) = coords.azimuth.sin_cos();
    offset + coords.radius * Vec3::new(sin_i * sin_a, cos_i, sin_i * cos_a)
}

/// Orientation whose view axis (-Z) points from the sphere surface to its center.
///
/// Yaw by `azimuth` around world Y, then pitch by `inclination - π/2` around
/// the local X axis. Depends on the angles only, so it stays defined at radius 0.
pub fn spherical_orientation(azimuth: f32, inclination: f32) -> Quat {
    Quat::from_rotation_y(azimuth) * Quat::from_rotation_x(inclination - FRAC_PI_2)
}

/// Recover spherical coordinates from a pose.
///
/// The radius comes from the distance to `offset`; the angles come from the
/// orientation's +Z axis (the view direction reversed), so they survive a zero
/// radius. When that axis is vertical the azimuth is undefined and
/// `previous.azimuth` is kept; a degenerate orientation keeps both angles.
pub fn spherical_from_pose(
    position: Vec3,
    orientation: Quat,
    offset: Vec3,
    previous: Spherical,
) -> Spherical {
    let radius = (position - offset).length();
    let back = orientation * Vec3::Z;
    let length = back.length();
    if !(length > POLE_EPSILON) {
        tracing::warn!("Degenerate orientation {:?}, keeping previous angles", orientation);
        return Spherical {
            radius,
            ..previous
        };
    }

    let inclination = (back.y / length).clamp(-1.0, 1.0).acos();
    let horizontal = back.x.hypot(back.z);
    let azimuth = if horizontal < POLE_EPSILON * length {
        tracing::warn!(
            "View axis is vertical, keeping previous azimuth {}",
            previous.azimuth
        );
        previous.azimuth
    } else {
        wrap_angle(back.x.atan2(back.z))
    };

    Spherical {
        radius,
        azimuth,
        inclination,
    }
}

// ============================================================================
// Orbit Control
// ============================================================================

/// Pointer drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging changes azimuth and inclination
    Orbiting,
    /// Dragging moves the offset across the view plane
    Panning,
}

/// Spherical camera rig bound to one [`PoseTarget`]
///
/// Handles:
/// - Primary-button drag for orbit rotation around the offset
/// - Shift + primary drag, or middle drag, for panning the offset
/// - Ctrl for finer drags, Alt for coarser ones
/// - Wheel actions (see [`super::WheelBinding`]) for zoom or field of view
///
/// # Example
/// ```
/// use glance_core::camera::{Camera, OrbitControl, OrbitControlConfig};
/// use glam::Vec3;
///
/// let mut orbit = OrbitControl::new(Camera::default(), OrbitControlConfig::default());
/// orbit.set_radius(2.0);
/// assert!(orbit.target().position.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
/// ```
pub struct OrbitControl<T: PoseTarget> {
    target: T,
    config: OrbitControlConfig,
    offset: Vec3,
    coords: Spherical,
    drag: DragState,
    drag_button: Option<MouseButton>,
}

impl<T: PoseTarget> OrbitControl<T> {
    /// Bind a control to `target` and push the initial pose once
    pub fn new(target: T, config: OrbitControlConfig) -> Self {
        let coords = Spherical {
            radius: config.default_radius.max(0.0),
            ..Spherical::default()
        };
        let mut control = Self {
            target,
            config,
            offset: Vec3::ZERO,
            coords,
            drag: DragState::Idle,
            drag_button: None,
        };
        control.push_pose();
        control
    }

    /// Bind a control with the default configuration
    pub fn with_defaults(target: T) -> Self {
        Self::new(target, OrbitControlConfig::default())
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Release the target
    pub fn into_target(self) -> T {
        self.target
    }

    pub fn config(&self) -> &OrbitControlConfig {
        &self.config
    }

    /// Replace sensitivities; the pose is unchanged
    pub fn set_config(&mut self, config: OrbitControlConfig) {
        self.config = config;
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn radius(&self) -> f32 {
        self.coords.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.coords.azimuth
    }

    pub fn inclination(&self) -> f32 {
        self.coords.inclination
    }

    pub fn spherical(&self) -> Spherical {
        self.coords
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Position implied by the current spherical state
    pub fn position(&self) -> Vec3 {
        spherical_position(self.offset, self.coords)
    }

    /// Orientation implied by the current angles
    pub fn orientation(&self) -> Quat {
        spherical_orientation(self.coords.azimuth, self.coords.inclination)
    }

    // ------------------------------------------------------------------------
    // Programmatic mutators, one pose push each
    // ------------------------------------------------------------------------

    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
        self.push_pose();
    }

    /// Set the radius; negative values clamp to zero
    pub fn set_radius(&mut self, radius: f32) {
        self.coords.radius = radius.max(0.0);
        self.push_pose();
    }

    /// Set the azimuth as-is; it is not wrapped
    pub fn set_azimuth(&mut self, azimuth: f32) {
        self.coords.azimuth = azimuth;
        self.push_pose();
    }

    /// Set the inclination as-is
    pub fn set_inclination(&mut self, inclination: f32) {
        self.coords.inclination = inclination;
        self.push_pose();
    }

    /// Set both angles with a single pose push
    pub fn set_on_sphere(&mut self, azimuth: f32, inclination: f32) {
        self.coords.azimuth = azimuth;
        self.coords.inclination = inclination;
        self.push_pose();
    }

    /// Add to both angles with a single pose push
    pub fn orbit(&mut self, azimuth_delta: f32, inclination_delta: f32) {
        self.set_on_sphere(
            self.coords.azimuth + azimuth_delta,
            self.coords.inclination + inclination_delta,
        );
    }

    /// Move the offset across the view plane by `delta` pixels
    pub fn pan(&mut self, delta: Vec2, modifiers: Modifiers) {
        let orientation = self.orientation();
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;
        let scale =
            self.config.pan_sensitivity * self.modifier_scale(modifiers) * self.coords.radius.max(1.0);
        self.set_offset(self.offset + (right * -delta.x + up * delta.y) * scale);
    }

    /// Change the radius by `amount` wheel units
    pub fn zoom(&mut self, amount: f32) {
        let step = amount * self.config.zoom_sensitivity * self.coords.radius.max(1.0);
        self.set_radius(self.coords.radius + step);
    }

    // ------------------------------------------------------------------------
    // Inverse conversion
    // ------------------------------------------------------------------------

    /// Adopt an existing pose, keeping the offset, and push the result once
    pub fn sync_from_pose(&mut self, position: Vec3, orientation: Quat) {
        self.coords = spherical_from_pose(position, orientation, self.offset, self.coords);
        self.push_pose();
    }

    /// Adopt the target's current pose
    pub fn sync_from_target(&mut self) {
        let position = self.target.position();
        let orientation = self.target.orientation();
        self.sync_from_pose(position, orientation);
    }

    /// Move the offset to `point` and turn the target to face it from where it stands
    pub fn center_on(&mut self, point: Vec3) {
        let arm = self.target.position() - point;
        let radius = arm.length();
        let orientation = if radius > POLE_EPSILON {
            let back = arm / radius;
            let azimuth = if back.x.hypot(back.z) < POLE_EPSILON {
                tracing::warn!(
                    "Target is straight above or below {:?}, keeping previous azimuth",
                    point
                );
                self.coords.azimuth
            } else {
                back.x.atan2(back.z)
            };
            spherical_orientation(azimuth, back.y.clamp(-1.0, 1.0).acos())
        } else {
            self.orientation()
        };

        self.offset = point;
        self.sync_from_pose(point + arm, orientation);
    }

    // ------------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------------

    /// Feed a pointer event; returns whether the control consumed it
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if self.drag != DragState::Idle {
                    return false;
                }
                self.drag = match event.button {
                    MouseButton::Left if event.modifiers.shift => DragState::Panning,
                    MouseButton::Left => DragState::Orbiting,
                    MouseButton::Middle => DragState::Panning,
                    MouseButton::Right => return false,
                };
                self.drag_button = Some(event.button);
                tracing::trace!("Orbit drag started: {:?}", self.drag);
                true
            }
            PointerEventKind::Move => {
                if self.drag == DragState::Idle || self.drag_button != Some(event.button) {
                    return false;
                }
                if event.button == MouseButton::Left {
                    self.drag = if event.modifiers.shift {
                        DragState::Panning
                    } else {
                        DragState::Orbiting
                    };
                }
                match self.drag {
                    DragState::Orbiting => {
                        let scale =
                            self.config.rotate_sensitivity * self.modifier_scale(event.modifiers);
                        self.orbit(-event.delta.x * scale, -event.delta.y * scale);
                    }
                    DragState::Panning => self.pan(event.delta, event.modifiers),
                    DragState::Idle => {}
                }
                true
            }
            PointerEventKind::Up => {
                if self.drag_button != Some(event.button) {
                    return false;
                }
                self.drag = DragState::Idle;
                self.drag_button = None;
                true
            }
        }
    }

    /// Apply a wheel action produced by a [`super::WheelBinding`]
    pub fn apply_wheel(&mut self, action: WheelAction) {
        match action {
            WheelAction::Zoom(amount) => self.zoom(amount),
            WheelAction::FieldOfView(amount) => {
                let Some(vfov) = self.target.field_of_view() else {
                    tracing::trace!("Target has no field of view, ignoring wheel");
                    return;
                };
                let vfov = (vfov + amount * self.config.fov_sensitivity)
                    .clamp(self.config.min_fov, self.config.max_fov);
                self.target.set_field_of_view(vfov);
            }
        }
    }

    fn modifier_scale(&self, modifiers: Modifiers) -> f32 {
        let mut scale = 1.0;
        if modifiers.ctrl {
            scale *= self.config.fine_factor;
        }
        if modifiers.alt {
            scale /= self.config.fine_factor;
        }
        scale
    }

    fn push_pose(&mut self) {
        let position = self.position();
        let orientation = self.orientation();
        tracing::trace!(
            "Orbit pose: radius={} azimuth={} inclination={} position={:?}",
            self.coords.radius,
            self.coords.azimuth,
            self.coords.inclination,
            position
        );
        self.target.set_pose(position, orientation);
    }
}
