//! Wheel binding policy
//!
//! The orbit math only exposes radius and angle mutators. Whether the wheel
//! zooms or changes the field of view is decided here, by the application.

use super::{OrbitControl, PoseTarget};
use crate::input::{Modifiers, WheelEvent};

/// What a wheel event should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    /// Change the orbit radius by this many wheel units
    Zoom(f32),
    /// Change the target's field of view by this many wheel units
    FieldOfView(f32),
}

/// Modifier key that switches the wheel from zoom to field of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelModifier {
    Shift,
    #[default]
    Ctrl,
    Alt,
}

impl WheelModifier {
    fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            WheelModifier::Shift => modifiers.shift,
            WheelModifier::Ctrl => modifiers.ctrl,
            WheelModifier::Alt => modifiers.alt,
        }
    }
}

/// Maps wheel events onto [`WheelAction`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelBinding {
    /// Held modifier that selects field of view instead of zoom
    pub fov_modifier: WheelModifier,
    /// Flip the wheel direction
    pub invert: bool,
}

impl WheelBinding {
    /// Decide what `event` does
    pub fn map(&self, event: &WheelEvent) -> WheelAction {
        let delta = if self.invert { -event.delta } else { event.delta };
        if self.fov_modifier.is_held(event.modifiers) {
            WheelAction::FieldOfView(delta)
        } else {
            WheelAction::Zoom(delta)
        }
    }

    /// Map `event` and apply it to `control`
    pub fn dispatch<T: PoseTarget>(&self, event: &WheelEvent, control: &mut OrbitControl<T>) {
        control.apply_wheel(self.map(event));
    }
}
