//! Input types for pointer and wheel handling
//!
//! This module provides the small, platform-neutral event vocabulary that the
//! camera controllers consume. Window-system adapters translate their native
//! events into these types; nothing else about the platform leaks through.

use glam::Vec2;

// ============================================================================
// Buttons and Modifiers
// ============================================================================

/// Mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys held while an event fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

// ============================================================================
// Events
// ============================================================================

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer event in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Button that changed state (`Down`/`Up`) or is held (`Move`)
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// Movement since the previous event
    pub delta: Vec2,
}

impl PointerEvent {
    pub fn down(button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            kind: PointerEventKind::Down,
            button,
            modifiers,
            delta: Vec2::ZERO,
        }
    }

    pub fn moved(button: MouseButton, modifiers: Modifiers, delta: Vec2) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button,
            modifiers,
            delta,
        }
    }

    pub fn up(button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            kind: PointerEventKind::Up,
            button,
            modifiers,
            delta: Vec2::ZERO,
        }
    }
}

/// A wheel event; positive `delta` scrolls away from the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: f32,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    pub fn new(delta: f32, modifiers: Modifiers) -> Self {
        Self { delta, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_constructors() {
        let down = PointerEvent::down(MouseButton::Left, Modifiers::SHIFT);
        assert_eq!(down.kind, PointerEventKind::Down);
        assert_eq!(down.delta, Vec2::ZERO);
        assert!(down.modifiers.shift);

        let moved = PointerEvent::moved(MouseButton::Left, Modifiers::NONE, Vec2::new(3.0, -4.0));
        assert_eq!(moved.kind, PointerEventKind::Move);
        assert_eq!(moved.delta, Vec2::new(3.0, -4.0));
    }
}
