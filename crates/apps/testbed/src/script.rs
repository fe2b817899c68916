//! Scripted input timeline
//!
//! A fixed 120-frame loop: orbit drag, zoom in, pan drag, then widen the
//! field of view with Ctrl + wheel.

use glam::Vec2;
use glance_core::input::{Modifiers, MouseButton, PointerEvent, WheelEvent};

/// Frames in one pass of the script
pub const SCRIPT_LENGTH: u64 = 120;

/// One input event fed to the orbit control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedInput {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
}

/// Events for `frame`, repeating every [`SCRIPT_LENGTH`] frames
pub fn input_for_frame(frame: u64) -> Vec<ScriptedInput> {
    use ScriptedInput::{Pointer, Wheel};

    let left = MouseButton::Left;
    match frame % SCRIPT_LENGTH {
        0 => vec![Pointer(PointerEvent::down(left, Modifiers::NONE))],
        1..=59 => vec![Pointer(PointerEvent::moved(
            left,
            Modifiers::NONE,
            Vec2::new(4.0, 1.0),
        ))],
        60 => vec![Pointer(PointerEvent::up(left, Modifiers::NONE))],
        61..=79 => vec![Wheel(WheelEvent::new(-30.0, Modifiers::NONE))],
        80 => vec![Pointer(PointerEvent::down(left, Modifiers::SHIFT))],
        81..=99 => vec![Pointer(PointerEvent::moved(
            left,
            Modifiers::SHIFT,
            Vec2::new(2.0, 0.0),
        ))],
        100 => vec![Pointer(PointerEvent::up(left, Modifiers::SHIFT))],
        _ => vec![Wheel(WheelEvent::new(10.0, Modifiers::CTRL))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_core::input::PointerEventKind;

    #[test]
    fn test_drags_are_balanced() {
        let mut held = false;
        for frame in 0..SCRIPT_LENGTH {
            for input in input_for_frame(frame) {
                if let ScriptedInput::Pointer(event) = input {
                    match event.kind {
                        PointerEventKind::Down => {
                            assert!(!held, "frame {} presses twice", frame);
                            held = true;
                        }
                        PointerEventKind::Up => {
                            assert!(held, "frame {} releases without press", frame);
                            held = false;
                        }
                        PointerEventKind::Move => assert!(held, "frame {} moves without press", frame),
                    }
                }
            }
        }
        assert!(!held);
    }

    #[test]
    fn test_script_repeats() {
        assert_eq!(input_for_frame(5), input_for_frame(5 + SCRIPT_LENGTH));
    }
}
