//! Core library for Glance - math, input and camera rig shared by every crate
//!
//! This crate contains the value types and controllers that sit underneath the
//! scene graph. Nothing here talks to a GPU or a window system.
//!
//! # Modules
//!
//! - [`math`]: Affine transform helpers over glam vectors, quaternions and matrices
//! - [`input`]: Pointer, wheel and modifier-key types consumed by controllers
//! - [`camera`]: Pose targets, the perspective camera and the orbit control

pub mod camera;
pub mod input;
pub mod math;

pub use glam;
