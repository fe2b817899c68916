//! Orbit control configuration
//!
//! Loaded from RON, every field optional:
//!
//! ```ron
//! (
//!     default_radius: 5.0,
//!     rotate_sensitivity: 0.004,
//!     fine_factor: 0.2,
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON syntax or schema error
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A value outside its allowed range
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Sensitivities and limits for [`super::OrbitControl`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControlConfig {
    /// Radius the control starts with
    pub default_radius: f32,
    /// Orbit rotation in radians per pixel of drag
    pub rotate_sensitivity: f32,
    /// Pan distance per pixel of drag, per unit of radius
    pub pan_sensitivity: f32,
    /// Radius change per wheel unit, per unit of radius
    pub zoom_sensitivity: f32,
    /// Field of view change in radians per wheel unit
    pub fov_sensitivity: f32,
    /// Drag multiplier with Ctrl held; Alt divides by it instead
    pub fine_factor: f32,
    /// Smallest field of view the wheel can reach
    pub min_fov: f32,
    /// Largest field of view the wheel can reach
    pub max_fov: f32,
}

impl Default for OrbitControlConfig {
    fn default() -> Self {
        Self {
            default_radius: 1.0,
            rotate_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 0.001,
            fov_sensitivity: 0.001,
            fine_factor: 0.1,
            min_fov: 10f32.to_radians(),
            max_fov: 120f32.to_radians(),
        }
    }
}

impl OrbitControlConfig {
    /// Parse and validate a RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source)?;
        tracing::debug!("Loaded orbit control config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("rotate_sensitivity", self.rotate_sensitivity),
            ("pan_sensitivity", self.pan_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("fov_sensitivity", self.fov_sensitivity),
            ("fine_factor", self.fine_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(self.default_radius.is_finite() && self.default_radius >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_radius must be non-negative, got {}",
                self.default_radius
            )));
        }

        if !(self.min_fov > 0.0 && self.min_fov < self.max_fov && self.max_fov < std::f32::consts::PI)
        {
            return Err(ConfigError::Invalid(format!(
                "field of view range must satisfy 0 < min_fov < max_fov < pi, got {}..{}",
                self.min_fov, self.max_fov
            )));
        }

        Ok(())
    }
}
