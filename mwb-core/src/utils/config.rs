//! Tuning constants for the teleop pipeline and the autonomous entry command.
//!
//! Every field has a default matching the competition robot, so a partial JSON
//! document (or none at all) yields a usable configuration:
//!
//! ```rust
//! use mwb_core::utils::config::DriveConfig;
//! let cfg = DriveConfig::default().validate().unwrap();
//! assert_eq!(cfg.max_voltage, 12.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::controllers::DriveDirection;

/// Reasons a `DriveConfig` is rejected by [`DriveConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The named field is NaN or infinite.
    NotFinite(&'static str),
    /// The named field lies outside its meaningful range.
    OutOfRange(&'static str),
    /// `min_voltage` is not below `max_voltage`.
    InvertedVoltageRange { min: f32, max: f32 },
}

/// One-shot task issued when the robot enters autonomous mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousConfig {
    /// Direction of the move-to-location task.
    pub direction: DriveDirection,
    /// Voltage limit applied before the task is issued (V).
    pub voltage: f32,
    /// Target handed to the drive subsystem (wheel distance units).
    pub target: f32,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            direction: DriveDirection::Forward,
            voltage: 4.0,
            target: 4.0,
        }
    }
}

/// Teleop tuning: thresholds, throttle mapping and voltage clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// `|twist|` above this rotates the robot and scales voltage by twist.
    pub twist_threshold: f32,
    /// Stick magnitudes below this are treated as neutral.
    pub dead_zone: f32,
    /// Raw throttle multiplier; `-6.0` maps the "minus" stop to 0 V.
    pub throttle_scale: f32,
    /// Raw throttle offset; `6.0` maps the "plus" stop to 12 V.
    pub throttle_offset: f32,
    /// Floor applied before turbo so motors never see a near-zero command (V).
    pub min_voltage: f32,
    /// Ceiling applied after turbo (V).
    pub max_voltage: f32,
    /// Turbo multiplier.
    pub turbo_multiplier: f32,
    /// Floor for rotations, which stall below translation voltages (V).
    pub rotation_min_voltage: f32,
    /// Voltage limit the drive subsystem starts with at power-on (V).
    pub startup_voltage: f32,
    pub autonomous: AutonomousConfig,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            twist_threshold: 0.4,
            dead_zone: 0.25,
            throttle_scale: -6.0,
            throttle_offset: 6.0,
            min_voltage: 1.0,
            max_voltage: 12.0,
            turbo_multiplier: 1.5,
            rotation_min_voltage: 2.0,
            startup_voltage: 10.0,
            autonomous: AutonomousConfig::default(),
        }
    }
}

impl DriveConfig {
    /// Check that every value is finite and the clamps are ordered.
    ///
    /// Returns the configuration unchanged so it can be chained after deserialization.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let fields = [
            ("twist_threshold", self.twist_threshold),
            ("dead_zone", self.dead_zone),
            ("throttle_scale", self.throttle_scale),
            ("throttle_offset", self.throttle_offset),
            ("min_voltage", self.min_voltage),
            ("max_voltage", self.max_voltage),
            ("turbo_multiplier", self.turbo_multiplier),
            ("rotation_min_voltage", self.rotation_min_voltage),
            ("startup_voltage", self.startup_voltage),
            ("autonomous.voltage", self.autonomous.voltage),
            ("autonomous.target", self.autonomous.target),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(name));
        }

        if !(0.0..=1.0).contains(&self.twist_threshold) {
            return Err(ConfigError::OutOfRange("twist_threshold"));
        }
        if self.dead_zone < 0.0 {
            return Err(ConfigError::OutOfRange("dead_zone"));
        }
        if self.min_voltage <= 0.0 {
            return Err(ConfigError::OutOfRange("min_voltage"));
        }
        if self.min_voltage >= self.max_voltage {
            return Err(ConfigError::InvertedVoltageRange {
                min: self.min_voltage,
                max: self.max_voltage,
            });
        }
        if self.turbo_multiplier < 1.0 {
            return Err(ConfigError::OutOfRange("turbo_multiplier"));
        }
        if self.rotation_min_voltage < self.min_voltage
            || self.rotation_min_voltage > self.max_voltage
        {
            return Err(ConfigError::OutOfRange("rotation_min_voltage"));
        }
        if self.startup_voltage <= 0.0 || self.startup_voltage > self.max_voltage {
            return Err(ConfigError::OutOfRange("startup_voltage"));
        }
        if self.autonomous.voltage <= 0.0 || self.autonomous.voltage > self.max_voltage {
            return Err(ConfigError::OutOfRange("autonomous.voltage"));
        }
        if self.autonomous.target <= 0.0 {
            return Err(ConfigError::OutOfRange("autonomous.target"));
        }

        Ok(self)
    }
}
