//! Utility re-exports for the Mecanum-Wheel Bot.
//!
//! - `config`: tuning constants for the teleop pipeline and autonomous entry
//! - `controllers`: joystick tracking, direction classification, task arbitration
//!   and the camera tilt nudge
//! - `math`: joystick vector interpretation and voltage scaling

pub mod config;
pub mod controllers;
pub mod math;

pub use config::{ConfigError, DriveConfig};
pub use controllers::{
    Button, ControllerInput, DriveDirection, DriveSubsystem, SimpleJoystick, TaskState,
    TeleopController,
};
pub use math::vector::{DriveVector, JoystickSample};
