//! Voltage scaling for manual drive.
//!
//! The throttle sets the base voltage; stick deflection or twist intensity then
//! scales it down, turbo scales it up, and a set of saturating clamps keeps the
//! result inside the range the motor controllers accept. The steps run in a
//! fixed order because each clamp applies to the value the previous step left.

use crate::utils::{config::DriveConfig, controllers::DriveDirection};

use super::vector::{DriveVector, JoystickSample};

/// Maps a joystick sample to the drive subsystem's voltage limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageScaler {
    throttle_scale: f32,
    throttle_offset: f32,
    twist_threshold: f32,
    min_voltage: f32,
    max_voltage: f32,
    turbo_multiplier: f32,
    rotation_min_voltage: f32,
}

impl VoltageScaler {
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            throttle_scale: config.throttle_scale,
            throttle_offset: config.throttle_offset,
            twist_threshold: config.twist_threshold,
            min_voltage: config.min_voltage,
            max_voltage: config.max_voltage,
            turbo_multiplier: config.turbo_multiplier,
            rotation_min_voltage: config.rotation_min_voltage,
        }
    }

    /// Base voltage from the raw throttle axis: 0 V at "minus", 12 V at "plus".
    pub fn throttle_voltage(
        &self,
        throttle_raw: f32,
    ) -> f32 {
        throttle_raw * self.throttle_scale + self.throttle_offset
    }

    /// Voltage before the rotation floor, bounded by `[min_voltage, max_voltage]`.
    ///
    /// Twist above the threshold scales by twist intensity. Otherwise the larger
    /// stick deflection scales the throttle, unless a rotate override is held, in
    /// which case rotation rate follows the throttle alone.
    pub fn scale(
        &self,
        sample: &JoystickSample,
        vector: &DriveVector,
    ) -> f32 {
        let mut output = self.throttle_voltage(sample.throttle);

        if vector.abs_twist > self.twist_threshold {
            output *= vector.abs_twist;
        } else if !sample.buttons.rotate_held() {
            output *= sample.peak_axis();
        }

        output = libm::fmaxf(output, self.min_voltage);
        if sample.buttons.turbo {
            output *= self.turbo_multiplier;
        }
        libm::fminf(output, self.max_voltage)
    }

    /// Raise the voltage to the rotation floor when `direction` spins the robot.
    pub fn rotation_floor(
        &self,
        volts: f32,
        direction: DriveDirection,
    ) -> f32 {
        if direction.is_rotation() {
            libm::fmaxf(volts, self.rotation_min_voltage)
        } else {
            volts
        }
    }

    /// Final voltage limit for a sample that classified as `direction`.
    pub fn output_voltage(
        &self,
        sample: &JoystickSample,
        vector: &DriveVector,
        direction: DriveDirection,
    ) -> f32 {
        self.rotation_floor(self.scale(sample, vector), direction)
    }
}
