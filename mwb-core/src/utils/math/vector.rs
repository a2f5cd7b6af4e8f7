//! Joystick vector interpretation.
//!
//! A `JoystickSample` is captured once per control cycle and reduced to a
//! `DriveVector`: the polar angle and length of the primary stick position plus
//! the twist intensity.
//!
//! Angles follow the stick wiring rather than the math convention: 0° points
//! right and the angle grows clockwise, so full forward deflection (`y = 1`)
//! reads 270° and full reverse (`y = -1`) reads 90°.
//!
//! # Example
//! ```rust
//! use mwb_core::utils::math::vector::DriveVector;
//! let v = DriveVector::from_axes(0.0, 1.0, 0.0);
//! assert!((v.angle_deg - 270.0).abs() < 1e-4);
//! assert!((v.magnitude - 1.0).abs() < 1e-6);
//! ```

use core::f32::consts::PI;

use crate::utils::controllers::{Button, ControllerInput};

/// Button signals the drive pipeline reads each cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSignals {
    /// Rotate-left override held.
    pub rotate_left: bool,
    /// Rotate-right override held.
    pub rotate_right: bool,
    /// Turbo latched on.
    pub turbo: bool,
    /// Freeze latched on; manual commands are suppressed while set.
    pub freeze: bool,
}

impl ButtonSignals {
    /// Whether either rotate override is held.
    pub fn rotate_held(&self) -> bool {
        self.rotate_left || self.rotate_right
    }
}

/// Per-cycle snapshot of the primary controller.
///
/// Axes are taken as the driver reports them; no range validation happens here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickSample {
    pub x: f32,
    pub y: f32,
    /// Raw rotation axis.
    pub twist: f32,
    /// Raw throttle axis (`1.0` at the "minus" stop, `-1.0` at "plus").
    pub throttle: f32,
    pub buttons: ButtonSignals,
}

impl JoystickSample {
    /// Capture the current state of an input collaborator.
    pub fn capture<C: ControllerInput + ?Sized>(input: &C) -> Self {
        let (x, y) = input.stick();
        Self {
            x,
            y,
            twist: input.twist(),
            throttle: input.throttle(),
            buttons: ButtonSignals {
                rotate_left: input.is_pressed(Button::RotateLeft),
                rotate_right: input.is_pressed(Button::RotateRight),
                turbo: input.is_toggled(Button::Turbo),
                freeze: input.is_toggled(Button::Freeze),
            },
        }
    }

    /// Larger of `|x|` and `|y|`, used for positional voltage scaling.
    pub fn peak_axis(&self) -> f32 {
        libm::fmaxf(libm::fabsf(self.x), libm::fabsf(self.y))
    }

    /// Derive the drive vector of this sample.
    pub fn vector(&self) -> DriveVector {
        DriveVector::from_axes(self.x, self.y, self.twist)
    }
}

/// Polar view of a `JoystickSample`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveVector {
    /// Stick angle in `[0, 360)` degrees, 0° = right, clockwise.
    pub angle_deg: f32,
    /// Euclidean length of `(x, y)`.
    pub magnitude: f32,
    /// Signed twist, kept for the rotation sense.
    pub twist: f32,
    pub abs_twist: f32,
}

impl DriveVector {
    pub fn from_axes(
        x: f32,
        y: f32,
        twist: f32,
    ) -> Self {
        Self {
            angle_deg: stick_angle(x, y),
            magnitude: libm::sqrtf(x * x + y * y),
            twist,
            abs_twist: libm::fabsf(twist),
        }
    }
}

/// Polar angle of the stick position, normalized to `[0, 360)`.
///
/// A centered stick reads 0°; callers gate on magnitude before using the angle.
pub fn stick_angle(
    x: f32,
    y: f32,
) -> f32 {
    let mut angle = libm::atan2f(-y, x) * (180.0 / PI);
    if angle < 0.0 {
        angle += 360.0;
    }
    // -epsilon + 360.0 rounds to 360.0 in f32
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_angle(
        x: f32,
        y: f32,
        expected: f32,
    ) {
        let a = stick_angle(x, y);
        assert!(
            (a - expected).abs() < 1e-3,
            "angle of ({}, {}) = {}, expected {}",
            x,
            y,
            a,
            expected
        );
    }

    #[test]
    fn cardinal_angles_follow_stick_wiring() {
        assert_angle(1.0, 0.0, 0.0);
        assert_angle(0.0, -1.0, 90.0);
        assert_angle(-1.0, 0.0, 180.0);
        assert_angle(0.0, 1.0, 270.0);
    }

    #[test]
    fn diagonal_angles() {
        assert_angle(1.0, 1.0, 315.0);
        assert_angle(-1.0, 1.0, 225.0);
        assert_angle(-1.0, -1.0, 135.0);
        assert_angle(1.0, -1.0, 45.0);
    }

    #[test]
    fn angle_never_reaches_360() {
        let a = stick_angle(1.0, 1e-9);
        assert!((0.0..360.0).contains(&a), "angle {} out of range", a);
    }

    #[test]
    fn centered_stick_has_zero_magnitude() {
        let v = DriveVector::from_axes(0.0, 0.0, -0.2);
        assert_eq!(v.magnitude, 0.0);
        assert_eq!(v.angle_deg, 0.0);
        assert!((v.abs_twist - 0.2).abs() < 1e-6);
    }

    #[test]
    fn magnitude_is_euclidean() {
        let v = DriveVector::from_axes(0.6, -0.8, 0.0);
        assert!((v.magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn peak_axis_takes_larger_deflection() {
        let sample = JoystickSample {
            x: -0.7,
            y: 0.3,
            ..JoystickSample::default()
        };
        assert!((sample.peak_axis() - 0.7).abs() < 1e-6);
    }
}
