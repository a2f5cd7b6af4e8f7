//! Discrete drive direction classification.
//!
//! Overrides are checked before the stick position: twist first, then the
//! rotate buttons (right before left), then the dead zone, and only then the
//! compass sector of the stick angle. The first rule that matches decides.

use serde::{Deserialize, Serialize};

use crate::utils::{
    config::DriveConfig,
    math::vector::{DriveVector, JoystickSample},
};

/// Directions the mecanum drive subsystem understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveDirection {
    #[default]
    Stop,
    Forward,
    ForwardRight,
    Right,
    BackRight,
    Reverse,
    BackLeft,
    Left,
    ForwardLeft,
    /// Spin counter-clockwise in place.
    RotateLeft,
    /// Spin clockwise in place.
    RotateRight,
}

impl DriveDirection {
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::RotateLeft | Self::RotateRight)
    }
}

/// Compass sectors as `(lower, upper, direction)`, lower bound inclusive and
/// upper bound exclusive. The wraparound sector is split into two rows.
pub const SECTORS: [(f32, f32, DriveDirection); 9] = [
    (247.5, 292.5, DriveDirection::Forward),
    (292.5, 337.5, DriveDirection::ForwardRight),
    (337.5, 360.0, DriveDirection::Right),
    (0.0, 22.5, DriveDirection::Right),
    (22.5, 67.5, DriveDirection::BackRight),
    (67.5, 112.5, DriveDirection::Reverse),
    (112.5, 157.5, DriveDirection::BackLeft),
    (157.5, 202.5, DriveDirection::Left),
    (202.5, 247.5, DriveDirection::ForwardLeft),
];

/// Look up the compass sector of `angle_deg`.
///
/// Angles outside `[0, 360)` (including NaN) fall through to `Stop`.
pub fn sector_direction(angle_deg: f32) -> DriveDirection {
    SECTORS
        .iter()
        .find(|(lower, upper, _)| angle_deg >= *lower && angle_deg < *upper)
        .map(|&(_, _, direction)| direction)
        .unwrap_or(DriveDirection::Stop)
}

type Rule = fn(&DirectionClassifier, &JoystickSample, &DriveVector) -> Option<DriveDirection>;

/// Priority-ordered classification rules.
const RULES: [Rule; 5] = [
    DirectionClassifier::twist,
    DirectionClassifier::rotate_right_button,
    DirectionClassifier::rotate_left_button,
    DirectionClassifier::dead_zone,
    DirectionClassifier::sector,
];

/// Maps an interpreted stick vector plus override buttons to a `DriveDirection`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionClassifier {
    twist_threshold: f32,
    dead_zone: f32,
}

impl DirectionClassifier {
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            twist_threshold: config.twist_threshold,
            dead_zone: config.dead_zone,
        }
    }

    /// Classify one sample. The freeze button does not affect the result.
    pub fn classify(
        &self,
        sample: &JoystickSample,
        vector: &DriveVector,
    ) -> DriveDirection {
        RULES
            .iter()
            .find_map(|rule| rule(self, sample, vector))
            .unwrap_or(DriveDirection::Stop)
    }

    fn twist(
        &self,
        _sample: &JoystickSample,
        vector: &DriveVector,
    ) -> Option<DriveDirection> {
        if vector.abs_twist <= self.twist_threshold {
            return None;
        }
        Some(if vector.twist > 0.0 {
            DriveDirection::RotateRight
        } else {
            DriveDirection::RotateLeft
        })
    }

    fn rotate_right_button(
        &self,
        sample: &JoystickSample,
        _vector: &DriveVector,
    ) -> Option<DriveDirection> {
        sample
            .buttons
            .rotate_right
            .then_some(DriveDirection::RotateRight)
    }

    fn rotate_left_button(
        &self,
        sample: &JoystickSample,
        _vector: &DriveVector,
    ) -> Option<DriveDirection> {
        sample
            .buttons
            .rotate_left
            .then_some(DriveDirection::RotateLeft)
    }

    fn dead_zone(
        &self,
        _sample: &JoystickSample,
        vector: &DriveVector,
    ) -> Option<DriveDirection> {
        (vector.magnitude < self.dead_zone).then_some(DriveDirection::Stop)
    }

    fn sector(
        &self,
        _sample: &JoystickSample,
        vector: &DriveVector,
    ) -> Option<DriveDirection> {
        Some(sector_direction(vector.angle_deg))
    }
}
