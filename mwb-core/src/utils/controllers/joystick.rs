//! Controller input tracking.
//!
//! `SimpleJoystick` wraps the raw state a controller driver reports each cycle
//! (axes plus a held-button mask) and derives the edge and latch signals the
//! drive pipeline reads through [`ControllerInput`].

use serde::{Deserialize, Serialize};

/// Named buttons, numbered as on the Logitech Extreme 3D Pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Hold to spin left at throttle voltage.
    RotateLeft,
    /// Hold to spin right at throttle voltage.
    RotateRight,
    /// Toggle to hold the current drive output.
    Freeze,
    /// Toggle to multiply drive voltage.
    Turbo,
    /// Press to lock or unlock the camera tilt (secondary stick).
    CameraLock,
}

impl Button {
    /// Hardware button number (1-based).
    pub const fn id(self) -> u8 {
        match self {
            Self::RotateLeft => 3,
            Self::RotateRight => 4,
            Self::Freeze => 7,
            Self::Turbo => 8,
            Self::CameraLock => 10,
        }
    }

    const fn mask(self) -> u16 {
        1 << (self.id() - 1)
    }
}

/// Per-cycle input collaborator for the drive pipeline.
pub trait ControllerInput {
    /// Primary stick position `(x, y)`.
    fn stick(&self) -> (f32, f32);

    /// Raw twist axis.
    fn twist(&self) -> f32;

    /// Raw throttle axis.
    fn throttle(&self) -> f32;

    /// Whether `button` is held this cycle.
    fn is_pressed(
        &self,
        button: Button,
    ) -> bool;

    /// Latched state of `button`, flipped on every press.
    fn is_toggled(
        &self,
        button: Button,
    ) -> bool;
}

/// Raw controller state as reported by the driver.
///
/// Bit `n - 1` of `buttons` is set while hardware button `n` is held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawJoystick {
    pub x: f32,
    pub y: f32,
    pub twist: f32,
    pub throttle: f32,
    pub buttons: u16,
}

impl RawJoystick {
    /// Mark `button` as held.
    pub fn with_held(
        mut self,
        button: Button,
    ) -> Self {
        self.buttons |= button.mask();
        self
    }

    pub fn held(
        &self,
        button: Button,
    ) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// Edge and latch tracker for one controller.
///
/// Call [`SimpleJoystick::update`] exactly once per cycle, before reading.
#[derive(Debug, Clone, Default)]
pub struct SimpleJoystick {
    raw: RawJoystick,
    rising: u16,
    latched: u16,
}

impl SimpleJoystick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll a new raw state, recording rising edges and flipping latches.
    pub fn update(
        &mut self,
        raw: RawJoystick,
    ) {
        self.rising = raw.buttons & !self.raw.buttons;
        self.latched ^= self.rising;
        self.raw = raw;
    }

    /// Whether `button` went down since the previous poll.
    pub fn was_pressed(
        &self,
        button: Button,
    ) -> bool {
        self.rising & button.mask() != 0
    }

    pub fn raw(&self) -> &RawJoystick {
        &self.raw
    }
}

impl ControllerInput for SimpleJoystick {
    fn stick(&self) -> (f32, f32) {
        (self.raw.x, self.raw.y)
    }

    fn twist(&self) -> f32 {
        self.raw.twist
    }

    fn throttle(&self) -> f32 {
        self.raw.throttle
    }

    fn is_pressed(
        &self,
        button: Button,
    ) -> bool {
        self.raw.held(button)
    }

    fn is_toggled(
        &self,
        button: Button,
    ) -> bool {
        self.latched & button.mask() != 0
    }
}
