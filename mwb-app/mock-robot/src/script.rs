//! Scripted driver station.
//!
//! A script lists how long the robot stays disabled and autonomous, then a
//! sequence of teleop segments, each holding both sticks in one position for a
//! number of cycles. Example:
//!
//! ```json
//! {
//!   "disabled_cycles": 5,
//!   "autonomous_cycles": 60,
//!   "teleop": [
//!     { "cycles": 25, "primary": { "y": 1.0, "throttle": -1.0 } },
//!     { "cycles": 10, "primary": { "twist": 0.8 }, "secondary": { "held": ["camera_lock"] } }
//!   ]
//! }
//! ```

use std::path::Path;

use mwb_core::utils::controllers::{Button, RawJoystick};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::AppError;

/// Lifecycle phase the driver station selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disabled,
    Autonomous,
    Teleop,
}

/// One tick of driver-station output.
#[derive(Debug, Clone, Copy)]
pub struct StationFrame {
    pub phase: Phase,
    pub primary: RawJoystick,
    pub secondary: RawJoystick,
}

/// Stick position and held buttons as written in a script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StickInput {
    pub x: f32,
    pub y: f32,
    pub twist: f32,
    /// Raw throttle axis; `-1.0` is full throttle.
    pub throttle: f32,
    pub held: Vec<Button>,
}

impl StickInput {
    pub fn to_raw(&self) -> RawJoystick {
        let raw = RawJoystick {
            x: self.x,
            y: self.y,
            twist: self.twist,
            throttle: self.throttle,
            buttons: 0,
        };
        self.held.iter().fold(raw, |raw, &b| raw.with_held(b))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub cycles: u32,
    #[serde(default)]
    pub primary: StickInput,
    #[serde(default)]
    pub secondary: StickInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_disabled_cycles")]
    pub disabled_cycles: u32,
    #[serde(default = "default_autonomous_cycles")]
    pub autonomous_cycles: u32,
    pub teleop: Vec<Segment>,
}

fn default_disabled_cycles() -> u32 {
    5
}

fn default_autonomous_cycles() -> u32 {
    100
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        load_json::<Script>(path)?.validate()
    }

    fn validate(self) -> Result<Self, AppError> {
        if let Some(i) = self.teleop.iter().position(|s| s.cycles == 0) {
            return Err(AppError::EmptySegment(i));
        }
        Ok(self)
    }

    /// Built-in demo: drive the compass, spin, try the overrides.
    pub fn demo() -> Self {
        let stick = |x: f32, y: f32, twist: f32, held: &[Button]| StickInput {
            x,
            y,
            twist,
            throttle: -0.5,
            held: held.to_vec(),
        };
        let seg = |cycles: u32, primary: StickInput| Segment {
            cycles,
            primary,
            secondary: StickInput::default(),
        };

        Script {
            disabled_cycles: default_disabled_cycles(),
            autonomous_cycles: default_autonomous_cycles(),
            teleop: vec![
                seg(25, stick(0.0, 1.0, 0.0, &[])),
                seg(25, stick(0.7, 0.7, 0.0, &[])),
                seg(25, stick(1.0, 0.0, 0.0, &[])),
                seg(25, stick(0.0, -1.0, 0.0, &[])),
                seg(10, stick(0.0, 0.0, 0.0, &[])),
                seg(25, stick(0.0, 0.0, 0.8, &[])),
                seg(25, stick(0.0, 0.0, 0.0, &[Button::RotateLeft])),
                seg(1, stick(0.0, 1.0, 0.0, &[Button::Turbo])),
                seg(25, stick(0.0, 1.0, 0.0, &[])),
                seg(1, stick(-1.0, 0.0, 0.0, &[Button::Freeze])),
                seg(25, stick(-1.0, 0.0, 0.0, &[])),
                seg(1, stick(0.0, 0.0, 0.0, &[Button::Freeze])),
                Segment {
                    cycles: 1,
                    primary: StickInput::default(),
                    secondary: StickInput {
                        held: vec![Button::CameraLock],
                        ..StickInput::default()
                    },
                },
                Segment {
                    cycles: 20,
                    primary: StickInput::default(),
                    secondary: StickInput {
                        y: 0.75,
                        ..StickInput::default()
                    },
                },
            ],
        }
    }

    /// Expand the script into one frame per control cycle.
    pub fn frames(&self) -> impl Iterator<Item = StationFrame> + '_ {
        let idle = |phase, cycles| {
            (0..cycles).map(move |_| StationFrame {
                phase,
                primary: RawJoystick::default(),
                secondary: RawJoystick::default(),
            })
        };
        let teleop = self.teleop.iter().flat_map(|seg| {
            let frame = StationFrame {
                phase: Phase::Teleop,
                primary: seg.primary.to_raw(),
                secondary: seg.secondary.to_raw(),
            };
            (0..seg.cycles).map(move |_| frame)
        });

        idle(Phase::Disabled, self.disabled_cycles)
            .chain(idle(Phase::Autonomous, self.autonomous_cycles))
            .chain(teleop)
    }
}

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}
