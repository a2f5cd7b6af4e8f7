//! Teleoperated locomotion core for a four-wheel mecanum drive robot on no-std platforms.
//!
//! One control cycle turns a joystick snapshot into a discrete drive command and
//! arbitrates it against whatever task the drive subsystem is already running.
//! For a runnable host, see the `mock-robot` binary in `mwb-app/`.
#![cfg_attr(not(test), no_std)]

pub mod utils;
