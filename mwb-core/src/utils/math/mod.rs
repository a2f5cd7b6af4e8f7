//! Math utilities for the Mecanum-Wheel Bot.
//!
//! This module turns raw stick axes into a polar drive vector and scales the
//! throttle into a motor voltage limit.

pub mod vector;
pub mod voltage;
