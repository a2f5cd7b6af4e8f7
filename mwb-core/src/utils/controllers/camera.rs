//! Camera tilt control.
//!
//! The tilt servo is nudged from the secondary stick's Y axis: the axis is
//! quantized into steps of a quarter, small steps are ignored, and the raw
//! servo position is kept within `0..=255`. The tilt starts locked; each press
//! of [`Button::CameraLock`] flips the lock.

use embedded_hal::pwm::SetDutyCycle;

use super::joystick::{Button, SimpleJoystick};

/// Highest raw servo position.
pub const TILT_MAX: u8 = 255;

/// Steps with a magnitude below this are ignored.
const MIN_STEP: i32 = 2;

/// Quantize a stick axis into a raw position step.
///
/// The axis is clamped to `[-1, 1]` first, so the step stays within `-4..=4`.
/// NaN quantizes to no step.
pub fn tilt_step(axis: f32) -> i32 {
    let step = libm::floorf(axis.clamp(-1.0, 1.0) * 4.0) as i32;
    if step.abs() < MIN_STEP {
        0
    } else {
        step
    }
}

/// Bounded accumulator driving the camera tilt servo.
pub struct CameraTilt<P> {
    servo: P,
    position: u8,
    locked: bool,
}

impl<P> CameraTilt<P>
where
    P: SetDutyCycle,
{
    /// Wrap `servo`, assuming it currently sits at `position`.
    pub fn new(
        servo: P,
        position: u8,
    ) -> Self {
        Self {
            servo,
            position,
            locked: true,
        }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn toggle_lock(&mut self) {
        self.locked = !self.locked;
        tracing::info!(locked = self.locked, "camera tilt lock toggled");
    }

    /// Per-cycle update from the secondary controller.
    ///
    /// Returns `true` when the servo was written.
    pub fn update(
        &mut self,
        joystick: &SimpleJoystick,
    ) -> Result<bool, P::Error> {
        if joystick.was_pressed(Button::CameraLock) {
            self.toggle_lock();
        }
        if self.locked {
            return Ok(false);
        }
        self.nudge(joystick.raw().y)
    }

    /// Move the tilt by the step `axis` quantizes to, ignoring the lock.
    pub fn nudge(
        &mut self,
        axis: f32,
    ) -> Result<bool, P::Error> {
        let step = tilt_step(axis);
        if step == 0 {
            return Ok(false);
        }
        let position = i32::from(self.position)
            .saturating_add(step)
            .clamp(0, i32::from(TILT_MAX)) as u8;
        self.write(position)?;
        self.position = position;
        tracing::debug!(step, position, "camera tilt nudged");
        Ok(true)
    }

    /// Scale a raw position onto the PWM channel's duty range.
    fn write(
        &mut self,
        position: u8,
    ) -> Result<(), P::Error> {
        let max = u32::from(self.servo.max_duty_cycle());
        let duty = u32::from(position) * max / u32::from(TILT_MAX);
        self.servo.set_duty_cycle(duty as u16)
    }

    /// Give back the servo channel.
    pub fn release(self) -> P {
        self.servo
    }
}
