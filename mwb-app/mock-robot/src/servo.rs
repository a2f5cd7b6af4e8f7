//! Camera tilt servo that logs its duty cycle instead of driving a pin.

use std::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// Duty resolution of the simulated PWM channel.
const MAX_DUTY: u16 = 4095;

#[derive(Debug, Default)]
pub struct LoggingServo;

impl ErrorType for LoggingServo {
    type Error = Infallible;
}

impl SetDutyCycle for LoggingServo {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY
    }

    fn set_duty_cycle(
        &mut self,
        duty: u16,
    ) -> Result<(), Self::Error> {
        tracing::debug!(duty, "tilt servo duty");
        Ok(())
    }
}
