//! Module Exports
//!
//! This file exports the control modules of the teleop core and the
//! `TeleopController` that chains them once per cycle.
//!
//! - `joystick`: button edge/latch tracking and the input collaborator trait
//! - `direction`: priority-ordered classification into discrete directions
//! - `drive`: drive subsystem interface and task state
//! - `arbiter`: manual command versus active task arbitration
//! - `camera`: camera tilt nudge over a PWM servo channel

pub mod arbiter;
pub mod camera;
pub mod direction;
pub mod drive;
pub mod joystick;

pub use arbiter::{ArbiterAction, TaskArbiter};
pub use camera::CameraTilt;
pub use direction::{DirectionClassifier, DriveDirection};
pub use drive::{DriveCommand, DriveSubsystem, TaskState};
pub use joystick::{Button, ControllerInput, RawJoystick, SimpleJoystick};

use crate::utils::{
    config::DriveConfig,
    math::{
        vector::{DriveVector, JoystickSample},
        voltage::VoltageScaler,
    },
};

/// Everything one teleop cycle computed and did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub sample: JoystickSample,
    pub vector: DriveVector,
    pub command: DriveCommand,
    pub action: ArbiterAction,
}

/// Teleop pipeline: interpret, classify, scale, arbitrate.
pub struct TeleopController {
    config: DriveConfig,
    scaler: VoltageScaler,
    classifier: DirectionClassifier,
    arbiter: TaskArbiter,
}

impl TeleopController {
    pub fn new(config: DriveConfig) -> Self {
        Self {
            scaler: VoltageScaler::new(&config),
            classifier: DirectionClassifier::new(&config),
            arbiter: TaskArbiter::new(),
            config,
        }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Compute the manual command for a sample without touching any subsystem.
    pub fn command_for(
        &self,
        sample: &JoystickSample,
    ) -> (DriveVector, DriveCommand) {
        let vector = sample.vector();
        let direction = self.classifier.classify(sample, &vector);
        let voltage = self.scaler.output_voltage(sample, &vector, direction);
        (vector, DriveCommand { direction, voltage })
    }

    /// One teleop cycle against the given collaborators.
    pub fn teleop_periodic<C, D>(
        &mut self,
        input: &C,
        drive: &mut D,
    ) -> CycleReport
    where
        C: ControllerInput + ?Sized,
        D: DriveSubsystem,
    {
        let sample = JoystickSample::capture(input);
        let (vector, command) = self.command_for(&sample);
        let action = self
            .arbiter
            .arbitrate(drive, command, sample.buttons.freeze);

        tracing::debug!(
            angle = vector.angle_deg,
            magnitude = vector.magnitude,
            twist = vector.twist,
            ?command,
            ?action,
            "teleop cycle"
        );

        CycleReport {
            sample,
            vector,
            command,
            action,
        }
    }

    /// Issue the configured autonomous task, bypassing the classifier.
    pub fn autonomous_init<D: DriveSubsystem>(
        &mut self,
        drive: &mut D,
    ) {
        let auto = self.config.autonomous;
        drive.set_max_voltage(auto.voltage);
        drive.issue_autonomous_task(auto.direction, auto.target);
        tracing::info!(
            direction = ?auto.direction,
            voltage = auto.voltage,
            target = auto.target,
            "autonomous task issued"
        );
    }

    /// Feed the autonomous task until the drive subsystem reports it finished,
    /// then idle for the rest of the phase.
    pub fn autonomous_periodic<D: DriveSubsystem>(
        &mut self,
        drive: &mut D,
    ) -> ArbiterAction {
        drive.check_task_completion();
        if drive.current_task_state().is_active() {
            drive.continue_active_task();
            ArbiterAction::ContinueTask
        } else {
            ArbiterAction::Idle
        }
    }
}
