//! Robot lifecycle host.
//!
//! Dispatches each driver-station frame to the phase hooks (init on phase
//! change, then the periodic hook) the way the field runtime would, and keeps
//! counters of what the drive arbitration did.

use core::fmt::Debug;

use embedded_hal::pwm::SetDutyCycle;
use mwb_core::utils::config::DriveConfig;
use mwb_core::utils::controllers::{ArbiterAction, CameraTilt, SimpleJoystick, TeleopController};

use crate::script::{Phase, StationFrame};
use crate::sim_drive::SimMecanumDrive;

/// Raw tilt position the camera servo starts at.
const TILT_START: u8 = 128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub cycles: u32,
    pub issued: u32,
    pub continued: u32,
    pub held: u32,
    pub idle: u32,
    pub overruns: u32,
}

impl CycleStats {
    fn record(
        &mut self,
        action: &ArbiterAction,
    ) {
        match action {
            ArbiterAction::Issue(_) => self.issued += 1,
            ArbiterAction::ContinueTask => self.continued += 1,
            ArbiterAction::Hold => self.held += 1,
            ArbiterAction::Idle => self.idle += 1,
        }
    }
}

pub struct Robot<S> {
    controller: TeleopController,
    drive: SimMecanumDrive,
    primary: SimpleJoystick,
    secondary: SimpleJoystick,
    camera: CameraTilt<S>,
    phase: Option<Phase>,
    stats: CycleStats,
}

impl<S> Robot<S>
where
    S: SetDutyCycle,
    S::Error: Debug,
{
    pub fn new(
        config: DriveConfig,
        servo: S,
    ) -> Self {
        Self {
            drive: SimMecanumDrive::new(config.startup_voltage),
            controller: TeleopController::new(config),
            primary: SimpleJoystick::new(),
            secondary: SimpleJoystick::new(),
            camera: CameraTilt::new(servo, TILT_START),
            phase: None,
            stats: CycleStats::default(),
        }
    }

    /// Run one control cycle for `frame`.
    pub fn step(
        &mut self,
        frame: &StationFrame,
    ) {
        if self.phase != Some(frame.phase) {
            self.enter(frame.phase);
        }

        match frame.phase {
            Phase::Disabled => self.poll(frame),
            Phase::Autonomous => {
                let action = self.controller.autonomous_periodic(&mut self.drive);
                self.stats.record(&action);
            }
            Phase::Teleop => self.teleop_periodic(frame),
        }
        self.stats.cycles += 1;
    }

    fn enter(
        &mut self,
        phase: Phase,
    ) {
        tracing::info!(?phase, "entering phase");
        match phase {
            Phase::Disabled => self.drive.disable(),
            Phase::Autonomous => {
                self.drive.enable();
                self.controller.autonomous_init(&mut self.drive);
            }
            Phase::Teleop => self.drive.enable(),
        }
        self.phase = Some(phase);
    }

    fn poll(
        &mut self,
        frame: &StationFrame,
    ) {
        self.primary.update(frame.primary);
        self.secondary.update(frame.secondary);
    }

    fn teleop_periodic(
        &mut self,
        frame: &StationFrame,
    ) {
        self.poll(frame);

        let report = self
            .controller
            .teleop_periodic(&self.primary, &mut self.drive);
        self.stats.record(&report.action);

        if let Err(e) = self.camera.update(&self.secondary) {
            tracing::warn!(?e, "camera tilt update failed");
        }
    }

    /// Record a cycle that took longer than the control period.
    pub fn note_overrun(&mut self) {
        self.stats.overruns += 1;
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    pub fn drive(&self) -> &SimMecanumDrive {
        &self.drive
    }

    pub fn camera(&self) -> &CameraTilt<S> {
        &self.camera
    }

    pub fn log_summary(&self) {
        let s = self.stats();
        tracing::info!(
            cycles = s.cycles,
            issued = s.issued,
            continued = s.continued,
            held = s.held,
            idle = s.idle,
            overruns = s.overruns,
            "run complete"
        );
        tracing::info!(
            state = ?self.drive().state(),
            max_voltage = self.drive().max_voltage(),
            wheels = ?self.drive().wheels(),
            tilt = self.camera().position(),
            "final drive state"
        );
    }
}
