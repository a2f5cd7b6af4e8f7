//! Drive subsystem interface.
//!
//! The mecanum drive owns its wheels, its closed-loop control and its task
//! state. The teleop core only reads the task state and issues commands
//! through [`DriveSubsystem`].

use super::direction::DriveDirection;

/// The per-cycle manual command: where to go and at what voltage limit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveCommand {
    pub direction: DriveDirection,
    /// Voltage limit (V).
    pub voltage: f32,
}

/// Task state reported by the drive subsystem.
///
/// `Active` carries the subsystem's own task payload; the core never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState<T> {
    ManualDrive,
    TaskFinished,
    Stop,
    Active(T),
}

impl<T> TaskState<T> {
    /// Whether an autonomous task is still running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn as_ref(&self) -> TaskState<&T> {
        match self {
            Self::ManualDrive => TaskState::ManualDrive,
            Self::TaskFinished => TaskState::TaskFinished,
            Self::Stop => TaskState::Stop,
            Self::Active(task) => TaskState::Active(task),
        }
    }
}

/// Abstract mecanum drive subsystem.
pub trait DriveSubsystem {
    /// Payload of an in-progress autonomous task.
    type Task;

    /// Limit the voltage applied to the wheels (V).
    fn set_max_voltage(
        &mut self,
        volts: f32,
    );

    /// Drive manually in `direction`, replacing any current task.
    fn issue_direction(
        &mut self,
        direction: DriveDirection,
    );

    /// Keep the active task running for this cycle without reissuing it.
    fn continue_active_task(&mut self);

    /// Update task completion; must run once per cycle before the state is read.
    fn check_task_completion(&mut self);

    fn current_task_state(&self) -> TaskState<&Self::Task>;

    /// Start a move-to-location task toward `target` distance units.
    fn issue_autonomous_task(
        &mut self,
        direction: DriveDirection,
        target: f32,
    );
}
