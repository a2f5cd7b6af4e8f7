//! Manual-versus-task arbitration.
//!
//! Once per cycle, after the drive subsystem has checked task completion, the
//! arbiter decides whether the freshly computed manual command replaces the
//! subsystem's state or the running task just gets fed another cycle.
//!
//! | task state                           | freeze off           | freeze on            |
//! |--------------------------------------|----------------------|----------------------|
//! | `ManualDrive` / `TaskFinished` / `Stop` | issue manual command | hold (issue nothing) |
//! | `Active(_)`                          | continue task        | continue task        |

use super::drive::{DriveCommand, DriveSubsystem, TaskState};

/// What the arbiter did with the drive subsystem this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArbiterAction {
    /// The manual command was issued.
    Issue(DriveCommand),
    /// The active task was fed without a new direction.
    ContinueTask,
    /// Freeze engaged; nothing was sent.
    Hold,
    /// No task to feed and no manual command to issue; nothing was sent.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Manual,
    Task,
    Frozen,
    Idle,
}

impl From<&ArbiterAction> for Mode {
    fn from(action: &ArbiterAction) -> Self {
        match action {
            ArbiterAction::Issue(_) => Mode::Manual,
            ArbiterAction::ContinueTask => Mode::Task,
            ArbiterAction::Hold => Mode::Frozen,
            ArbiterAction::Idle => Mode::Idle,
        }
    }
}

/// Decides between manual commands and an in-progress drive task.
#[derive(Debug, Clone, Default)]
pub struct TaskArbiter {
    last_mode: Option<Mode>,
}

impl TaskArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure decision for a given task state.
    pub fn decide<T>(
        state: &TaskState<T>,
        command: DriveCommand,
        frozen: bool,
    ) -> ArbiterAction {
        if state.is_active() {
            ArbiterAction::ContinueTask
        } else if frozen {
            ArbiterAction::Hold
        } else {
            ArbiterAction::Issue(command)
        }
    }

    /// Run the completion check, decide, and apply the decision to `drive`.
    pub fn arbitrate<D: DriveSubsystem>(
        &mut self,
        drive: &mut D,
        command: DriveCommand,
        frozen: bool,
    ) -> ArbiterAction {
        drive.check_task_completion();
        let action = Self::decide(&drive.current_task_state(), command, frozen);

        match action {
            ArbiterAction::Issue(cmd) => {
                drive.set_max_voltage(cmd.voltage);
                drive.issue_direction(cmd.direction);
            }
            ArbiterAction::ContinueTask => drive.continue_active_task(),
            ArbiterAction::Hold | ArbiterAction::Idle => {}
        }

        self.note_transition(&action);
        action
    }

    fn note_transition(
        &mut self,
        action: &ArbiterAction,
    ) {
        let mode = Mode::from(action);
        if self.last_mode != Some(mode) {
            match mode {
                Mode::Manual => tracing::info!("manual drive in control"),
                Mode::Task => tracing::info!("drive task active, feeding keep-alive"),
                Mode::Frozen => tracing::info!("freeze engaged, holding current output"),
                Mode::Idle => tracing::info!("no drive task left to feed"),
            }
            self.last_mode = Some(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::controllers::DriveDirection;

    const CMD: DriveCommand = DriveCommand {
        direction: DriveDirection::Left,
        voltage: 5.0,
    };

    #[test]
    fn idle_states_accept_manual_commands() {
        for state in [
            TaskState::<()>::ManualDrive,
            TaskState::TaskFinished,
            TaskState::Stop,
        ] {
            assert_eq!(
                TaskArbiter::decide(&state, CMD, false),
                ArbiterAction::Issue(CMD)
            );
        }
    }

    #[test]
    fn active_task_is_fed_even_when_frozen() {
        let state = TaskState::Active(7u8);
        assert_eq!(
            TaskArbiter::decide(&state, CMD, false),
            ArbiterAction::ContinueTask
        );
        assert_eq!(
            TaskArbiter::decide(&state, CMD, true),
            ArbiterAction::ContinueTask
        );
    }

    #[test]
    fn freeze_holds_in_every_idle_state() {
        for state in [
            TaskState::<()>::ManualDrive,
            TaskState::TaskFinished,
            TaskState::Stop,
        ] {
            assert_eq!(TaskArbiter::decide(&state, CMD, true), ArbiterAction::Hold);
        }
    }
}
