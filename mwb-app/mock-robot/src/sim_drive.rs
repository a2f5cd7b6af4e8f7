//! Simulated mecanum drive subsystem.
//!
//! Stands in for the four motor controllers: it mixes each discrete direction
//! into per-wheel voltages under the current voltage limit, and runs
//! move-to-location tasks whose progress grows with every keep-alive feed.

use mwb_core::utils::controllers::{DriveDirection, DriveSubsystem, TaskState};

/// Distance units covered per volt per fed cycle.
const DISTANCE_PER_VOLT_CYCLE: f32 = 0.01;

/// Wheel voltages in front-left, front-right, back-left, back-right order.
pub type WheelVoltages = [f32; 4];

/// Unit wheel mix for a direction, before the voltage limit is applied.
///
/// Positive drives the wheel forward. Forward/strafe/yaw components are mixed
/// as `fl = f + s + r`, `fr = f - s - r`, `bl = f - s + r`, `br = f + s - r`.
pub fn wheel_mix(direction: DriveDirection) -> WheelVoltages {
    let (f, s, r): (f32, f32, f32) = match direction {
        DriveDirection::Stop => (0.0, 0.0, 0.0),
        DriveDirection::Forward => (1.0, 0.0, 0.0),
        DriveDirection::Reverse => (-1.0, 0.0, 0.0),
        DriveDirection::Right => (0.0, 1.0, 0.0),
        DriveDirection::Left => (0.0, -1.0, 0.0),
        DriveDirection::ForwardRight => (1.0, 1.0, 0.0),
        DriveDirection::ForwardLeft => (1.0, -1.0, 0.0),
        DriveDirection::BackRight => (-1.0, 1.0, 0.0),
        DriveDirection::BackLeft => (-1.0, -1.0, 0.0),
        DriveDirection::RotateRight => (0.0, 0.0, 1.0),
        DriveDirection::RotateLeft => (0.0, 0.0, -1.0),
    };
    let mix = [f + s + r, f - s - r, f - s + r, f + s - r];
    let peak = mix.iter().fold(1.0f32, |m, w| m.max(w.abs()));
    mix.map(|w| w / peak)
}

/// Move-to-location task payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTask {
    pub direction: DriveDirection,
    pub target: f32,
    pub progress: f32,
}

pub struct SimMecanumDrive {
    enabled: bool,
    max_voltage: f32,
    state: TaskState<MoveTask>,
    wheels: WheelVoltages,
}

impl SimMecanumDrive {
    pub fn new(startup_voltage: f32) -> Self {
        Self {
            enabled: false,
            max_voltage: startup_voltage,
            state: TaskState::Stop,
            wheels: [0.0; 4],
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        tracing::info!("drive enabled");
    }

    /// Disable and zero every wheel; the task state is kept.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.wheels = [0.0; 4];
        tracing::info!("drive disabled");
    }

    pub fn wheels(&self) -> WheelVoltages {
        self.wheels
    }

    pub fn max_voltage(&self) -> f32 {
        self.max_voltage
    }

    pub fn state(&self) -> &TaskState<MoveTask> {
        &self.state
    }

    fn apply(
        &mut self,
        direction: DriveDirection,
    ) {
        self.wheels = if self.enabled {
            wheel_mix(direction).map(|w| w * self.max_voltage)
        } else {
            [0.0; 4]
        };
    }
}

impl DriveSubsystem for SimMecanumDrive {
    type Task = MoveTask;

    fn set_max_voltage(
        &mut self,
        volts: f32,
    ) {
        self.max_voltage = volts;
    }

    fn issue_direction(
        &mut self,
        direction: DriveDirection,
    ) {
        if let TaskState::Active(task) = &self.state {
            tracing::warn!(?task, "manual command replaced an active task");
        }
        self.state = match direction {
            DriveDirection::Stop => TaskState::Stop,
            _ => TaskState::ManualDrive,
        };
        self.apply(direction);
    }

    fn continue_active_task(&mut self) {
        let TaskState::Active(mut task) = self.state else {
            return;
        };
        if self.enabled {
            task.progress += self.max_voltage * DISTANCE_PER_VOLT_CYCLE;
        }
        self.state = TaskState::Active(task);
        self.apply(task.direction);
    }

    fn check_task_completion(&mut self) {
        if let TaskState::Active(task) = self.state {
            if task.progress >= task.target {
                tracing::info!(?task, "drive task finished");
                self.state = TaskState::TaskFinished;
                self.wheels = [0.0; 4];
            }
        }
    }

    fn current_task_state(&self) -> TaskState<&Self::Task> {
        self.state.as_ref()
    }

    fn issue_autonomous_task(
        &mut self,
        direction: DriveDirection,
        target: f32,
    ) {
        let task = MoveTask {
            direction,
            target,
            progress: 0.0,
        };
        tracing::info!(?task, "drive task started");
        self.state = TaskState::Active(task);
        self.apply(direction);
    }
}
