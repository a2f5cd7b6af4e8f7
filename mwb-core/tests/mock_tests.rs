use embedded_hal_mock::eh1::pwm::{Mock as PwmMock, Transaction as PwmTrans};
use mwb_core::utils::config::DriveConfig;
use mwb_core::utils::controllers::{
    ArbiterAction, Button, CameraTilt, DriveCommand, DriveDirection, DriveSubsystem, RawJoystick,
    SimpleJoystick, TaskState, TeleopController,
};

/// Calls observed by the recording drive subsystem, in order.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetMaxVoltage(f32),
    IssueDirection(DriveDirection),
    ContinueActiveTask,
    CheckTaskCompletion,
    IssueAutonomousTask(DriveDirection, f32),
}

/// Drive subsystem double that records every call and finishes tasks on cue.
struct RecordingDrive {
    state: TaskState<&'static str>,
    calls: Vec<Call>,
    /// Completion checks left before an active task reports finished.
    checks_until_done: Option<usize>,
}

impl RecordingDrive {
    fn new(state: TaskState<&'static str>) -> Self {
        Self {
            state,
            calls: Vec::new(),
            checks_until_done: None,
        }
    }

    fn count(
        &self,
        call: &Call,
    ) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    fn issued(&self) -> Vec<DriveDirection> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::IssueDirection(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl DriveSubsystem for RecordingDrive {
    type Task = &'static str;

    fn set_max_voltage(
        &mut self,
        volts: f32,
    ) {
        self.calls.push(Call::SetMaxVoltage(volts));
    }

    fn issue_direction(
        &mut self,
        direction: DriveDirection,
    ) {
        self.calls.push(Call::IssueDirection(direction));
        self.state = TaskState::ManualDrive;
    }

    fn continue_active_task(&mut self) {
        self.calls.push(Call::ContinueActiveTask);
    }

    fn check_task_completion(&mut self) {
        self.calls.push(Call::CheckTaskCompletion);
        if let Some(left) = self.checks_until_done.as_mut() {
            if *left == 0 {
                self.state = TaskState::TaskFinished;
                self.checks_until_done = None;
            } else {
                *left -= 1;
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
        self.calls.push(Call::IssueAutonomousTask(direction, target));
        self.state = TaskState::Active("move_to_location");
    }
}

fn joystick(raw: RawJoystick) -> SimpleJoystick {
    let mut js = SimpleJoystick::new();
    js.update(raw);
    js
}

fn stick(
    x: f32,
    y: f32,
    twist: f32,
    throttle: f32,
) -> RawJoystick {
    RawJoystick {
        x,
        y,
        twist,
        throttle,
        buttons: 0,
    }
}

#[test]
fn forward_scenario_issues_forward_at_twelve_volts() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    let js = joystick(stick(0.0, 1.0, 0.0, -1.0));

    let report = ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(report.command.direction, DriveDirection::Forward);
    assert!((report.command.voltage - 12.0).abs() < 1e-5);
    assert_eq!(
        drive.calls,
        vec![
            Call::CheckTaskCompletion,
            Call::SetMaxVoltage(report.command.voltage),
            Call::IssueDirection(DriveDirection::Forward),
        ]
    );
}

#[test]
fn twist_scenario_rotates_right() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::Stop);
    let js = joystick(stick(0.0, 0.0, 0.8, 0.0));

    let report = ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(report.command.direction, DriveDirection::RotateRight);
    assert!((report.command.voltage - 4.8).abs() < 1e-5);
    assert_eq!(drive.issued(), vec![DriveDirection::RotateRight]);
}

#[test]
fn active_task_is_fed_not_overwritten() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::Active("move_to_location"));
    let js = joystick(stick(-1.0, 0.0, 0.0, -1.0));

    let report = ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(report.action, ArbiterAction::ContinueTask);
    assert!(drive.issued().is_empty());
    assert_eq!(drive.count(&Call::ContinueActiveTask), 1);
    assert_eq!(
        drive.calls,
        vec![Call::CheckTaskCompletion, Call::ContinueActiveTask]
    );
}

#[test]
fn finished_task_hands_control_back() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::Active("move_to_location"));
    drive.checks_until_done = Some(1);
    let js = joystick(stick(0.0, -1.0, 0.0, 0.0));

    let first = ctl.teleop_periodic(&js, &mut drive);
    let second = ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(first.action, ArbiterAction::ContinueTask);
    assert_eq!(
        second.action,
        ArbiterAction::Issue(DriveCommand {
            direction: DriveDirection::Reverse,
            voltage: second.command.voltage,
        })
    );
    assert_eq!(drive.issued(), vec![DriveDirection::Reverse]);
    assert_eq!(drive.state, TaskState::ManualDrive);
}

#[test]
fn identical_input_gives_identical_commands() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    let mut js = SimpleJoystick::new();
    let raw = stick(0.4, 0.9, 0.1, 0.3);

    js.update(raw);
    let first = ctl.teleop_periodic(&js, &mut drive);
    js.update(raw);
    let second = ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(first.command, second.command);
    assert_eq!(first.action, second.action);
}

#[test]
fn freeze_toggle_suppresses_manual_commands() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    let mut js = SimpleJoystick::new();
    let forward = stick(0.0, 1.0, 0.0, -1.0);

    js.update(forward.with_held(Button::Freeze));
    assert_eq!(ctl.teleop_periodic(&js, &mut drive).action, ArbiterAction::Hold);

    // released, latch stays on
    js.update(forward);
    assert_eq!(ctl.teleop_periodic(&js, &mut drive).action, ArbiterAction::Hold);
    assert!(drive.issued().is_empty());
    assert_eq!(drive.count(&Call::CheckTaskCompletion), 2);

    // second press releases the freeze
    js.update(forward.with_held(Button::Freeze));
    let report = ctl.teleop_periodic(&js, &mut drive);
    assert!(matches!(report.action, ArbiterAction::Issue(_)));
    assert_eq!(drive.issued(), vec![DriveDirection::Forward]);
}

#[test]
fn rotate_buttons_are_held_not_latched() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    let mut js = SimpleJoystick::new();

    js.update(stick(0.0, 0.0, 0.0, 0.0).with_held(Button::RotateLeft));
    ctl.teleop_periodic(&js, &mut drive);
    js.update(stick(0.0, 0.0, 0.0, 0.0));
    ctl.teleop_periodic(&js, &mut drive);

    assert_eq!(
        drive.issued(),
        vec![DriveDirection::RotateLeft, DriveDirection::Stop]
    );
}

#[test]
fn turbo_toggle_boosts_voltage() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    let mut js = SimpleJoystick::new();
    let half = stick(0.0, 1.0, 0.0, 0.0);

    js.update(half);
    let normal = ctl.teleop_periodic(&js, &mut drive);
    js.update(half.with_held(Button::Turbo));
    let boosted = ctl.teleop_periodic(&js, &mut drive);

    assert!((normal.command.voltage - 6.0).abs() < 1e-5);
    assert!((boosted.command.voltage - 9.0).abs() < 1e-5);
}

#[test]
fn autonomous_entry_issues_one_task() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);

    ctl.autonomous_init(&mut drive);

    assert_eq!(
        drive.calls,
        vec![
            Call::SetMaxVoltage(4.0),
            Call::IssueAutonomousTask(DriveDirection::Forward, 4.0),
        ]
    );
    assert!(drive.state.is_active());
}

#[test]
fn autonomous_periodic_feeds_until_finished() {
    let mut ctl = TeleopController::new(DriveConfig::default());
    let mut drive = RecordingDrive::new(TaskState::ManualDrive);
    ctl.autonomous_init(&mut drive);
    drive.checks_until_done = Some(2);

    let actions: Vec<_> = (0..4).map(|_| ctl.autonomous_periodic(&mut drive)).collect();

    assert_eq!(
        actions,
        vec![
            ArbiterAction::ContinueTask,
            ArbiterAction::ContinueTask,
            ArbiterAction::Idle,
            ArbiterAction::Idle,
        ]
    );
    assert_eq!(drive.count(&Call::ContinueActiveTask), 2);
    assert!(drive.issued().is_empty());
}

#[test]
fn camera_tilt_stays_put_while_locked() {
    let expectations: [PwmTrans; 0] = [];
    let pwm = PwmMock::new(&expectations);
    let mut tilt = CameraTilt::new(pwm, 128);
    let js = joystick(stick(0.0, 1.0, 0.0, 0.0));

    assert!(!tilt.update(&js).unwrap());
    assert_eq!(tilt.position(), 128);
    tilt.release().done();
}

#[test]
fn camera_lock_press_unlocks_and_nudges() {
    let expectations = [
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(2119),
    ];
    let pwm = PwmMock::new(&expectations);
    let mut tilt = CameraTilt::new(pwm, 128);
    let js = joystick(stick(0.0, 1.0, 0.0, 0.0).with_held(Button::CameraLock));

    assert!(tilt.update(&js).unwrap());
    assert!(!tilt.is_locked());
    assert_eq!(tilt.position(), 132);
    tilt.release().done();
}

#[test]
fn camera_tilt_clamps_at_range_end() {
    let expectations = [
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(4095),
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(0),
    ];
    let pwm = PwmMock::new(&expectations);
    let mut tilt = CameraTilt::new(pwm, 254);

    assert!(tilt.nudge(1.0).unwrap());
    assert_eq!(tilt.position(), 255);
    assert!(!tilt.nudge(0.2).unwrap());

    let mut tilt = CameraTilt::new(tilt.release(), 3);
    assert!(tilt.nudge(-1.0).unwrap());
    assert_eq!(tilt.position(), 0);
    tilt.release().done();
}

#[test]
fn camera_tilt_handles_unbounded_axis_values() {
    let expectations = [
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(2135),
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(2071),
    ];
    let pwm = PwmMock::new(&expectations);
    let mut tilt = CameraTilt::new(pwm, 129);

    // clamped to a full deflection: one step of 4 each way
    assert!(tilt.nudge(f32::INFINITY).unwrap());
    assert_eq!(tilt.position(), 133);
    assert!(tilt.nudge(-1.0e10).unwrap());
    assert_eq!(tilt.position(), 129);
    assert!(!tilt.nudge(f32::NAN).unwrap());
    tilt.release().done();

    let expectations = [
        PwmTrans::max_duty_cycle(4095),
        PwmTrans::set_duty_cycle(4095),
    ];
    let pwm = PwmMock::new(&expectations);
    let mut tilt = CameraTilt::new(pwm, 253);
    assert!(tilt.nudge(f32::INFINITY).unwrap());
    assert_eq!(tilt.position(), 255);
    tilt.release().done();
}
