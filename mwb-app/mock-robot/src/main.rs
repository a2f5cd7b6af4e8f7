mod error;
mod robot;
mod script;
mod servo;
mod sim_drive;

use std::path::PathBuf;

use clap::Parser;
use embassy_executor::{Executor, Spawner};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::{Duration, Instant, Ticker};
use mwb_core::utils::config::DriveConfig;
use static_cell::StaticCell;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::robot::Robot;
use crate::script::{Script, StationFrame, load_json};
use crate::servo::LoggingServo;

/// Driver-station frames, one per control tick; `None` ends the run.
static FRAMES: Channel<CriticalSectionRawMutex, Option<StationFrame>, 4> = Channel::new();

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// JSON drive configuration; missing fields keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// JSON driver-station script; the built-in demo runs when omitted
    #[clap(long)]
    script: Option<PathBuf>,
    /// control period in milliseconds
    #[clap(long, default_value_t = 20)]
    period_ms: u64,
    /// override the script's disabled cycle count
    #[clap(long)]
    disabled_cycles: Option<u32>,
    /// override the script's autonomous cycle count
    #[clap(long)]
    auto_cycles: Option<u32>,
}

struct Setup {
    config: DriveConfig,
    script: Script,
    period: Duration,
}

impl Setup {
    fn load(opts: &Opts) -> Result<Self, AppError> {
        let config = match &opts.config {
            Some(path) => load_json::<DriveConfig>(path)?,
            None => DriveConfig::default(),
        }
        .validate()?;

        let mut script = match &opts.script {
            Some(path) => Script::load(path)?,
            None => Script::demo(),
        };
        if let Some(n) = opts.disabled_cycles {
            script.disabled_cycles = n;
        }
        if let Some(n) = opts.auto_cycles {
            script.autonomous_cycles = n;
        }

        Ok(Self {
            config,
            script,
            period: Duration::from_millis(opts.period_ms.max(1)),
        })
    }
}

#[embassy_executor::task]
async fn station_task(
    script: Script,
    period: Duration,
) {
    let mut ticker = Ticker::every(period);
    for frame in script.frames() {
        ticker.next().await;
        FRAMES.send(Some(frame)).await;
    }
    FRAMES.send(None).await;
}

#[embassy_executor::task]
async fn robot_task(
    mut robot: Robot<LoggingServo>,
    period: Duration,
) {
    while let Some(frame) = FRAMES.receive().await {
        let started = Instant::now();
        robot.step(&frame);
        let elapsed = started.elapsed();
        if elapsed > period {
            robot.note_overrun();
            warn!(
                elapsed_us = elapsed.as_micros(),
                "control cycle overran its period"
            );
        }
    }
    robot.log_summary();
    std::process::exit(0);
}

fn spawn_tasks(
    spawner: Spawner,
    setup: Setup,
) {
    let robot = Robot::new(setup.config, LoggingServo::default());
    if let Err(e) = spawner.spawn(robot_task(robot, setup.period)) {
        error!(?e, "failed to spawn robot task");
        return;
    }
    if let Err(e) = spawner.spawn(station_task(setup.script, setup.period)) {
        error!(?e, "failed to spawn driver station task");
    }
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    let setup = match Setup::load(&opts) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!(
        period_ms = setup.period.as_millis(),
        segments = setup.script.teleop.len(),
        "starting mock robot"
    );

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| spawn_tasks(spawner, setup));
}
