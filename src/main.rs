use std::process::ExitCode;

use particle_bounce::prelude::*;

/// Exercise shown on startup.
const TASK: Task = Task::Collection;
/// Animation runs faster than wall-clock time.
const TIME_SCALE: f32 = 1.5;
const REPORTED_POSITION: ReportedPosition = ReportedPosition::Clamped;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Simulation::new()
        .with_task(TASK)
        .with_time_scale(TIME_SCALE)
        .with_reported_position(REPORTED_POSITION)
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
