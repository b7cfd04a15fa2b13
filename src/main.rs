#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::Context;
use fieldrunner::app::{App, AppOptions};
use fieldrunner::constants::LOOP_TIME;
use fieldrunner::platform;
use fieldrunner::scheduler::Pacing;
use tracing::info;

/// The main entry point of the application.
///
/// Installs logging, opens the window and runs frames until the game stops.
/// Recognized flags: `--unthrottled` ticks on every frame scaled by elapsed time,
/// `--debug` starts with the debug overlay shown.
pub fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = AppOptions {
        pacing: if args.iter().any(|arg| arg == "--unthrottled") {
            Pacing::Unthrottled
        } else {
            Pacing::Throttled
        },
        debug: args.iter().any(|arg| arg == "--debug" || arg == "-d"),
    };

    platform::init_logging().context("Could not initialize logging")?;

    let mut app = App::new(options).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, pacing = ?options.pacing, "Starting game loop");
    while app.run() {}
    app.stop();

    info!("Game loop exited");
    Ok(())
}
