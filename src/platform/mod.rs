//! Desktop platform glue: frame sleeping and log subscriber setup.

use std::time::Duration;

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GameError, GameResult};
use crate::formatter::CustomFormatter;

/// Default directive when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Sleeps out the rest of a frame. Spins while focused for accuracy, yields to the OS otherwise.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been set.
pub fn init_logging() -> GameResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().event_format(CustomFormatter))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| GameError::InvalidState(format!("Failed to set tracing subscriber: {e}")))
}
