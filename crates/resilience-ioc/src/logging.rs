//! Console logger construction

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a console logger filtered at `level`
///
/// `level` is an `EnvFilter` directive such as `"debug"` or
/// `"resilience_core=trace,info"`. Returns `false` when a global subscriber
/// was already installed, in which case the existing one is kept.
pub fn init_console_logging(level: &str) -> Result<bool> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log level directive: {}", level))?;

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("global tracing subscriber already set; keeping it");
    }

    Ok(installed)
}
