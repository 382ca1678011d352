//! Terminal setup shared by every command: logging and colors.

use std::env;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Installs the stderr log subscriber. `--quiet` wins over `--debug`;
/// without either, `RUST_LOG` decides and defaults to warnings.
pub fn init_tracing(debug: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new(LevelFilter::OFF.to_string())
    } else if debug {
        EnvFilter::new(LevelFilter::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    if debug && !quiet {
        tracing::debug!("Debug mode enabled");
    }
}

/// Check if colored output should be used
pub fn use_colored_output() -> bool {
    // Standard opt-out
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }

    if env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok() {
        return false;
    }

    true
}

/// Applies `--no-color` and the environment to every `colored` string.
pub fn configure_colors(no_color: bool) {
    if no_color || !use_colored_output() {
        colored::control::set_override(false);
    }
}
