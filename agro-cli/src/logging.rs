use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn make_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped.
/// - File: appended when `log_file` is given; the directory must exist.
/// - Level: INFO by default, or overridden by the RUST_LOG env var.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            let file_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));

            tracing_subscriber::registry()
                .with(make_filter())
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .context("logging already initialized")?;
        }
        None => {
            tracing_subscriber::registry()
                .with(make_filter())
                .with(stderr_layer)
                .try_init()
                .context("logging already initialized")?;
        }
    }

    Ok(())
}
