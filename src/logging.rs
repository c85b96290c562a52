use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Parses a log level name, falling back to `info`.
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

/// Sends log output to an append-only file; the terminal belongs to the UI.
pub fn setup_logging(log_file: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Could not open log file {}", log_file.display()))?;

    let file_log = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(file))
        .with_filter(level);

    tracing_subscriber::registry()
        .with(file_log)
        .try_init()
        .context("Logging was already initialised")?;

    Ok(())
}
