use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, DeferredNow, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::AppConfig;

/// Starts file logging. The terminal owns stdout, so nothing goes to the console.
/// Keep the returned handle alive for the lifetime of the program.
pub fn init(config: &AppConfig) -> Result<LoggerHandle> {
    let settings = config.logging();

    let mut logger = Logger::try_with_str(settings.level.to_lowercase())
        .with_context(|| format!("Invalid log level: {}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir())
                .basename("harmonic-stats")
                .suppress_timestamp(),
        )
        .format_for_files(log_format)
        .append();

    if settings.rotate {
        logger = logger.rotate(
            Criterion::Size(settings.rotation_bytes()),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(settings.keep_log_files),
        );
    }

    let handle = logger.start().context("Failed to start logger")?;
    log::info!("=== harmonic-stats {} starting ===", env!("CARGO_PKG_VERSION"));
    log::info!("Log directory: {}", config.log_dir().display());
    Ok(handle)
}

pub fn log_shutdown() {
    log::info!("=== harmonic-stats shutting down ===");
}

fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("unknown"),
        record.args()
    )
}
