//! File-based logging bootstrap.
//!
//! stdout carries the command protocol and the dialog UI owns the terminal,
//! so diagnostics go to rotating files instead.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Initialization never panics; failures come back as a message.

use std::path::{Path, PathBuf};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "leo";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const SUPPORTED_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging at `level` under `log_dir`.
///
/// Calling again with the same directory is a no-op; a different directory is rejected.
///
/// # Errors
/// - `level` is not one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
/// - The directory cannot be created or the backend fails to start.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, String> {
            std::fs::create_dir_all(log_dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", log_dir.display())
            })?;

            let logger = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::Direct)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;

            info!(
                "event=app_start level={} log_dir={} version={}",
                level,
                log_dir.display(),
                env!("CARGO_PKG_VERSION")
            );

            Ok(LoggingState { log_dir: log_dir.to_path_buf(), _logger: logger })
        })
        .map(|_| ())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .copied()
        .find(|l| *l == wanted)
        .ok_or_else(|| format!("unsupported log level `{}`", level))
}

#[cfg(test)]
mod tests {
    use super::normalize_level;

    #[test]
    fn normalize_level_accepts_any_case() {
        assert_eq!(normalize_level(" DEBUG "), Ok("debug"));
    }

    #[test]
    fn normalize_level_rejects_unknown() {
        assert!(normalize_level("verbose").is_err());
    }
}
