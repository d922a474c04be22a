//! Tracing configuration and log routing.
//!
//! Events go to stdout through a compact formatter and are mirrored into an append-only log
//! file (`STUDENTS_LOG_FILE`, or `logs/students.log` when unset) through a non‑blocking writer.
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "STUDENTS_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "logs/students.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber: `RUST_LOG` filtering (default `info`), stdout, and the file sink.
///
/// When the log file cannot be opened the error is reported on stderr and only stdout is used.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let file_layer = file_writer().map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

fn file_writer() -> Option<NonBlocking> {
    let path = log_file_path(std::env::var(LOG_FILE_ENV).ok());
    match open_append(&path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}

/// Resolve the log file location from the optional override.
fn log_file_path(override_path: Option<String>) -> PathBuf {
    override_path
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
