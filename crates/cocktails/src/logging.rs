use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain CLI commands; stdout stays clean for output.
    Stderr,
    /// Terminal UI owns the screen, so events go to a file.
    File,
}

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("cocktails.log")
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Returns the log file when logging to one.
pub fn init(cfg: &LogConfig, target: LogTarget) -> Result<Option<PathBuf>> {
    let filter = env_filter(&cfg.level);
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| Error::msg(format!("failed to init logging: {e}")))?;
            Ok(None)
        }
        LogTarget::File => {
            let path = cfg.file.clone().unwrap_or_else(default_log_file);
            let file = open_log_file(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| Error::msg(format!("failed to init logging: {e}")))?;
            Ok(Some(path))
        }
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::msg(format!("failed to open log file {}: {e}", path.display())))
}
