//! File logging. The terminal belongs to the UI, so events only go to a file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "POKEBROWSE_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

#[derive(thiserror::Error, Debug)]
pub enum LogInitError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("logger already installed: {0}")]
    Install(String),
}

/// Install a global subscriber appending to `path`.
pub fn init(path: &Path) -> Result<(), LogInitError> {
    let file = open_log_file(path)?;
    let filter = env_filter(std::env::var(LOG_ENV).ok().as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|err| LogInitError::Install(err.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, LogInitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.display().to_string(),
            source,
        })
}

fn env_filter(directives: Option<&str>) -> Result<EnvFilter, LogInitError> {
    let directives = directives.unwrap_or(DEFAULT_DIRECTIVES);
    EnvFilter::try_new(format!("{directives},hyper=warn,reqwest=warn"))
        .map_err(|err| LogInitError::Filter(err.to_string()))
}
