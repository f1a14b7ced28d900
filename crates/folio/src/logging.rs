//! Log file setup.
//!
//! The interactive shell owns the terminal, so events go to a file and
//! only when one is configured.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format};

use crate::config::FolioConfig;
use crate::error::{FolioError, Result};

pub type FileSubscriber = tracing_subscriber::fmt::Subscriber<DefaultFields, Format, EnvFilter, Mutex<File>>;

/// Build a subscriber that appends plain-text events matching `filter` to
/// `path`.
pub fn file_subscriber(path: &Path, filter: &str) -> Result<FileSubscriber> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|err| FolioError::invalid(format!("bad log filter {filter:?}: {err}")))?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish())
}

/// Install the global subscriber if `config` names a log file.
///
/// Returns whether a subscriber was installed. A subscriber that is
/// already installed is left alone.
pub fn init(config: &FolioConfig) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let subscriber = file_subscriber(path, &config.log_filter)?;
    Ok(tracing::subscriber::set_global_default(subscriber).is_ok())
}
