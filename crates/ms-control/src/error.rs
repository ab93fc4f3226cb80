use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("controler configuration error: {0}")]
    Config(String),

    #[error("output directory {0:?} already exists")]
    OutputExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A listener hook failed; the run is aborted.
    #[error("listener error: {0}")]
    Listener(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type ControlResult<T> = Result<T, ControlError>;
