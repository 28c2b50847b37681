//! Errors raised while loading scripts from disk

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain script text. Analysis itself never fails.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Script not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScriptError>;
