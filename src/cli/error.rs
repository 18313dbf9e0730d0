//! CLI-level errors (wraps parser and settings errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::errors::{SettingsError, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid file structure format: {0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Tree(e) => match e {
                TreeError::StructuralParse { .. } => crate::exitcode::DATAERR,
                TreeError::UnknownCharset(_) => crate::exitcode::USAGE,
                TreeError::InternalError(_) => crate::exitcode::SOFTWARE,
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => crate::exitcode::NOINPUT,
                _ => crate::exitcode::IOERR,
            },
        }
    }
}
