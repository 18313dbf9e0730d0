use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("invalid structure at line {line}: {content:?}")]
    StructuralParse {
        line: usize,
        content: String,
    },

    #[error("unknown charset: {0} (expected ascii or unicode)")]
    UnknownCharset(String),

    #[error("Internal tree operation failed: {0}")]
    InternalError(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while loading layered settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("config file not found: {0}")]
    MissingFile(std::path::PathBuf),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
