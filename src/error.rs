use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preferences at {path} are not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("terminal backend failed: {0}")]
    Backend(#[from] crossterm::ErrorKind),
}
