//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("no configuration file found at {dir}")]
    ConfigNotFound { dir: String },

    #[error("failed to parse config file {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("config file {path} contains no top-level keys")]
    ConfigEmpty { path: String },

    #[error("unsupported config format '{0}' (supported: json, yaml, yml)")]
    UnsupportedFormat(String),

    #[error("no manifest versions found for namespace '{namespace}' in {dir}")]
    NoVersionsFound { namespace: String, dir: String },

    #[error("current directory is not an imprint project (missing .imprint marker)")]
    NotAProject,

    #[error("failed to serialize project marker: {0}")]
    Marker(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
