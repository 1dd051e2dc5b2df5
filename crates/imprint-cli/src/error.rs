//! CLI error types with exit code handling
//!
//! Maps failures from the core, engine and kube crates onto user-facing
//! diagnostics and process exit codes.

#![allow(dead_code)] // Some variants/constructors are for future use

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Config file missing, unparseable or empty
    #[error("Config error: {message}")]
    #[diagnostic(code(imprint::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Template rendering failed
    #[error("Template error: {message}")]
    #[diagnostic(code(imprint::cli::template))]
    Template { message: String },

    /// Cluster-side failure (discovery, namespace, apply)
    #[error("Cluster error: {message}")]
    #[diagnostic(code(imprint::cli::cluster))]
    Cluster { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(imprint::cli::io))]
    Io { message: String },

    /// Invalid arguments or interactive selections
    #[error("{message}")]
    #[diagnostic(code(imprint::cli::usage))]
    Usage { message: String },

    /// Anything else
    #[error("{message}")]
    #[diagnostic(code(imprint::cli::error))]
    Other {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Template { .. } => exit_codes::TEMPLATE_ERROR,
            CliError::Cluster { .. } => exit_codes::CLUSTER_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    pub fn cluster(message: impl Into<String>) -> Self {
        Self::Cluster {
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<imprint_core::CoreError> for CliError {
    fn from(err: imprint_core::CoreError) -> Self {
        use imprint_core::CoreError;
        match err {
            CoreError::ConfigNotFound { .. } => CliError::Config {
                message: err.to_string(),
                help: Some("create a config.json (or config.yaml) in the repo directory".into()),
            },
            CoreError::ConfigEmpty { .. } => CliError::Config {
                message: err.to_string(),
                help: Some(
                    "an empty config renders every placeholder blank; add your values first".into(),
                ),
            },
            CoreError::ConfigParse { .. } | CoreError::UnsupportedFormat(_) => CliError::Config {
                message: err.to_string(),
                help: None,
            },
            CoreError::NotAProject => CliError::Other {
                message: err.to_string(),
                help: Some("run 'imprint init' to set up a project first".into()),
            },
            CoreError::NoVersionsFound { .. } => CliError::Other {
                message: err.to_string(),
                help: Some("run 'imprint generate' to produce a manifest version".into()),
            },
            CoreError::Marker(e) => CliError::Other {
                message: e.to_string(),
                help: None,
            },
            CoreError::Io(e) => e.into(),
        }
    }
}

impl From<imprint_engine::EngineError> for CliError {
    fn from(err: imprint_engine::EngineError) -> Self {
        match err {
            imprint_engine::EngineError::Io(e) => e.into(),
            other => CliError::Template {
                message: other.to_string(),
            },
        }
    }
}

impl From<imprint_kube::KubeError> for CliError {
    fn from(err: imprint_kube::KubeError) -> Self {
        match err {
            imprint_kube::KubeError::Io(e) => e.into(),
            other => CliError::Cluster {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
