//! Error types for imprint-kube

use thiserror::Error;

/// Result type for cluster operations
pub type Result<T> = std::result::Result<T, KubeError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Discovery has no entry for this (apiVersion, kind); never guessed
    #[error("unknown resource kind: {api_version}/{kind}")]
    UnknownResourceKind { api_version: String, kind: String },

    /// A document named a kind but carried no usable apiVersion
    #[error("resource is missing apiVersion")]
    MissingTypeMeta,

    /// A resource without metadata.name cannot be applied
    #[error("resource is missing metadata.name")]
    MissingName,

    /// Document failed to parse as a Kubernetes object envelope
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// A bounded network call expired
    #[error("timed out waiting for {what}")]
    Timeout { what: &'static str },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
