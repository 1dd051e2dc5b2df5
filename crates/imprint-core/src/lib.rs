//! Imprint Core - foundational types for the manifest generator
//!
//! This crate provides the pieces shared by the generate and apply pipelines:
//! - `Values`: the attribute tree loaded from a config file
//! - `config`: config file discovery, format detection and loading
//! - `store`: the timestamp-versioned manifest output store
//! - `project`: the `.imprint` project marker

pub mod config;
pub mod error;
pub mod project;
pub mod store;
pub mod values;

pub use config::{ConfigCandidate, ConfigFormat, candidates, load_config};
pub use error::{CoreError, Result};
pub use project::{ProjectMarker, is_project, require_project};
pub use values::Values;
