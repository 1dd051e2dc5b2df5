//! The `.imprint` project marker
//!
//! Commands that operate on repos refuse to run outside a directory carrying
//! a parseable marker file, so stray invocations don't scatter `manifests/`
//! trees across the filesystem.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Marker file name at the project root
pub const MARKER_FILE: &str = ".imprint";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMarker {
    pub version: String,
    pub author: String,
    pub description: String,
}

impl Default for ProjectMarker {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: "Your name".to_string(),
            description: "Kubernetes manifests for this project".to_string(),
        }
    }
}

impl ProjectMarker {
    /// Write the marker into a project root
    pub fn write(&self, root: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(root.join(MARKER_FILE), data)?;
        Ok(())
    }

    /// Read the marker from a project root
    pub fn read(root: &Path) -> Result<Self> {
        let data =
            std::fs::read_to_string(root.join(MARKER_FILE)).map_err(|_| CoreError::NotAProject)?;
        serde_json::from_str(&data).map_err(|_| CoreError::NotAProject)
    }
}

/// True when `root` carries a parseable project marker
pub fn is_project(root: &Path) -> bool {
    ProjectMarker::read(root).is_ok()
}

/// Fail with `NotAProject` unless `root` is a valid project
pub fn require_project(root: &Path) -> Result<()> {
    ProjectMarker::read(root).map(|_| ())
}
