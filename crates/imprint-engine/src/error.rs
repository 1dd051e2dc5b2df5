//! Engine error types

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed placeholder syntax
    #[error("template syntax error in {name}: {message}")]
    Syntax { name: String, message: String },

    /// Render-time failure: undefined key, bad operand type, failing filter
    #[error("template execution error in {name}: {message}")]
    Execution { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Classify a MiniJinja error against the template it came from
    pub(crate) fn from_minijinja(err: minijinja::Error, name: &str) -> Self {
        let message = err.to_string();
        match err.kind() {
            minijinja::ErrorKind::SyntaxError => Self::Syntax {
                name: name.to_string(),
                message,
            },
            _ => Self::Execution {
                name: name.to_string(),
                message,
            },
        }
    }

    /// True for per-template failures that should not block sibling templates
    pub fn is_template_failure(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Execution { .. })
    }
}
