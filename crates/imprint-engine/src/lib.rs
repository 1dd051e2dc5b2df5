//! Imprint Engine - renders manifest templates against an attribute tree
//!
//! Templates are Jinja2 (MiniJinja) with a small fixed filter library on top
//! of the builtins: `quote` and `b64encode`, alongside the builtin `upper`
//! and `lower`. Rendering is pure: the only side effect is the output file,
//! and a failed render never leaves one behind.

pub mod engine;
pub mod error;
pub mod filters;

pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, Result};
