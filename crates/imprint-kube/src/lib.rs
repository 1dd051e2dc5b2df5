//! Imprint Kube - cluster operations for rendered manifests
//!
//! The apply pipeline: a `DiscoveryCache` built once per run resolves each
//! document's (apiVersion, kind) to a concrete API resource, the
//! `NamespaceManager` provisions missing namespaces behind an interactive
//! confirmation, and the `Applier` walks a version directory performing
//! idempotent Server-Side Apply calls, one document at a time.

pub mod apply;
pub mod client;
pub mod discovery;
pub mod error;
pub mod namespace;

pub use apply::{Applier, ApplyOutcome, ApplyReport, DocumentResult};
pub use client::{CALL_TIMEOUT, FIELD_MANAGER, connect};
pub use discovery::{DiscoveryCache, ResourceMapping};
pub use error::{KubeError, Result};
pub use namespace::{NamespaceManager, NamespaceStatus, Prompt};
