//! Resource discovery cache
//!
//! Built once per run from the cluster's discovery endpoints and read-only
//! afterwards; a long-running apply is assumed not to race a live
//! cluster-schema change. Resolution never falls back to a guessed plural
//! form — an incorrect path would create the wrong kind of object or 404 in
//! a non-obvious way.

use kube::Client;
use kube::core::{GroupVersionKind, TypeMeta};
use kube::discovery::{ApiCapabilities, ApiResource, Discovery, Scope};

use crate::client::bounded;
use crate::error::{KubeError, Result};

/// A resolved (group, version, kind) -> API resource mapping
#[derive(Debug, Clone)]
pub struct ResourceMapping {
    pub api_resource: ApiResource,
    pub capabilities: ApiCapabilities,
}

impl ResourceMapping {
    /// Whether this resource kind is partitioned by namespace
    pub fn namespaced(&self) -> bool {
        self.capabilities.scope == Scope::Namespaced
    }
}

/// In-memory mapping from (apiVersion, kind) to concrete resource endpoints
pub struct DiscoveryCache {
    discovery: Discovery,
}

impl DiscoveryCache {
    /// Query the cluster's discovery endpoints and cache the result for the
    /// lifetime of the run
    pub async fn build(client: Client) -> Result<Self> {
        let discovery = bounded("API discovery", Discovery::new(client).run()).await?;
        Ok(Self { discovery })
    }

    /// Resolve a document's TypeMeta to an API resource, or fail with
    /// `UnknownResourceKind`
    pub fn resolve(&self, types: &TypeMeta) -> Result<ResourceMapping> {
        let gvk = gvk_of(types).ok_or(KubeError::MissingTypeMeta)?;
        self.discovery
            .resolve_gvk(&gvk)
            .map(|(api_resource, capabilities)| ResourceMapping {
                api_resource,
                capabilities,
            })
            .ok_or_else(|| KubeError::UnknownResourceKind {
                api_version: types.api_version.clone(),
                kind: types.kind.clone(),
            })
    }
}

/// Split an apiVersion into (group, version): `"apps/v1"` is the apps group,
/// a bare `"v1"` is the core group.
pub fn gvk_of(types: &TypeMeta) -> Option<GroupVersionKind> {
    if types.api_version.is_empty() || types.kind.is_empty() {
        return None;
    }
    let (group, version) = match types.api_version.split_once('/') {
        Some((group, version)) => (group.to_string(), version.to_string()),
        None => (String::new(), types.api_version.clone()),
    };
    Some(GroupVersionKind {
        group,
        version,
        kind: types.kind.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_meta(api_version: &str, kind: &str) -> TypeMeta {
        TypeMeta {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_gvk_of_grouped() {
        let gvk = gvk_of(&type_meta("apps/v1", "Deployment")).unwrap();
        assert_eq!(gvk.group, "apps");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Deployment");
    }

    #[test]
    fn test_gvk_of_core_group() {
        let gvk = gvk_of(&type_meta("v1", "ConfigMap")).unwrap();
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "ConfigMap");
    }

    #[test]
    fn test_gvk_of_dotted_group() {
        let gvk = gvk_of(&type_meta("networking.k8s.io/v1", "Ingress")).unwrap();
        assert_eq!(gvk.group, "networking.k8s.io");
        assert_eq!(gvk.version, "v1");

        let gvk = gvk_of(&type_meta("gateway.networking.k8s.io/v1", "HTTPRoute")).unwrap();
        assert_eq!(gvk.group, "gateway.networking.k8s.io");
        assert_eq!(gvk.version, "v1");
    }

    #[test]
    fn test_gvk_of_rejects_blank_fields() {
        assert!(gvk_of(&type_meta("", "Deployment")).is_none());
        assert!(gvk_of(&type_meta("v1", "")).is_none());
    }
}
