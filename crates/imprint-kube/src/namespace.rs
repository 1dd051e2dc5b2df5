//! Namespace existence checks and interactive provisioning

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use kube::api::{Api, PostParams};

use crate::client::bounded;
use crate::error::Result;

/// Label stamped onto namespaces this tool creates, so their provenance is
/// auditable after the fact
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Interactive confirmation seam; the CLI answers from stdin, tests stub it
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// What happened to the target namespace of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceStatus {
    /// Already present on the cluster
    Exists,
    /// Missing, operator confirmed, created
    Created,
    /// Missing and the operator declined creation
    Declined,
}

/// Namespace get/create against the cluster
pub struct NamespaceManager {
    client: Client,
}

impl NamespaceManager {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Make sure `name` exists, asking before creating it. Declining is not
    /// an error; the caller records the document as skipped and moves on.
    pub async fn ensure(&self, name: &str, prompt: &dyn Prompt) -> Result<NamespaceStatus> {
        let api: Api<Namespace> = Api::all(self.client.clone());

        let existing = bounded("namespace lookup", api.get_opt(name)).await?;
        if existing.is_some() {
            return Ok(NamespaceStatus::Exists);
        }

        let question = format!("namespace '{name}' does not exist, create it?");
        if !prompt.confirm(&question) {
            return Ok(NamespaceStatus::Declined);
        }

        bounded(
            "namespace creation",
            api.create(&PostParams::default(), &managed_namespace(name)),
        )
        .await?;
        Ok(NamespaceStatus::Created)
    }
}

/// Build the Namespace object this tool provisions, carrying the managed-by
/// label
fn managed_namespace(name: &str) -> Namespace {
    let labels = BTreeMap::from([(
        MANAGED_BY_LABEL.to_string(),
        crate::client::FIELD_MANAGER.to_string(),
    )]);
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        ..Default::default()
    }
}
