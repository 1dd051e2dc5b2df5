//! The manifest apply engine
//!
//! Consumes one version directory of rendered YAML documents and applies
//! each against the cluster with Server-Side Apply. Files are processed in
//! alphabetical order and `---`-separated sub-documents are separate items;
//! no dependency ordering is inferred between resources. Every per-document
//! failure is recorded in the report and the run continues; the aggregate
//! decides the process exit status.

use std::path::Path;

use kube::Client;
use kube::api::{Api, DynamicObject, Patch, PatchParams};

use crate::client::{FIELD_MANAGER, bounded};
use crate::discovery::{DiscoveryCache, ResourceMapping};
use crate::error::{KubeError, Result};
use crate::namespace::{NamespaceManager, NamespaceStatus, Prompt};

/// Per-document result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Server-Side Apply succeeded; `created` is false for updates
    Applied { created: bool },
    /// Blank separator or empty-kind document; intentionally a no-op
    SkippedEmpty,
    /// Target namespace was missing and the operator declined creating it
    SkippedDeclined,
    /// Parse, resolution, namespace or apply failure
    Failed { reason: String },
}

/// One processed document: where it came from and what happened to it
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Source file name
    pub source: String,
    /// `namespace/Kind/name` when known, else the source position
    pub subject: String,
    pub outcome: ApplyOutcome,
}

/// Aggregate over a run; reported and then discarded
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub results: Vec<DocumentResult>,
}

impl ApplyReport {
    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, ApplyOutcome::Applied { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(o, ApplyOutcome::SkippedEmpty | ApplyOutcome::SkippedDeclined)
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ApplyOutcome::Failed { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// One-line human-readable roll-up
    pub fn summary(&self) -> String {
        if self.results.is_empty() {
            return "no documents processed".to_string();
        }
        let mut parts = Vec::with_capacity(3);
        if self.applied() > 0 {
            parts.push(format!("{} applied", self.applied()));
        }
        if self.skipped() > 0 {
            parts.push(format!("{} skipped", self.skipped()));
        }
        if self.failed() > 0 {
            parts.push(format!("{} failed", self.failed()));
        }
        parts.join(", ")
    }

    fn count(&self, pred: impl Fn(&ApplyOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Classification of one YAML sub-document
#[derive(Debug)]
enum Document {
    /// Whitespace, comments-only, or an empty/missing kind
    Blank,
    Resource(DynamicObject),
}

/// The apply engine
pub struct Applier {
    client: Client,
    cache: DiscoveryCache,
    namespaces: NamespaceManager,
    default_namespace: String,
}

impl Applier {
    /// Connect the engine: builds the discovery cache once for the run
    pub async fn new(client: Client, default_namespace: impl Into<String>) -> Result<Self> {
        let cache = DiscoveryCache::build(client.clone()).await?;
        Ok(Self {
            namespaces: NamespaceManager::new(client.clone()),
            client,
            cache,
            default_namespace: default_namespace.into(),
        })
    }

    /// Apply every document in a version directory, files in alphabetical
    /// order. Only a structural failure (unreadable directory) aborts; all
    /// per-document failures land in the report.
    pub async fn apply_dir(&self, dir: &Path, prompt: &dyn Prompt) -> Result<ApplyReport> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        let mut report = ApplyReport::default();
        for path in files {
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            match std::fs::read_to_string(&path) {
                Ok(manifest) => {
                    self.apply_manifest(&source, &manifest, prompt, &mut report)
                        .await;
                }
                Err(e) => report.results.push(DocumentResult {
                    subject: source.clone(),
                    source,
                    outcome: ApplyOutcome::Failed {
                        reason: format!("could not read file: {e}"),
                    },
                }),
            }
        }
        Ok(report)
    }

    /// Apply all sub-documents of one rendered manifest
    pub async fn apply_manifest(
        &self,
        source: &str,
        manifest: &str,
        prompt: &dyn Prompt,
        report: &mut ApplyReport,
    ) {
        for (index, chunk) in split_documents(manifest).into_iter().enumerate() {
            let (subject, outcome) = self.apply_document(&chunk, prompt).await;
            let subject = subject.unwrap_or_else(|| format!("{source}#{index}"));
            report.results.push(DocumentResult {
                source: source.to_string(),
                subject,
                outcome,
            });
        }
    }

    /// Process one document through the parse -> resolve -> namespace ->
    /// apply sequence, mapping every failure to an outcome
    async fn apply_document(
        &self,
        chunk: &str,
        prompt: &dyn Prompt,
    ) -> (Option<String>, ApplyOutcome) {
        let mut obj = match classify_document(chunk) {
            Ok(Document::Blank) => return (None, ApplyOutcome::SkippedEmpty),
            Ok(Document::Resource(obj)) => obj,
            Err(e) => {
                return (
                    None,
                    ApplyOutcome::Failed {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let types = match obj.types.clone() {
            Some(types) => types,
            None => {
                return (
                    None,
                    ApplyOutcome::Failed {
                        reason: KubeError::MissingTypeMeta.to_string(),
                    },
                );
            }
        };
        let kind = types.kind.clone();

        let mapping = match self.cache.resolve(&types) {
            Ok(mapping) => mapping,
            Err(e) => {
                return (
                    Some(display_name(&obj, &kind)),
                    ApplyOutcome::Failed {
                        reason: e.to_string(),
                    },
                );
            }
        };

        // Cluster-scoped resources are never assigned a namespace, even when
        // a default is configured
        obj.metadata.namespace = effective_namespace(
            mapping.namespaced(),
            obj.metadata.namespace.as_deref(),
            &self.default_namespace,
        );
        let subject = display_name(&obj, &kind);

        if let Some(ns) = obj.metadata.namespace.clone() {
            match self.namespaces.ensure(&ns, prompt).await {
                Ok(NamespaceStatus::Exists | NamespaceStatus::Created) => {}
                Ok(NamespaceStatus::Declined) => {
                    return (Some(subject), ApplyOutcome::SkippedDeclined);
                }
                Err(e) => {
                    return (
                        Some(subject),
                        ApplyOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        match self.apply_resource(&obj, &mapping).await {
            Ok(created) => (Some(subject), ApplyOutcome::Applied { created }),
            Err(e) => (
                Some(subject),
                ApplyOutcome::Failed {
                    reason: e.to_string(),
                },
            ),
        }
    }

    /// Idempotent create-or-update keyed by (namespace, name) under this
    /// tool's field manager
    async fn apply_resource(&self, obj: &DynamicObject, mapping: &ResourceMapping) -> Result<bool> {
        let name = obj.metadata.name.as_deref().ok_or(KubeError::MissingName)?;
        let api = self.api_for(obj, mapping);

        let exists = bounded("resource lookup", api.get_opt(name)).await?.is_some();

        let params = PatchParams::apply(FIELD_MANAGER).force();
        bounded("resource apply", api.patch(name, &params, &Patch::Apply(obj))).await?;

        Ok(!exists)
    }

    fn api_for(&self, obj: &DynamicObject, mapping: &ResourceMapping) -> Api<DynamicObject> {
        match obj.metadata.namespace.as_deref() {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &mapping.api_resource),
            None => Api::all_with(self.client.clone(), &mapping.api_resource),
        }
    }
}

/// Pick the namespace the apply call targets: the document's own, else the
/// run default — and none at all for cluster-scoped kinds
fn effective_namespace(
    namespaced: bool,
    doc_namespace: Option<&str>,
    default_namespace: &str,
) -> Option<String> {
    if !namespaced {
        return None;
    }
    Some(
        doc_namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or(default_namespace)
            .to_string(),
    )
}

fn display_name(obj: &DynamicObject, kind: &str) -> String {
    let name = obj.metadata.name.as_deref().unwrap_or("unnamed");
    match obj.metadata.namespace.as_deref() {
        Some(ns) => format!("{ns}/{kind}/{name}"),
        None => format!("{kind}/{name}"),
    }
}

/// Split a manifest into sub-documents on `---` separator lines
fn split_documents(manifest: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();
    for line in manifest.lines() {
        if line.trim_end() == "---" {
            documents.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    documents.push(current);
    documents
}

/// Parse one sub-document. Blank separators, comment-only chunks and
/// documents with an empty kind are recognized no-ops, not errors.
fn classify_document(chunk: &str) -> Result<Document> {
    let trimmed = chunk.trim();
    if trimmed.is_empty()
        || trimmed
            .lines()
            .all(|l| l.trim().is_empty() || l.trim().starts_with('#'))
    {
        return Ok(Document::Blank);
    }

    let value: serde_json::Value = serde_yaml::from_str(chunk)
        .map_err(|e| KubeError::InvalidManifest(format!("YAML parse error: {e}")))?;
    if value.is_null() {
        return Ok(Document::Blank);
    }

    let kind = value.get("kind").and_then(|k| k.as_str()).unwrap_or("");
    if kind.is_empty() {
        return Ok(Document::Blank);
    }
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if api_version.is_empty() {
        // kind was named, so the envelope is incomplete rather than blank
        return Err(KubeError::MissingTypeMeta);
    }

    let obj: DynamicObject = serde_json::from_value(value)
        .map_err(|e| KubeError::InvalidManifest(e.to_string()))?;
    Ok(Document::Resource(obj))
}
