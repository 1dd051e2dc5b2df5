//! Kubernetes client bootstrap and call bounding

use std::future::Future;
use std::time::Duration;

use kube::Client;

use crate::error::{KubeError, Result};

/// Field manager identity for Server-Side Apply; repeated applies under the
/// same manager are idempotent.
pub const FIELD_MANAGER: &str = "imprint";

/// Upper bound on any single network round-trip
pub const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect using the standard kubeconfig resolution (`~/.kube/config`, or
/// the in-cluster environment when running inside a pod)
pub async fn connect() -> Result<Client> {
    Client::try_default().await.map_err(KubeError::Api)
}

/// Run one API call under the bounded timeout
pub(crate) async fn bounded<T, F>(what: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, kube::Error>>,
{
    match tokio::time::timeout(CALL_TIMEOUT, fut).await {
        Ok(result) => result.map_err(KubeError::Api),
        Err(_) => Err(KubeError::Timeout { what }),
    }
}
