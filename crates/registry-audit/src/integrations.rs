//! Concurrent fetch of integrations across every (API, version) pair.

use futures::future::join_all;
use tracing::info;

use crate::client::RegistryClient;
use crate::models::{ApiDescriptor, IntegrationResult};

/// Fetch integrations for every version of every descriptor.
///
/// All requests are dispatched at once and the stage joins when every one
/// has resolved or failed individually. Results are keyed by (API, version)
/// rather than arrival order. Descriptors with no declared versions produce
/// no requests.
pub async fn fetch_all(
    client: &RegistryClient,
    owner: &str,
    apis: &[ApiDescriptor],
) -> Vec<IntegrationResult> {
    info!(api_count = apis.len(), "starting integration requests");

    let mut requests = Vec::new();

    for api in apis {
        let versions = api.versions.as_deref().unwrap_or_default();
        for version in versions.split(',') {
            let version = version.trim();
            if version.is_empty() {
                info!(api = %api.name, "skipping empty version");
                continue;
            }
            requests.push(client.fetch_integrations(owner, &api.name, version));
        }
    }

    info!(request_count = requests.len(), "dispatching requests");

    let results = join_all(requests).await;

    let successful = results.iter().filter(|r| r.success).count();
    info!(
        total = results.len(),
        successful,
        failed = results.len() - successful,
        "integration requests complete"
    );

    results
}
