//! GitHub token rotation across matching integrations.

use futures::future::join_all;
use tracing::info;

use crate::client::RegistryClient;
use crate::config::TokenUpdateConfig;
use crate::models::{GithubIntegrationRef, IntegrationResult, TokenPatch, TokenUpdateResult};

/// The `configType` marker identifying GitHub integrations.
pub const GITHUB_CONFIG_TYPE: &str = "GITHUB";

/// Scan successful results for GitHub integrations.
#[must_use]
pub fn find_github_integrations(results: &[IntegrationResult]) -> Vec<GithubIntegrationRef> {
    let mut refs = Vec::new();

    for result in results.iter().filter(|r| r.success) {
        for integration in result.integrations() {
            if integration.config_type == GITHUB_CONFIG_TYPE {
                refs.push(GithubIntegrationRef {
                    api_name: result.api_name.clone(),
                    version: result.version.clone(),
                    integration_id: integration.id,
                    integration_name: integration.name,
                    enabled: integration.enabled,
                    original_url: result.url.clone(),
                });
            }
        }
    }

    refs
}

/// Rewrite the token on every GitHub integration found in `results`.
///
/// Returns an empty list without issuing any request when no GitHub
/// integration is present. Updates are dispatched with the same unbounded
/// fan-out as the fetch stage; per-item failures are captured in their
/// records.
pub async fn update_all_tokens(
    client: &RegistryClient,
    owner: &str,
    results: &[IntegrationResult],
    update: &TokenUpdateConfig,
) -> Vec<TokenUpdateResult> {
    let refs = find_github_integrations(results);
    info!(
        found = refs.len(),
        scanned = results.len(),
        "github integrations discovered"
    );

    if refs.is_empty() {
        info!("no github integrations to update");
        return Vec::new();
    }

    let patch = TokenPatch {
        token: update.new_token.clone(),
        owner: update.github_owner.clone(),
    };

    let updates = refs
        .iter()
        .map(|integration| client.update_token(owner, integration, &patch));
    let outcomes = join_all(updates).await;

    let successful = outcomes.iter().filter(|r| r.success).count();
    info!(
        total = outcomes.len(),
        successful,
        failed = outcomes.len() - successful,
        "token update pass complete"
    );

    outcomes
}
