//! Linear run pipeline: enumerate, fetch, summarize, optionally rotate
//! tokens. No retries, no resumability; a listing failure aborts the run
//! while per-item failures stay inside their result records.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog;
use crate::client::RegistryClient;
use crate::config::Config;
use crate::error::AuditError;
use crate::integrations;
use crate::models::{ApiDescriptor, IntegrationResult, RunSummary, TokenUpdateResult};
use crate::report;
use crate::tokens;

/// Everything one run produced. Serialized verbatim as the complete-results
/// report file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub api_data: Vec<ApiDescriptor>,
    pub integration_results: Vec<IntegrationResult>,
    pub summary: RunSummary,
    pub token_update_results: Vec<TokenUpdateResult>,
}

/// Execute one audit run.
///
/// # Errors
///
/// Returns an error only for fatal failures: client construction or the
/// registry listing call.
pub async fn run(config: &Config) -> Result<RunReport, AuditError> {
    let client = RegistryClient::new(config)?;

    info!(
        base_url = %config.base_url,
        owner = %config.owner,
        spec_type = %config.spec_type,
        "starting audit run"
    );

    let listing = client.list_specs(&config.owner, &config.spec_type).await?;
    let api_data = catalog::extract_api_data(&listing);
    info!(api_count = api_data.len(), "extracted api descriptors");

    if api_data.is_empty() {
        info!("no apis found to process");
    }

    let integration_results = integrations::fetch_all(&client, &config.owner, &api_data).await;
    let summary = report::summarize(api_data.len(), &integration_results);

    let token_update_results = match &config.token_update {
        Some(update) => {
            tokens::update_all_tokens(&client, &config.owner, &integration_results, update).await
        }
        None => Vec::new(),
    };

    log_breakdown(&integration_results, &summary);

    Ok(RunReport {
        api_data,
        integration_results,
        summary,
        token_update_results,
    })
}

/// Final pass/fail narration over the result set.
fn log_breakdown(results: &[IntegrationResult], summary: &RunSummary) {
    for result in results {
        if result.success {
            info!(
                api = %result.api_name,
                version = %result.version,
                status = result.status_code,
                "integration lookup succeeded"
            );
        } else {
            warn!(
                api = %result.api_name,
                version = %result.version,
                error = result.error.as_deref().unwrap_or("unknown"),
                "integration lookup failed"
            );
        }
    }

    info!(
        total_apis = summary.total_apis,
        total_requests = summary.total_requests,
        successful = summary.successful,
        failed = summary.failed,
        "audit run complete"
    );
}
