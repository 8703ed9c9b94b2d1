//! HTTP client for the registry API.
//!
//! One thin wrapper around `reqwest::Client` issues all three call shapes:
//! the listing GET (fatal on failure), the per-version integrations GET and
//! the token PATCH (both captured into result records, never propagated).

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use urlencoding::encode;

use crate::config::Config;
use crate::error::AuditError;
use crate::models::{
    Body, GithubIntegrationRef, IntegrationResult, SpecListing, TokenPatch, TokenUpdateResult,
};

/// Registry API client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RegistryClient {
    /// Create a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, AuditError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// List registered definitions for an owner.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an
    /// unparseable response body. Failure here aborts the whole run.
    pub async fn list_specs(
        &self,
        owner: &str,
        spec_type: &str,
    ) -> Result<SpecListing, AuditError> {
        let url = format!("{}/specs", self.base_url);

        debug!(owner, spec_type, "fetching registry listing");

        let response = self
            .http
            .get(&url)
            .query(&[("owner", owner), ("specType", spec_type)])
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::ListingStatus {
                status: status.as_u16(),
                body,
            });
        }

        let listing: SpecListing = response.json().await?;
        info!(api_count = listing.apis.len(), "fetched registry listing");

        Ok(listing)
    }

    /// Fetch the integrations configured on one (API, version) pair.
    ///
    /// Never fails outward: transport errors, non-2xx statuses, and
    /// body-read failures all land in the returned record.
    pub async fn fetch_integrations(
        &self,
        owner: &str,
        api_name: &str,
        version: &str,
    ) -> IntegrationResult {
        let url = format!(
            "{}/apis/{}/{}/{}/integrations",
            self.base_url,
            encode(owner),
            encode(api_name),
            encode(version)
        );

        let mut result = IntegrationResult {
            api_name: api_name.to_string(),
            version: version.to_string(),
            url: url.clone(),
            timestamp: Utc::now(),
            success: false,
            status_code: None,
            error: None,
            response_data: None,
        };

        debug!(api = api_name, version, "requesting integrations");

        match self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                result.status_code = Some(status.as_u16());
                result.success = status.is_success();

                if result.success {
                    debug!(
                        api = api_name,
                        version,
                        status = status.as_u16(),
                        "integration request succeeded"
                    );
                    match response.text().await {
                        Ok(text) => result.response_data = Some(Body::from_text(text)),
                        Err(e) => result.error = Some(e.to_string()),
                    }
                } else {
                    warn!(
                        api = api_name,
                        version,
                        status = status.as_u16(),
                        "integration request failed"
                    );
                    result.error = Some(format!("HTTP {}", status.as_u16()));
                }
            }
            Err(e) => {
                warn!(api = api_name, version, error = %e, "integration request errored");
                result.error = Some(e.to_string());
            }
        }

        result
    }

    /// Rewrite the token on one GitHub integration.
    ///
    /// Sends only the `token` and `owner` fields; no other integration
    /// configuration is read or rewritten. Never fails outward.
    pub async fn update_token(
        &self,
        owner: &str,
        integration: &GithubIntegrationRef,
        patch: &TokenPatch,
    ) -> TokenUpdateResult {
        let owner = owner.trim();
        let api_name = integration.api_name.trim();
        let version = integration.version.trim();

        let url = format!(
            "{}/apis/{}/{}/{}/integrations/{}",
            self.base_url,
            encode(owner),
            encode(api_name),
            encode(version),
            integration.integration_id
        );

        let mut result = TokenUpdateResult {
            api_name: api_name.to_string(),
            version: version.to_string(),
            integration_id: integration.integration_id.clone(),
            url: url.clone(),
            timestamp: Utc::now(),
            success: false,
            status_code: None,
            error: None,
            request_body: patch.clone(),
            response_data: None,
        };

        info!(
            api = api_name,
            version,
            integration_id = %integration.integration_id,
            "updating github integration token"
        );

        match self
            .http
            .patch(&url)
            .header(AUTHORIZATION, &self.api_key)
            .json(patch)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                result.status_code = Some(status.as_u16());
                result.success = status.is_success();

                if result.success {
                    info!(
                        api = api_name,
                        version,
                        status = status.as_u16(),
                        "token updated"
                    );
                    if let Ok(text) = response.text().await {
                        result.response_data = Some(Body::from_text(text));
                    }
                } else {
                    warn!(
                        api = api_name,
                        version,
                        status = status.as_u16(),
                        "token update failed"
                    );
                    let mut error = format!("HTTP {}", status.as_u16());
                    match response.text().await {
                        Ok(body) => {
                            if status == StatusCode::BAD_REQUEST {
                                // Extended context for operator debugging;
                                // does not change control flow.
                                warn!(
                                    owner,
                                    api = api_name,
                                    version,
                                    integration_id = %integration.integration_id,
                                    url = %url,
                                    body = %body,
                                    "token update rejected with 400"
                                );
                            }
                            error.push_str(" - ");
                            error.push_str(&body);
                        }
                        Err(e) => {
                            debug!(error = %e, "could not read error response body");
                        }
                    }
                    result.error = Some(error);
                }
            }
            Err(e) => {
                warn!(
                    api = api_name,
                    version,
                    integration_id = %integration.integration_id,
                    error = %e,
                    "token update errored"
                );
                result.error = Some(e.to_string());
            }
        }

        result
    }
}
