//! Data model for registry listings, per-request results, and summaries.
//!
//! Every record that lands in a report file serializes with camelCase keys
//! so the JSON output matches the shape consumers of the previous tooling
//! already parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw listing response from `GET {base}/specs`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecListing {
    #[serde(default)]
    pub apis: Vec<SpecEntry>,
}

/// One entry in the listing, described by its property metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecEntry {
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Vec<SpecProperty>,
}

/// A typed property attached to a listing entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecProperty {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Option<String>,
    pub value: Option<String>,
}

/// One API definition extracted from the registry listing.
///
/// `versions` holds the cleaned, comma-joined version list. A descriptor is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    pub name: String,
    pub versions: Option<String>,
    pub created_by: Option<String>,
}

/// A response body, structured when it parses as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

impl Body {
    /// Attempt a structured parse first, keeping the raw text otherwise.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// The `integrations` array of a JSON body. Text bodies and JSON bodies
    /// without a recognizable array yield an empty list.
    #[must_use]
    pub fn integrations(&self) -> Vec<IntegrationInfo> {
        match self {
            Self::Json(value) => value
                .get("integrations")
                .and_then(|list| serde_json::from_value(list.clone()).ok())
                .unwrap_or_default(),
            Self::Text(_) => Vec::new(),
        }
    }
}

/// An integration configured on a specific API version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "configType")]
    pub config_type: String,
}

/// Outcome of one integrations-list request for an (API, version) pair.
///
/// Invariant: `success` is true iff the HTTP status was in `[200, 300)`;
/// `response_data` is populated only on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResult {
    pub api_name: String,
    pub version: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub response_data: Option<Body>,
}

impl IntegrationResult {
    /// Integrations carried by this result's body, if any.
    #[must_use]
    pub fn integrations(&self) -> Vec<IntegrationInfo> {
        self.response_data
            .as_ref()
            .map(Body::integrations)
            .unwrap_or_default()
    }
}

/// A GitHub integration found inside a successful result. Derived on
/// demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubIntegrationRef {
    pub api_name: String,
    pub version: String,
    pub integration_id: String,
    pub integration_name: String,
    pub enabled: bool,
    pub original_url: String,
}

/// PATCH body sent to the integration endpoint. Only these two fields are
/// rewritten; every other integration configuration field is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPatch {
    pub token: String,
    pub owner: String,
}

/// Outcome of one token-update PATCH against a GitHub integration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUpdateResult {
    pub api_name: String,
    pub version: String,
    pub integration_id: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub request_body: TokenPatch,
    pub response_data: Option<Body>,
}

/// Run-level counts over the collected integration results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_apis: usize,
    pub total_requests: usize,
    pub successful: usize,
    pub failed: usize,
    pub completed_at: DateTime<Utc>,
}
