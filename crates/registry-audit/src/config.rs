//! Run configuration.
//!
//! Built once at process start and passed by reference to every component;
//! nothing in the crate reads configuration from anywhere else.

use std::path::PathBuf;
use std::time::Duration;

/// Immutable configuration for one audit run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry base URL, e.g. `https://api.swaggerhub.com`
    pub base_url: String,
    /// Organization that owns the definitions
    pub owner: String,
    /// Opaque credential sent raw in the `Authorization` header
    pub api_key: String,
    /// Definition type to list (e.g. `API` or `DOMAIN`)
    pub spec_type: String,
    /// Per-request timeout; guards against hung upstream calls
    pub timeout: Duration,
    /// Directory report files are written into
    pub output_dir: PathBuf,
    /// When set, every GitHub integration found gets its token rewritten
    pub token_update: Option<TokenUpdateConfig>,
}

/// Inputs for the token-rewrite pass.
#[derive(Debug, Clone)]
pub struct TokenUpdateConfig {
    /// Replacement GitHub token
    pub new_token: String,
    /// GitHub account stamped into rewritten integrations
    pub github_owner: String,
}
