//! Error types for the audit run.

use thiserror::Error;

/// Fatal errors. Per-item request failures are captured inside the result
/// records instead and never surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The registry listing call returned a non-2xx status
    #[error("registry listing failed: HTTP {status} - {body}")]
    ListingStatus { status: u16, body: String },

    /// HTTP transport or client construction failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Report serialization failure
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Report file I/O failure
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
