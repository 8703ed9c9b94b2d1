//! Registry integration audit and GitHub token rotation.
//!
//! This crate enumerates API definitions hosted on a SwaggerHub-style
//! registry, queries every (API, version) pair for configured third-party
//! integrations, optionally rewrites the token on GitHub integrations, and
//! renders the collected results into report files.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::time::Duration;
//! use registry_audit::{pipeline, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config {
//!     base_url: "https://api.swaggerhub.com".to_string(),
//!     owner: "my-org".to_string(),
//!     api_key: "secret".to_string(),
//!     spec_type: "API".to_string(),
//!     timeout: Duration::from_secs(30),
//!     output_dir: PathBuf::from("registry_audit_results"),
//!     token_update: None,
//! };
//!
//! let report = pipeline::run(&config).await?;
//! println!("{} requests, {} failed", report.summary.total_requests, report.summary.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! A single linear pipeline: the enumerator fetches the registry listing
//! (fatal on failure), the fetcher fans out one integrations request per
//! (API, version) pair, the aggregator reduces the results to a summary,
//! CSV, and detailed breakdown, and the optional token updater fans out one
//! PATCH per GitHub integration found. Per-item failures are captured in
//! their result records and never abort sibling requests.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod integrations;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod tokens;

pub use client::RegistryClient;
pub use config::{Config, TokenUpdateConfig};
pub use error::AuditError;
pub use models::{
    ApiDescriptor, Body, GithubIntegrationRef, IntegrationInfo, IntegrationResult, RunSummary,
    TokenPatch, TokenUpdateResult,
};
pub use pipeline::RunReport;
pub use report::{DetailedBreakdown, ReportWriter};
