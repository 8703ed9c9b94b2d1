//! Aggregation over the collected results and report-file rendering.
//!
//! `summarize`, `render_csv`, and `detailed_breakdown` are deterministic,
//! side-effect-free transformations of the input list. `ReportWriter` is
//! the only piece here that touches the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AuditError;
use crate::models::{IntegrationResult, RunSummary};
use crate::pipeline::RunReport;

const CSV_HEADER: &str =
    "API Name,Version,Status,Status Code,Integration Count,Integration Types,URL";

/// Compute run-level counts over the result list.
#[must_use]
pub fn summarize(total_apis: usize, results: &[IntegrationResult]) -> RunSummary {
    let successful = results.iter().filter(|r| r.success).count();

    RunSummary {
        total_apis,
        total_requests: results.len(),
        successful,
        failed: results.len() - successful,
        completed_at: Utc::now(),
    }
}

/// Render the per-result CSV report.
#[must_use]
pub fn render_csv(results: &[IntegrationResult]) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];

    for result in results {
        let integrations = result.integrations();
        let types = if integrations.is_empty() {
            "None".to_string()
        } else {
            integrations
                .iter()
                .map(|i| i.config_type.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };
        let status = if result.success { "Success" } else { "Failed" };
        let code = result
            .status_code
            .map_or_else(String::new, |code| code.to_string());

        rows.push(format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
            result.api_name,
            result.version,
            status,
            code,
            integrations.len(),
            types,
            result.url
        ));
    }

    rows.join("\n")
}

/// Full breakdown of the result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedBreakdown {
    pub summary: BreakdownSummary,
    pub integration_types: BTreeMap<String, usize>,
    pub api_details: Vec<ApiDetail>,
}

/// Has/has-not grouping over the result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSummary {
    #[serde(rename = "totalAPIs")]
    pub total_apis: usize,
    pub apis_with_integrations: usize,
    pub apis_without_integrations: usize,
    pub total_integrations: usize,
}

/// Per-result detail row of the breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDetail {
    pub api_name: String,
    pub version: String,
    pub success: bool,
    pub integration_count: usize,
    pub integrations: Vec<IntegrationDetail>,
}

/// Flattened view of one integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationDetail {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Group results by integration presence, count types across all results,
/// and flatten each result's integrations.
#[must_use]
pub fn detailed_breakdown(results: &[IntegrationResult]) -> DetailedBreakdown {
    let mut summary = BreakdownSummary {
        total_apis: results.len(),
        apis_with_integrations: 0,
        apis_without_integrations: 0,
        total_integrations: 0,
    };
    let mut integration_types = BTreeMap::new();
    let mut api_details = Vec::new();

    for result in results {
        let integrations = result.integrations();

        if integrations.is_empty() {
            summary.apis_without_integrations += 1;
        } else {
            summary.apis_with_integrations += 1;
            summary.total_integrations += integrations.len();
        }

        for integration in &integrations {
            *integration_types
                .entry(integration.config_type.clone())
                .or_insert(0) += 1;
        }

        api_details.push(ApiDetail {
            api_name: result.api_name.clone(),
            version: result.version.clone(),
            success: result.success,
            integration_count: integrations.len(),
            integrations: integrations
                .into_iter()
                .map(|i| IntegrationDetail {
                    id: i.id,
                    name: i.name,
                    enabled: i.enabled,
                    kind: i.config_type,
                })
                .collect(),
        });
    }

    DetailedBreakdown {
        summary,
        integration_types,
        api_details,
    }
}

/// Writes every report artifact for one run into a results directory,
/// stamping file names with the run timestamp.
pub struct ReportWriter {
    dir: PathBuf,
    timestamp: String,
}

impl ReportWriter {
    /// Create the results directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self, AuditError> {
        fs::create_dir_all(dir)?;

        let timestamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");

        Ok(Self {
            dir: dir.to_path_buf(),
            timestamp,
        })
    }

    /// Write all report files. The token-update file is written only when
    /// the update pass produced at least one result.
    ///
    /// # Errors
    ///
    /// Returns an error on any serialization or file I/O failure.
    pub fn write_all(&self, report: &RunReport) -> Result<Vec<PathBuf>, AuditError> {
        let mut written = Vec::new();

        written.push(self.write_json("complete_results", report)?);
        written.push(self.write_json("integration_results", &report.integration_results)?);
        written.push(self.write_json("summary", &report.summary)?);
        written.push(self.write_text(
            "integration_report",
            "csv",
            &render_csv(&report.integration_results),
        )?);
        written.push(self.write_json(
            "detailed_integrations",
            &detailed_breakdown(&report.integration_results),
        )?);

        if !report.token_update_results.is_empty() {
            written.push(self.write_json("token_update_results", &report.token_update_results)?);
        }

        for path in &written {
            info!(path = %path.display(), "report written");
        }

        Ok(written)
    }

    fn write_json<T: Serialize>(&self, stem: &str, value: &T) -> Result<PathBuf, AuditError> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.write_text(stem, "json", &rendered)
    }

    fn write_text(&self, stem: &str, extension: &str, content: &str) -> Result<PathBuf, AuditError> {
        let path = self
            .dir
            .join(format!("{stem}_{}.{extension}", self.timestamp));
        fs::write(&path, content)?;
        Ok(path)
    }
}
