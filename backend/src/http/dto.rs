//! Data Transfer Objects for the HTTP API.
//!
//! The table and summary models in [`crate::models`] already derive
//! Serialize, so the DTOs here are the query-parameter structs and the
//! pagination envelopes wrapped around them.

use serde::{Deserialize, Serialize};

use crate::models::{ReconciliationSummary, StatusRow};

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    10
}

/// Query parameters shared by the sync-status and user-vitals endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StatusQuery {
    /// Date in `YYYY-MM-DD` form; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Rollup window for the summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryView {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SummaryQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub view: SummaryView,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Paginated per-user table response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPage {
    pub date: String,
    pub data: Vec<StatusRow>,
    pub columns: Vec<String>,
    pub total_users: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Summary response with the user list paginated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPage {
    #[serde(flatten)]
    pub summary: ReconciliationSummary,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}
