//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PipelineStore;
use crate::services::summary::SummaryOptions;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store instance backing all reads.
    pub store: Arc<dyn PipelineStore>,
    /// Dashboard-level summary settings (fan-out, user-count override).
    pub summary: SummaryOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn PipelineStore>) -> Self {
        Self {
            store,
            summary: SummaryOptions::default(),
        }
    }

    pub fn with_summary_options(mut self, summary: SummaryOptions) -> Self {
        self.summary = summary;
        self
    }
}
