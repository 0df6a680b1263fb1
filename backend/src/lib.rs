//! # ETL Monitoring Rust Backend
//!
//! Ingestion-status reconciliation engine for a health-data ETL pipeline.
//!
//! This crate tracks whether per-user records have propagated through the
//! pipeline's storage tiers (raw file batches -> bronze landing table ->
//! three silver derived tables) and exposes daily/weekly/monthly summaries.
//! The backend exposes a REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Sync Status**: per-user x per-tier availability matrix for a date
//! - **Vitals Coverage**: per-user x per-signal availability in the bronze tier
//! - **Reconciliation**: record counts per tier, per-user ingestion
//!   classification, and pipeline-health flags
//! - **Period Rollup**: weekly and monthly aggregation over the same engine
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: core domain types (tiers, dates, periods, summary DTOs)
//! - [`db`]: store traits, backends, and configuration (Repository pattern)
//! - [`services`]: the reconciliation engine and status builders
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Every status query is a pure function of (tier contents, date list):
//! nothing is persisted between calls and identical inputs yield identical
//! output. Per-tier read failures degrade to empty tables and `Missing`
//! cells rather than aborting the computation; only a malformed caller date
//! is rejected at the boundary.

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
