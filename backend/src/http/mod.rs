//! HTTP server module for the ETL monitor.
//!
//! An axum-based REST layer over the service functions in
//! [`crate::services`]. The handlers do request parsing, pagination and
//! JSON serialization only; all reconciliation logic lives below them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Query parsing and date validation                     │
//! │  - Pagination envelopes, JSON serialization              │
//! │  - CORS, compression, tracing                            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - Availability matrix, vitals coverage, summaries       │
//! └───────────────────┬──────────────────────────────────────┘
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Store Layer (db/)                                       │
//! │  - LocalStore / DeltaDirStore                            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
