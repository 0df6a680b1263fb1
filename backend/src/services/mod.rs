//! Service layer: the ingestion-status reconciliation engine.
//!
//! Services sit between the store traits and the HTTP layer. Every function
//! here is a pure function of (store contents, date list): nothing is
//! cached or persisted, and per-tier failures degrade to `Missing` cells or
//! zero counts instead of aborting the query.

pub mod summary;
pub mod sync_status;
pub mod tables;
pub mod users;
pub mod vitals;

pub use summary::{daily_summary, monthly_summary, weekly_summary, SummaryOptions};
pub use sync_status::availability_matrix;
pub use users::discover_users;
pub use vitals::vitals_coverage;

#[cfg(all(test, feature = "local-repo"))]
#[path = "sync_status_tests.rs"]
mod sync_status_tests;
