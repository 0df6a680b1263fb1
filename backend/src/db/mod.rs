//! Store access for the tier tables and raw batches.
//!
//! This module follows the Repository pattern: the service layer consumes
//! the abstract [`PipelineStore`] trait, and concrete backends (on-disk
//! parquet, in-memory) are swapped via the factory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - reconciliation engine      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Store Traits (repository/) - TierStore / RawStore      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  DeltaDirStore │ LocalStore  │
//!     │   (parquet)    │ (in-memory) │
//!     └──────────────────────────────┘
//! ```

#[cfg(not(any(feature = "delta-repo", feature = "local-repo")))]
compile_error!("Enable at least one store backend feature.");

pub mod config;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use config::MonitorConfig;
pub use factory::{StoreFactory, StoreType};
#[cfg(feature = "delta-repo")]
pub use repositories::DeltaDirStore;
#[cfg(feature = "local-repo")]
pub use repositories::LocalStore;
pub use repository::{PipelineStore, RawStore, StoreError, StoreResult, TierStore};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global store instance initialized once per process.
static STORE: OnceLock<Arc<dyn PipelineStore>> = OnceLock::new();

/// Initialize the global store singleton from `monitor.toml` or, when no
/// config file is present, from the environment defaults.
pub fn init_store() -> Result<()> {
    if STORE.get().is_some() {
        return Ok(());
    }

    let config = MonitorConfig::from_default_location().unwrap_or_default();
    let store = StoreFactory::create(&config)
        .map_err(|e| anyhow::Error::msg(e.to_string()))
        .context("failed to create store backend")?;
    let _ = STORE.set(store);
    Ok(())
}

/// Get a reference to the global store instance.
pub fn get_store() -> Result<&'static Arc<dyn PipelineStore>> {
    if STORE.get().is_none() {
        let _ = init_store();
    }

    STORE
        .get()
        .context("store not initialized. Call init_store() first.")
}
