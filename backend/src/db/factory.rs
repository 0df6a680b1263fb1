//! Store factory for dependency injection.
//!
//! Creates store instances from configuration or environment, behind the
//! [`PipelineStore`] trait so callers never depend on a concrete backend.

use std::str::FromStr;
use std::sync::Arc;

use super::config::MonitorConfig;
use super::repository::{PipelineStore, StoreError, StoreResult};
#[cfg(feature = "delta-repo")]
use super::repositories::DeltaDirStore;
#[cfg(feature = "local-repo")]
use super::repositories::LocalStore;

/// Store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// On-disk parquet tier tables plus the gzipped raw batch directory.
    Delta,
    /// In-memory store for tests and local development.
    Local,
}

impl FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delta" | "parquet" => Ok(Self::Delta),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown store type: {}", s)),
        }
    }
}

impl StoreType {
    /// Get the store type from the environment.
    ///
    /// Reads `STORE_TYPE`; defaults to Delta when `ETL_TABLES_DIR` is set,
    /// otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("STORE_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("ETL_TABLES_DIR").is_ok() {
            Self::Delta
        } else {
            Self::Local
        }
    }
}

/// Factory for creating store instances from configuration.
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store for the configured backend type.
    pub fn create(config: &MonitorConfig) -> StoreResult<Arc<dyn PipelineStore>> {
        match config.store_type()? {
            StoreType::Delta => {
                #[cfg(feature = "delta-repo")]
                {
                    Ok(Self::create_delta(
                        &config.store.tables_dir,
                        &config.store.raw_data_dir,
                    ))
                }
                #[cfg(not(feature = "delta-repo"))]
                {
                    Err(StoreError::Configuration(
                        "delta store feature not enabled".to_string(),
                    ))
                }
            }
            StoreType::Local => {
                #[cfg(feature = "local-repo")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-repo"))]
                {
                    Err(StoreError::Configuration(
                        "local store feature not enabled".to_string(),
                    ))
                }
            }
        }
    }

    /// Create an on-disk store rooted at the given directories, overridable
    /// via `ETL_TABLES_DIR` and `ETL_RAW_DATA_DIR`.
    #[cfg(feature = "delta-repo")]
    pub fn create_delta(tables_dir: &str, raw_dir: &str) -> Arc<dyn PipelineStore> {
        let tables_dir =
            std::env::var("ETL_TABLES_DIR").unwrap_or_else(|_| tables_dir.to_string());
        let raw_dir = std::env::var("ETL_RAW_DATA_DIR").unwrap_or_else(|_| raw_dir.to_string());
        Arc::new(DeltaDirStore::new(tables_dir, raw_dir))
    }

    /// Create an in-memory local store.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn PipelineStore> {
        Arc::new(LocalStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_type_from_str() {
        assert_eq!("local".parse::<StoreType>().unwrap(), StoreType::Local);
        assert_eq!("delta".parse::<StoreType>().unwrap(), StoreType::Delta);
        assert_eq!("Parquet".parse::<StoreType>().unwrap(), StoreType::Delta);
        assert!("oracle".parse::<StoreType>().is_err());
    }

    #[cfg(feature = "local-repo")]
    #[test]
    fn test_create_local_from_config() {
        let config = MonitorConfig::default();
        assert!(StoreFactory::create(&config).is_ok());
    }
}
