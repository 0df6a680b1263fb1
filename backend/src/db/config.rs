//! Monitoring configuration file support.
//!
//! Reads `monitor.toml` describing which store backend to use, where the
//! pipeline's output lives, the expected silver fan-out, and the optional
//! dashboard settings overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::factory::StoreType;
use super::repository::StoreError;

/// Top-level configuration from `monitor.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub settings: DashboardSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Store backend selection and filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(rename = "type", default = "default_store_type")]
    pub store_type: String,
    /// Directory containing one subdirectory of parquet parts per tier.
    #[serde(default = "default_tables_dir")]
    pub tables_dir: String,
    /// Directory of gzipped raw batch files.
    #[serde(default = "default_raw_dir")]
    pub raw_data_dir: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_type: default_store_type(),
            tables_dir: default_tables_dir(),
            raw_data_dir: default_raw_dir(),
        }
    }
}

/// Pipeline-shape constants used by the reconciliation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Expected number of silver records per raw record. The current
    /// pipeline copies every bronze record into each of the three silver
    /// tables, but the constant is configuration rather than a literal.
    #[serde(default = "default_fanout")]
    pub silver_fanout: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            silver_fanout: default_fanout(),
        }
    }
}

/// Dashboard-level overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// When set, replaces the computed `total_users` in summaries.
    #[serde(default)]
    pub total_users: Option<usize>,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_store_type() -> String {
    "local".to_string()
}

fn default_tables_dir() -> String {
    "delta_tables".to_string()
}

fn default_raw_dir() -> String {
    "data".to_string()
}

fn default_fanout() -> u64 {
    3
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl MonitorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::Configuration(format!("failed to read config file: {}", e))
        })?;

        toml::from_str(&content)
            .map_err(|e| StoreError::Configuration(format!("failed to parse config file: {}", e)))
    }

    /// Load configuration from the default locations.
    ///
    /// Searches for `monitor.toml` in the current directory, `backend/`, and
    /// the parent directory, in that order.
    pub fn from_default_location() -> Result<Self, StoreError> {
        let search_paths = [
            PathBuf::from("monitor.toml"),
            PathBuf::from("backend/monitor.toml"),
            PathBuf::from("../monitor.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(StoreError::Configuration(
            "no monitor.toml found in standard locations".to_string(),
        ))
    }

    /// Get the store backend type from configuration.
    pub fn store_type(&self) -> Result<StoreType, StoreError> {
        self.store
            .store_type
            .parse()
            .map_err(StoreError::Configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::factory::StoreType;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[store]
type = "local"
"#;

        let config: MonitorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.store.store_type, "local");
        assert_eq!(config.store_type().unwrap(), StoreType::Local);
        assert_eq!(config.pipeline.silver_fanout, 3);
        assert_eq!(config.settings.total_users, None);
    }

    #[test]
    fn test_parse_delta_config() {
        let toml = r#"
[store]
type = "delta"
tables_dir = "/srv/etl/delta_tables"
raw_data_dir = "/srv/etl/data"

[pipeline]
silver_fanout = 3

[settings]
total_users = 42

[server]
host = "127.0.0.1"
port = 9090
"#;

        let config: MonitorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.store_type().unwrap(), StoreType::Delta);
        assert_eq!(config.store.tables_dir, "/srv/etl/delta_tables");
        assert_eq!(config.settings.total_users, Some(42));
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.store.store_type, "local");
        assert_eq!(config.store.tables_dir, "delta_tables");
        assert_eq!(config.store.raw_data_dir, "data");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_unknown_store_type_rejected() {
        let toml = r#"
[store]
type = "mysql"
"#;
        let config: MonitorConfig = toml::from_str(toml).unwrap();
        assert!(config.store_type().is_err());
    }
}
