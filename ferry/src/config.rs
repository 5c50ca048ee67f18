//! Configuration management for the gateway
//!
//! Loaded from a TOML file; every field has a serde default so a partial
//! file (or none at all) yields a working development configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GatewayConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub bulk: BulkConfig,
    #[serde(default)]
    pub search: SearchDefaults,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub provision: ProvisionConfig,
}

/// Engine endpoint and transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Engine base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Target index when the caller does not name one
    #[serde(default = "default_index")]
    pub index: String,
    /// Legacy mapping type name
    #[serde(default = "default_type_name")]
    pub type_name: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Highest status code data operations treat as success
    #[serde(default = "default_success_ceiling")]
    pub success_ceiling: u16,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_base_url() -> String {
    "http://127.0.0.1:9200".to_string()
}

fn default_index() -> String {
    "docs".to_string()
}

fn default_type_name() -> String {
    "docs_type".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_success_ceiling() -> u16 {
    210
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index: default_index(),
            type_name: default_type_name(),
            timeout_secs: default_timeout_secs(),
            success_ceiling: default_success_ceiling(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry behaviour for outbound engine calls
///
/// One attempt and no backoff by default; the gateway itself never retries
/// unless a deployment opts in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: 0,
        }
    }
}

/// Bulk write settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkConfig {
    /// Maximum documents per bulk batch
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    2
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

/// Pagination defaults and clamps used by the query translator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchDefaults {
    /// Result count when the caller gives none (or a non-positive one)
    #[serde(default = "default_page_size")]
    pub default_size: i64,
    /// Largest page size accepted as given
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
    /// Size substituted when the caller exceeds `max_page_size`
    ///
    /// Legacy clients depend on the 5000 jump; see DESIGN.md before changing.
    #[serde(default = "default_overflow_size")]
    pub overflow_size: i64,
}

fn default_page_size() -> i64 {
    15
}

fn default_max_page_size() -> i64 {
    50
}

fn default_overflow_size() -> i64 {
    5000
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_size: default_page_size(),
            max_page_size: default_max_page_size(),
            overflow_size: default_overflow_size(),
        }
    }
}

/// Custom analyzer word file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DictionaryConfig {
    #[serde(default = "default_dictionary_path")]
    pub path: String,
}

fn default_dictionary_path() -> String {
    "doc/es_ik_custom.txt".to_string()
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
        }
    }
}

/// Canonical defaults for index/template provisioning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvisionConfig {
    #[serde(default = "default_shards")]
    pub number_of_shards: u32,
    #[serde(default = "default_replicas")]
    pub number_of_replicas: u32,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
    #[serde(default = "default_max_result_window")]
    pub max_result_window: u64,
    /// Text analyzer applied by the default dynamic templates
    #[serde(default = "default_analyzer")]
    pub analyzer: String,
}

fn default_shards() -> u32 {
    1
}

fn default_replicas() -> u32 {
    1
}

fn default_refresh_interval() -> String {
    "5s".to_string()
}

fn default_max_result_window() -> u64 {
    100_000
}

fn default_analyzer() -> String {
    "ik_max_word".to_string()
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            number_of_shards: default_shards(),
            number_of_replicas: default_replicas(),
            refresh_interval: default_refresh_interval(),
            max_result_window: default_max_result_window(),
            analyzer: default_analyzer(),
        }
    }
}

impl GatewayConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))
    }

    /// Load, writing a default file first if none exists
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::load(path)
    }

    /// Save to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.engine.timeout_secs, 5);
        assert_eq!(config.engine.success_ceiling, 210);
        assert_eq!(config.engine.retry.max_attempts, 1);
        assert_eq!(config.bulk.max_rows, 2);
        assert_eq!(config.search.default_size, 15);
        assert_eq!(config.search.max_page_size, 50);
        assert_eq!(config.search.overflow_size, 5000);
        assert_eq!(config.provision.number_of_shards, 1);
        assert_eq!(config.provision.analyzer, "ik_max_word");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [engine]
            base_url = "http://es.internal:9200"
            index = "hotels"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.base_url, "http://es.internal:9200");
        assert_eq!(config.engine.index, "hotels");
        assert_eq!(config.engine.timeout_secs, 5);
        assert_eq!(config.bulk.max_rows, 2);
    }

    #[test]
    fn test_load_or_create_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferry.toml");

        let created = GatewayConfig::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = GatewayConfig::load(&path).unwrap();
        assert_eq!(created.engine.base_url, loaded.engine.base_url);
        assert_eq!(created.bulk.max_rows, loaded.bulk.max_rows);
    }

    #[test]
    fn test_retry_config_from_file() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [engine.retry]
            max_attempts = 3
            backoff_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.retry.max_attempts, 3);
        assert_eq!(config.engine.retry.backoff_ms, 250);
    }
}
