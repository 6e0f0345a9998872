//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Leave policy configuration.
    #[serde(default)]
    pub leave: LeaveConfig,
    /// Spreadsheet webhook configuration.
    #[serde(default)]
    pub sheet: SheetConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per collection.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Leave policy configuration.
///
/// The deducting leave types are listed explicitly so that the policy can be
/// audited; a label that is in neither list never touches a balance.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveConfig {
    /// Allotment given to a member whose balance is created lazily.
    #[serde(default = "default_total_days")]
    pub default_total_days: Decimal,
    /// Leave types deducted by their business-day count.
    #[serde(default = "default_annual_types")]
    pub annual_types: Vec<String>,
    /// Leave types deducted by half a day regardless of range.
    #[serde(default = "default_half_day_types")]
    pub half_day_types: Vec<String>,
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            default_total_days: default_total_days(),
            annual_types: default_annual_types(),
            half_day_types: default_half_day_types(),
        }
    }
}

fn default_total_days() -> Decimal {
    Decimal::from(15)
}

fn default_annual_types() -> Vec<String> {
    vec!["연차".to_string()]
}

fn default_half_day_types() -> Vec<String> {
    vec![
        "반차".to_string(),
        "반차(오전)".to_string(),
        "반차(오후)".to_string(),
    ]
}

/// Spreadsheet webhook configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// Webhook URL; a URL saved in the store takes precedence.
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATTENDO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.leave.default_total_days, dec!(15));
        assert_eq!(config.leave.annual_types, vec!["연차".to_string()]);
        assert_eq!(config.leave.half_day_types.len(), 3);
        assert_eq!(config.sheet.url, None);
        assert_eq!(config.sheet.timeout_secs, 30);
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("ATTENDO__STORAGE__DATA_DIR", Some("/tmp/attendo-test")),
                ("ATTENDO__SHEET__URL", Some("https://example.invalid/hook")),
                ("ATTENDO__SHEET__TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(
                    config.storage.data_dir,
                    PathBuf::from("/tmp/attendo-test")
                );
                assert_eq!(
                    config.sheet.url.as_deref(),
                    Some("https://example.invalid/hook")
                );
                assert_eq!(config.sheet.timeout_secs, 5);
                assert_eq!(config.leave.default_total_days, dec!(15));
            },
        );
    }
}
