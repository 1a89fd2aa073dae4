use std::env;
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealplanner_bulk::{BulkConfig, DispatchMode};
use mealplanner_listing::DefaultListPolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub listing: ListingConfig,
    #[serde(default)]
    pub bulk: BulkSettings,
    #[serde(default)]
    pub grocery: GroceryConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BulkSettings {
    #[serde(default)]
    pub dispatch: DispatchMode,
    #[serde(default = "default_redirect_delay_ms")]
    pub session_redirect_delay_ms: u64,
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::default(),
            session_redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl BulkSettings {
    pub fn to_bulk_config(&self) -> BulkConfig {
        BulkConfig {
            dispatch: self.dispatch,
            redirect_delay: Duration::from_millis(self.session_redirect_delay_ms),
        }
    }
}

fn default_redirect_delay_ms() -> u64 {
    1500
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPolicyKind {
    #[default]
    FirstPopulated,
    Preferred,
    Flagged,
    None,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GroceryConfig {
    #[serde(default)]
    pub default_policy: DefaultPolicyKind,
    /// Used by the `preferred` policy, highest priority first.
    #[serde(default)]
    pub preferred_names: Vec<String>,
}

impl GroceryConfig {
    pub fn policy(&self) -> DefaultListPolicy {
        match self.default_policy {
            DefaultPolicyKind::FirstPopulated => DefaultListPolicy::FirstPopulated,
            DefaultPolicyKind::Preferred => {
                DefaultListPolicy::Preferred(self.preferred_names.clone())
            }
            DefaultPolicyKind::Flagged => DefaultListPolicy::Flagged,
            DefaultPolicyKind::None => DefaultListPolicy::None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON file backing the in-memory collaborator.
    pub fixture: String,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALPLANNER__LISTING__PAGE_SIZE, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("listing.page_size", 10)?
            .set_default("data.fixture", "data/fixture.json")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALPLANNER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("grocery.preferred_names")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listing.page_size == 0 {
            return Err("Listing page_size must be at least 1".to_string());
        }
        if self.grocery.default_policy == DefaultPolicyKind::Preferred
            && self.grocery.preferred_names.iter().all(|n| n.trim().is_empty())
        {
            return Err("Grocery policy `preferred` needs at least one preferred name".to_string());
        }
        if self.data.fixture.trim().is_empty() {
            return Err("Data fixture path must not be empty".to_string());
        }
        Ok(())
    }
}
