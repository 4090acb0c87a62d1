//! # Pipeline Configuration
//!
//! Recipients and validation limits for the processing pipeline.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDERFLOW_MANAGER_RECIPIENT=@night_shift                           │
//! │     ORDERFLOW_BUDGET_ITEM_LIMIT=5                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     caller-supplied path, else ~/.config/orderflow/orderflow.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     @warehouse_manager, system, 3 items, "Nowhere"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # orderflow.toml
//! [notification]
//! manager_recipient = "@warehouse_manager"
//! audit_recipient = "system"
//!
//! [validation]
//! budget_item_limit = 3
//! unshippable_city = "Nowhere"
//! ```

use std::path::{Path, PathBuf};

use orderflow_core::ValidationRules;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

pub const ENV_MANAGER_RECIPIENT: &str = "ORDERFLOW_MANAGER_RECIPIENT";
pub const ENV_AUDIT_RECIPIENT: &str = "ORDERFLOW_AUDIT_RECIPIENT";
pub const ENV_BUDGET_ITEM_LIMIT: &str = "ORDERFLOW_BUDGET_ITEM_LIMIT";
pub const ENV_UNSHIPPABLE_CITY: &str = "ORDERFLOW_UNSHIPPABLE_CITY";

// =============================================================================
// Notification Settings
// =============================================================================

/// Fixed recipients of the internal messages.
///
/// The customer confirmation always goes to the order's own contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Receives the "New Order Alert".
    #[serde(default = "default_manager_recipient")]
    pub manager_recipient: String,

    /// Receives the "ORDER_PROCESSED" audit record.
    #[serde(default = "default_audit_recipient")]
    pub audit_recipient: String,
}

fn default_manager_recipient() -> String {
    "@warehouse_manager".to_string()
}

fn default_audit_recipient() -> String {
    "system".to_string()
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            manager_recipient: default_manager_recipient(),
            audit_recipient: default_audit_recipient(),
        }
    }
}

// =============================================================================
// Main Pipeline Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub notification: NotificationSettings,

    #[serde(default)]
    pub validation: ValidationRules,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform default), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
        {
            if path.exists() {
                info!(?path, "Loading pipeline config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pipeline config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates an in-memory TOML document. Environment is ignored.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.notification.manager_recipient.is_empty() {
            return Err(ConfigError::Invalid(
                "notification.manager_recipient must not be empty".into(),
            ));
        }

        if self.notification.audit_recipient.is_empty() {
            return Err(ConfigError::Invalid(
                "notification.audit_recipient must not be empty".into(),
            ));
        }

        if self.validation.budget_item_limit == 0 {
            return Err(ConfigError::Invalid(
                "validation.budget_item_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderflow", "orderflow")
            .map(|dirs| dirs.config_dir().join("orderflow.toml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable numbers are ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(recipient) = lookup(ENV_MANAGER_RECIPIENT) {
            debug!(recipient = %recipient, "Overriding manager recipient from environment");
            self.notification.manager_recipient = recipient;
        }

        if let Some(recipient) = lookup(ENV_AUDIT_RECIPIENT) {
            debug!(recipient = %recipient, "Overriding audit recipient from environment");
            self.notification.audit_recipient = recipient;
        }

        if let Some(limit) = lookup(ENV_BUDGET_ITEM_LIMIT) {
            match limit.parse::<usize>() {
                Ok(n) => self.validation.budget_item_limit = n,
                Err(_) => warn!(value = %limit, "Ignoring non-numeric budget item limit"),
            }
        }

        if let Some(city) = lookup(ENV_UNSHIPPABLE_CITY) {
            self.validation.unshippable_city = city;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
