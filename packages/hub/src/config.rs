//! # Client configuration: `credentialhub.toml`
//!
//! ## Structure
//!
//! ```toml
//! [navigation]
//! settle_delay_ms = 50          # window in which untagged host notifications are echoes
//!
//! [reset]
//! token_ttl_secs = 3600
//! reset_link_base = "http://localhost:8080/"
//!
//! [storage]
//! key_prefix = "credentialHub_"
//!
//! [auth]
//! require_password = false
//! display_first_name = "Demo"
//! display_last_name = "User"
//! ```
//!
//! All structs derive `Default` with the production defaults, so a missing or
//! empty file is equivalent to [`HubConfig::default`].

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Failure loading or saving a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration stored in `credentialhub.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub reset: ResetConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_settle_delay_ms() -> u64 {
    50
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl NavigationConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::milliseconds(self.settle_delay_ms.min(i64::MAX as u64) as i64)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResetConfig {
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Origin + path the `#reset-password?token=…` fragment is appended to.
    #[serde(default = "default_reset_link_base")]
    pub reset_link_base: String,
}

fn default_token_ttl_secs() -> u64 {
    60 * 60
}

fn default_reset_link_base() -> String {
    "http://localhost:8080/".to_string()
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: default_token_ttl_secs(),
            reset_link_base: default_reset_link_base(),
        }
    }
}

impl ResetConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs.min(i64::MAX as u64 / 1000) as i64)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "credentialHub_".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Check the stored password hash on login. Off by default: any
    /// well-formed email/password pair is accepted.
    #[serde(default)]
    pub require_password: bool,
    #[serde(default = "default_first_name")]
    pub display_first_name: String,
    #[serde(default = "default_last_name")]
    pub display_last_name: String,
}

fn default_first_name() -> String {
    "Demo".to_string()
}

fn default_last_name() -> String {
    "User".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_password: false,
            display_first_name: default_first_name(),
            display_last_name: default_last_name(),
        }
    }
}

impl HubConfig {
    /// Builder method to set the navigation settle delay.
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.navigation.settle_delay_ms = ms;
        self
    }

    /// Builder method to set the reset token lifetime.
    pub fn with_token_ttl_secs(mut self, secs: u64) -> Self {
        self.reset.token_ttl_secs = secs;
        self
    }

    /// Builder method to require password verification on login.
    pub fn with_required_password(mut self, required: bool) -> Self {
        self.auth.require_password = required;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "credentialhub.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from `path`. A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(Self::from_toml(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
