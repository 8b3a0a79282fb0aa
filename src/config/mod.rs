//! Configuration management for auditop

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::autosave::buffer::{DEFAULT_DELAY, DEFAULT_THRESHOLD};
use crate::cache::CacheTtl;
use crate::client::grist::DEFAULT_TIMEOUT;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Grist API root, e.g. `https://grist.example.org/api`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Grist API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Grist document holding the audit tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Quiet window before buffered answers are written
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    /// Pending edit count above which the buffer writes immediately
    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: usize,

    /// Lifetime of cached id -> identifier strings. Zero or negative disables it.
    #[serde(default = "default_identifier_ttl_ms")]
    pub identifier_ttl_ms: i64,

    /// Lifetime of cached hosting mapping records. Zero or negative disables it.
    #[serde(default = "default_mapping_ttl_ms")]
    pub mapping_ttl_ms: i64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}

fn default_flush_threshold() -> usize {
    DEFAULT_THRESHOLD
}

fn default_identifier_ttl_ms() -> i64 {
    CacheTtl::IDENTIFIERS.as_millis() as i64
}

fn default_mapping_ttl_ms() -> i64 {
    CacheTtl::HOSTING_MAPPINGS.as_millis() as i64
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            autosave_delay_ms: default_autosave_delay_ms(),
            flush_threshold: default_flush_threshold(),
            identifier_ttl_ms: default_identifier_ttl_ms(),
            mapping_ttl_ms: default_mapping_ttl_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Preferences {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".auditop").join("config.yaml"))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise from the default location.
    /// A missing file yields an empty config so env/flag overrides can fill it.
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };

        match Self::load_from(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Grist document base URL: `<api_url>/docs/<doc_id>`
    pub fn doc_url(&self) -> Result<String> {
        self.validate()?;
        let api_url = self.api_url.as_deref().unwrap_or_default();
        let doc_id = self.doc_id.as_deref().unwrap_or_default();
        Ok(format!("{}/docs/{}", api_url.trim_end_matches('/'), doc_id))
    }

    /// Validate that required connection settings are present
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.api_url) {
            return Err(ConfigError::MissingApiUrl.into());
        }
        if is_blank(&self.api_key) {
            return Err(ConfigError::MissingApiKey.into());
        }
        if is_blank(&self.doc_id) {
            return Err(ConfigError::MissingDocId.into());
        }
        if self.preferences.flush_threshold == 0 {
            return Err(ConfigError::Invalid("flush_threshold must be at least 1".to_string()).into());
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or_default().is_empty()
}
