//! Command execution context
//!
//! Loads configuration, applies flag/env overrides and builds the Grist
//! client and store shared by every command that talks to the document.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::autosave::WriteBuffer;
use crate::cache::{HostingLookup, TtlCache};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::GristClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::store::Store;

pub struct CommandContext {
    /// Merged configuration (file + overrides), already validated
    pub config: Config,
    /// Arc-wrapped so list fetchers can own a handle
    pub store: Arc<Store<GristClient>>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a context, failing when connection settings are incomplete.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(opts)?;
        config.validate()?;

        let prefs = &config.preferences;
        let api_key = config.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let doc_url = config.doc_url()?;
        debug!("Using Grist document {}", doc_url);

        let client = Arc::new(GristClient::new(doc_url, api_key, prefs.request_timeout())?);
        let hosting = HostingLookup::with_caches(
            Arc::clone(&client),
            TtlCache::from_millis(prefs.identifier_ttl_ms),
            TtlCache::from_millis(prefs.mapping_ttl_ms),
        );
        let store = Arc::new(Store::with_lookup(client, hosting));
        let format = resolve_format(opts, &config);

        Ok(Self {
            config,
            store,
            format,
        })
    }

    /// A fresh write buffer configured from preferences
    pub fn write_buffer(&self) -> WriteBuffer<GristClient> {
        let prefs = &self.config.preferences;
        WriteBuffer::with_settings(
            Arc::clone(self.store.client()),
            prefs.autosave_delay(),
            prefs.flush_threshold,
        )
    }
}

/// Config file location: `--config`/`AUDITOP_CONFIG`, else the default path
pub fn config_path(opts: &GlobalOptions) -> Result<PathBuf> {
    match opts.config_ref() {
        Some(path) => Ok(PathBuf::from(path)),
        None => Config::default_path(),
    }
}

/// Load the config file (missing is fine) and apply flag/env overrides.
pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_or_default(Some(config_path(opts)?))?;

    if let Some(url) = &opts.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(key) = &opts.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(doc) = &opts.doc_id {
        config.doc_id = Some(doc.clone());
    }

    Ok(config)
}

/// Flag/env format first, then the config preference, then pretty
pub fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    opts.format
        .or_else(|| {
            config
                .preferences
                .format
                .as_deref()
                .and_then(OutputFormat::from_preference)
        })
        .unwrap_or_default()
}
