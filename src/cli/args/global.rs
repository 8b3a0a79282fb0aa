//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence for connection settings is: CLI flag > environment variable >
/// config file. This struct captures the flag/env layer; the config file is
/// merged in by `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, `None` when neither flag nor env var was given
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.auditop/config.yaml)
    pub config: Option<String>,

    pub api_url: Option<String>,

    pub api_key: Option<String>,

    pub doc_id: Option<String>,
}

impl GlobalOptions {
    /// Build from the parsed CLI, once, in main.rs
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            api_key: cli.api_key.clone(),
            doc_id: cli.doc_id.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn doc_id_ref(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            config: Some("/custom/path".to_string()),
            api_url: Some("http://localhost:8484/api".to_string()),
            api_key: Some("key".to_string()),
            doc_id: Some("doc".to_string()),
        };

        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.api_url_ref(), Some("http://localhost:8484/api"));
        assert_eq!(opts.doc_id_ref(), Some("doc"));
    }

    #[test]
    fn test_global_options_none_accessors() {
        let opts = GlobalOptions::default();

        assert_eq!(opts.format, None);
        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_url_ref(), None);
        assert_eq!(opts.doc_id_ref(), None);
    }
}
