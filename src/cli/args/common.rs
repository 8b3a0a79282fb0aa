//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse the `format` preference stored in the config file
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
