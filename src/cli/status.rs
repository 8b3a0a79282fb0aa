//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::context::{config_path, resolve_config};
use crate::client::ColumnsApi;
use crate::config::Config;
use crate::error::Result;
use crate::schema::audits;

/// `abcd...wxyz`, enough to tell keys apart
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn print_setting(label: &str, value: Option<&str>, hint: &str) {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => println!("{} {}: {}", "✓".green(), label, value),
        None => {
            println!("{} {} not configured", "✗".red(), label);
            println!("  → {}", hint);
        }
    }
}

fn print_preferences(config: &Config) {
    let prefs = &config.preferences;
    println!();
    println!("Preferences:");
    println!("  Autosave delay:    {} ms", prefs.autosave_delay_ms);
    println!("  Flush threshold:   {} edits", prefs.flush_threshold);
    println!("  Identifier cache:  {} ms", prefs.identifier_ttl_ms);
    println!("  Mapping cache:     {} ms", prefs.mapping_ttl_ms);
    println!("  Request timeout:   {} s", prefs.request_timeout_secs);
}

/// Run the status command: show configuration and, when complete, check
/// that the document answers.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "auditop Configuration Status".bold());

    let path = config_path(opts)?;
    if path.exists() {
        println!("Config file: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    let config = resolve_config(opts)?;
    print_setting(
        "API URL",
        config.api_url.as_deref(),
        "Run 'auditop init' or set AUDITOP_API_URL",
    );
    print_setting(
        "API key",
        config.api_key.as_deref().map(mask_key).as_deref(),
        "Run 'auditop init' or set AUDITOP_API_KEY",
    );
    print_setting(
        "Document",
        config.doc_id.as_deref(),
        "Run 'auditop init' or set AUDITOP_DOC_ID",
    );
    print_preferences(&config);
    println!();

    if config.validate().is_err() {
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    match ctx.store.client().list_columns(audits::TABLE).await {
        Ok(_) => println!("{} Document reachable", "✓".green()),
        Err(e) => println!("{} {}", "✗".red(), e),
    }

    Ok(())
}
