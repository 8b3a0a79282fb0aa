//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::{config_path, resolve_config};
use crate::client::{ColumnsApi, GristClient};
use crate::error::Result;
use crate::schema::audits;

/// Run the init command: prompt for connection settings, check them
/// against the document and save the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = resolve_config(opts)?;

    println!("{}", "Welcome to auditop!".bold().green());
    println!("Let's connect to the Grist document holding your audits.\n");

    let mut url_prompt = Input::<String>::with_theme(&theme).with_prompt("Grist API URL");
    if let Some(url) = &config.api_url {
        url_prompt = url_prompt.default(url.clone());
    }
    let api_url: String = url_prompt.interact_text()?;

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Grist API key")
        .interact()?;

    let mut doc_prompt = Input::<String>::with_theme(&theme).with_prompt("Document id");
    if let Some(doc_id) = &config.doc_id {
        doc_prompt = doc_prompt.default(doc_id.clone());
    }
    let doc_id: String = doc_prompt.interact_text()?;

    config.api_url = Some(api_url.trim().to_string());
    config.api_key = Some(api_key);
    config.doc_id = Some(doc_id.trim().to_string());

    println!("\n{}", "Checking access to the document...".cyan());
    let client = GristClient::new(
        config.doc_url()?,
        config.api_key.clone().unwrap_or_default(),
        config.preferences.request_timeout(),
    )?;

    match client.list_columns(audits::TABLE).await {
        Ok(_) => println!("{}", "✓ Document reachable".green()),
        Err(e) => {
            println!("{} {}", "⚠".yellow(), e);
            let save_anyway = Confirm::with_theme(&theme)
                .with_prompt("Save this configuration anyway?")
                .default(false)
                .interact()?;
            if !save_anyway {
                println!("Nothing saved.");
                return Ok(());
            }
        }
    }

    let path = config_path(opts)?;
    config.save_to(path.clone())?;

    println!("\n{} Configuration saved to: {}", "✓".green(), path.display());
    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "auditop status".cyan());
    println!("  {} - List products", "auditop product list".cyan());

    Ok(())
}
