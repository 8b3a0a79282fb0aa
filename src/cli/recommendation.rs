//! Recommendation commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::product::unknown_choices;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::models::Recommendation;
use crate::models::display::RecommendationDisplay;
use crate::output::json::format_json;
use crate::schema::recommendations;

/// Run `recommendation list`
pub async fn list(
    opts: &GlobalOptions,
    product: i64,
    status: Option<String>,
    pending: bool,
) -> Result<()> {
    run_list_command::<Recommendation, RecommendationDisplay, _, _>(
        opts,
        "recommendations",
        |store| async move {
            match (status, pending) {
                (Some(status), _) => store.find_recommendations_with_status(product, &status).await,
                (None, true) => store.find_pending_recommendations(product).await,
                (None, false) => store.find_recommendations(product).await,
            }
        },
    )
    .await
}

/// Run `recommendation set-status`
pub async fn set_status(opts: &GlobalOptions, id: i64, status: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let choices = ctx
        .store
        .column_options(recommendations::TABLE, recommendations::STATUS)
        .await;
    let requested = [status.to_string()];
    if !unknown_choices(&requested, &choices).is_empty() {
        let allowed: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        return Err(Error::Other(format!(
            "Unknown status '{}'. Allowed: {}",
            status,
            allowed.join(", ")
        )));
    }

    ctx.store.update_recommendation_status(id, status).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({"id": id, "status": status}))?
        ),
        _ => println!(
            "{} Recommendation {} set to {}",
            "✓".green(),
            id,
            status.bold()
        ),
    }

    Ok(())
}
