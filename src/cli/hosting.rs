//! Hosting mapping commands

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::error::Result;
use crate::models::HostingMapping;
use crate::models::display::HostingDisplay;
use crate::output::Formattable;

/// Resolution result for one requested id
#[derive(Debug, Tabled, Serialize)]
struct ResolvedIdentifier {
    #[tabled(rename = "ID")]
    id: i64,

    #[tabled(rename = "IDENTIFIER")]
    identifier: String,
}

/// Run `hosting list`
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<HostingMapping, HostingDisplay, _, _>(
        opts,
        "hosting mappings",
        |store| async move { Ok(store.hosting().all().await?) },
    )
    .await
}

/// Run `hosting get`: every id goes through the two-tier lookup, so the
/// mapping table is fetched at most once.
pub async fn get(opts: &GlobalOptions, ids: &[i64]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let lookup = ctx.store.hosting();

    let mut rows = Vec::with_capacity(ids.len());
    for &id in ids {
        let identifier = lookup.identifier_for(id).await?;
        rows.push(ResolvedIdentifier {
            id,
            identifier: identifier.unwrap_or_else(|| "-".to_string()),
        });
    }

    let stats = lookup.stats();
    debug!(
        "Hosting lookup caches: {} identifiers, {} mappings",
        stats.identifier_cache_size, stats.mapping_cache_size
    );

    rows.print(ctx.format)
}
