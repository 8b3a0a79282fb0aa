//! Generic list command handler
//!
//! Provides the common flow of list commands:
//! 1. Create command context
//! 2. Fetch data through the store
//! 3. Convert to display type
//! 4. Print output

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::GristClient;
use crate::error::Result;
use crate::output::Formattable;
use crate::store::Store;

/// Run a standard fetch → display → print list command.
///
/// # Example
///
/// ```ignore
/// run_list_command::<Product, ProductDisplay, _, _>(opts, "products", |store| async move {
///     store.find_products().await
/// })
/// .await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<Store<GristClient>>) -> Fut,
{
    let ctx = CommandContext::new(opts)?;

    debug!("Fetching {}", resource_name);
    let items = fetcher(Arc::clone(&ctx.store)).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)
}
