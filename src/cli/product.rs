//! Product and tools commands

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::models::display::{ProductDisplay, ToolDisplay};
use crate::models::{ColumnOption, Product, Tool};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::schema::products;

fn product_not_found(id: i64) -> Error {
    Error::Other(format!("No product with id {}", id))
}

/// Values not among the column's allowed choices. An empty choice list
/// (unknown or unreadable column) accepts everything.
pub fn unknown_choices<'a>(values: &'a [String], choices: &[ColumnOption]) -> Vec<&'a str> {
    if choices.is_empty() {
        return Vec::new();
    }
    values
        .iter()
        .filter(|v| !choices.iter().any(|c| &c.id == *v))
        .map(String::as_str)
        .collect()
}

fn print_list(label: &str, values: &[String]) {
    if values.is_empty() {
        println!("  {:<16} {}", label, "-".dimmed());
    } else {
        println!("  {:<16} {}", label, values.join(", "));
    }
}

/// Run `product get`
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let product = ctx
        .store
        .find_product(id)
        .await?
        .ok_or_else(|| product_not_found(id))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&product)?),
        OutputFormat::Table => vec![ProductDisplay::from(&product)].print(ctx.format)?,
        OutputFormat::Pretty => {
            println!("{} {}", product.name.bold(), format!("({})", product.id).dimmed());
            if let Some(description) = &product.description {
                println!("{}", description);
            }
            println!();
            println!("  {:<16} {}", "Status", product.status.as_deref().unwrap_or("-"));
            println!("  {:<16} {}", "Type", product.project_type.as_deref().unwrap_or("-"));
            println!("  {:<16} {}", "Architecture", product.architecture.as_deref().unwrap_or("-"));
            println!("  {:<16} {}", "Repository", product.repository.as_deref().unwrap_or("-"));
            println!("  {:<16} {}", "Homepage", product.homepage.as_deref().unwrap_or("-"));
            print_list("Languages", &product.languages);
            print_list("Frontend", &product.frontend);
            print_list("Backend", &product.backend);
            print_list("Authentication", &product.authentication);
            print_list("Hosting", &product.hosting);
            print_list("Dependencies", &product.dependencies);
            print_list("Shared tools", &product.shared_tools);
            print_list("Dedicated tools", &product.dedicated_tools);
        }
    }

    Ok(())
}

/// Run `product list`
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Product, ProductDisplay, _, _>(opts, "products", |store| async move {
        store.find_products().await
    })
    .await
}

/// Run `product tools`
pub async fn tools(opts: &GlobalOptions, dedicated: bool) -> Result<()> {
    run_list_command::<Tool, ToolDisplay, _, _>(opts, "tools", |store| async move {
        store.find_tools(!dedicated).await
    })
    .await
}

/// Run `product set-tools`
pub async fn set_tools(
    opts: &GlobalOptions,
    id: i64,
    shared: Option<Vec<String>>,
    dedicated: Option<Vec<String>>,
) -> Result<()> {
    if shared.is_none() && dedicated.is_none() {
        return Err(Error::Other(
            "Nothing to change: give --shared and/or --dedicated".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    let mut product = ctx
        .store
        .find_product(id)
        .await?
        .ok_or_else(|| product_not_found(id))?;

    let lists = [
        (products::SHARED_TOOLS, shared),
        (products::DEDICATED_TOOLS, dedicated),
    ];
    for (column, values) in lists {
        let Some(values) = values else { continue };
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        let choices = ctx.store.column_options(products::TABLE, column).await;
        let unknown = unknown_choices(&values, &choices);
        if !unknown.is_empty() {
            return Err(Error::Other(format!(
                "Not allowed in {}: {}",
                column,
                unknown.join(", ")
            )));
        }

        debug!("Setting {} of product {} to {:?}", column, id, values);
        if column == products::SHARED_TOOLS {
            product.shared_tools = values;
        } else {
            product.dedicated_tools = values;
        }
    }

    ctx.store.save_product_tools(&product).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&product)?),
        _ => println!("{} Updated tools of {}", "✓".green(), product.name.bold()),
    }

    Ok(())
}
