//! Infrastructure cost commands

use chrono::NaiveDate;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::error::{Error, Result};
use crate::models::Consumption;
use crate::models::display::ConsumptionDisplay;

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| Error::Other(format!("Invalid month '{}', expected YYYY-MM", value)))
}

/// Run `consumption list`
pub async fn list(
    opts: &GlobalOptions,
    product: i64,
    last_month: bool,
    month: Option<&str>,
) -> Result<()> {
    let month = month.map(parse_month).transpose()?;

    run_list_command::<Consumption, ConsumptionDisplay, _, _>(
        opts,
        "consumptions",
        |store| async move {
            match (month, last_month) {
                (Some(start), _) => store.find_consumptions_for_month(product, start).await,
                (None, true) => store.find_last_month_consumptions(product).await,
                (None, false) => store.find_consumptions(product).await,
            }
        },
    )
    .await
}
