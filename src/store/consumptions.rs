//! Consumptions (infrastructure costs) table

use chrono::{Datelike, NaiveDate};
use log::warn;

use super::Store;
use crate::client::models::Record;
use crate::client::{GristApi, RecordQuery, SortOrder};
use crate::error::Result;
use crate::models::Consumption;
use crate::schema::consumptions;

/// First day of the month before the one containing `today`.
pub fn first_day_of_previous_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = match today.month() {
        1 => (today.year() - 1, 12),
        m => (today.year(), m - 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

impl<C: GristApi + 'static> Store<C> {
    pub async fn find_consumptions(&self, product_id: i64) -> Result<Vec<Consumption>> {
        let query = RecordQuery::new().filter_eq(consumptions::PRODUCT, product_id);
        self.fetch_consumptions(query).await
    }

    /// Costs recorded for a given month start, most expensive first.
    pub async fn find_consumptions_for_month(
        &self,
        product_id: i64,
        month_start: NaiveDate,
    ) -> Result<Vec<Consumption>> {
        let epoch = month_start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();

        let query = RecordQuery::new()
            .filter_eq(consumptions::PRODUCT, product_id)
            .filter_eq(consumptions::DATE, epoch)
            .sort_by(consumptions::COST, SortOrder::Desc);
        self.fetch_consumptions(query).await
    }

    pub async fn find_last_month_consumptions(&self, product_id: i64) -> Result<Vec<Consumption>> {
        let today = chrono::Utc::now().date_naive();
        self.find_consumptions_for_month(product_id, first_day_of_previous_month(today))
            .await
    }

    async fn fetch_consumptions(&self, query: RecordQuery) -> Result<Vec<Consumption>> {
        let records = self
            .client
            .get_records(consumptions::TABLE, &query)
            .await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            rows.push(self.consumption_from_record(record).await?);
        }
        Ok(rows)
    }

    async fn consumption_from_record(&self, record: &Record) -> Result<Consumption> {
        let identifier = match record.i64_field(consumptions::IDENTIFIER) {
            Some(mapping_id) => {
                let resolved = self.hosting.identifier_for(mapping_id).await?;
                if resolved.is_none() {
                    warn!(
                        "Consumption {} references unknown hosting mapping {}",
                        record.id, mapping_id
                    );
                }
                resolved
            }
            None => None,
        };

        Ok(Consumption {
            id: record.id,
            product_id: record.i64_field(consumptions::PRODUCT),
            tool: record.str_field(consumptions::TOOL),
            identifier,
            cost: record.f64_field(consumptions::COST).unwrap_or_default(),
            detail: record.str_field(consumptions::DETAIL),
            date: record.timestamp_field(consumptions::DATE),
        })
    }
}
