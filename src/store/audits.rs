//! Audits table

use log::debug;

use super::Store;
use crate::client::models::Record;
use crate::client::{GristApi, RecordQuery, SortOrder};
use crate::error::Result;
use crate::models::{Audit, ProductRef};
use crate::schema::{audits, products};

fn audit_from_record(record: &Record, product: ProductRef) -> Audit {
    Audit {
        id: record.id,
        hash: record.str_field(audits::HASH).unwrap_or_default(),
        committee_date: record.timestamp_field(audits::COMMITTEE_DATE),
        closed: record.bool_field(audits::CLOSED),
        closed_at: record.timestamp_field(audits::CLOSED_AT),
        product,
    }
}

impl<C: GristApi + 'static> Store<C> {
    /// Audit with the given hash. An audit whose product cannot be found
    /// is treated as missing.
    pub async fn find_audit_by_hash(&self, hash: &str) -> Result<Option<Audit>> {
        let query = RecordQuery::new().filter_eq(audits::HASH, hash);
        let records = self.client.get_records(audits::TABLE, &query).await?;

        let Some(record) = records.into_iter().next() else {
            debug!("No audit with hash {}", hash);
            return Ok(None);
        };

        self.with_product(&record).await
    }

    /// Audit of the same product held just before `hash`, by committee date.
    pub async fn find_previous_audit(&self, product_id: i64, hash: &str) -> Result<Option<Audit>> {
        let query = RecordQuery::new()
            .filter_eq(audits::PRODUCT, product_id)
            .sort_by(audits::COMMITTEE_DATE, SortOrder::Asc);
        let records = self.client.get_records(audits::TABLE, &query).await?;

        let position = records
            .iter()
            .position(|r| r.str_field(audits::HASH).as_deref() == Some(hash));

        match position {
            Some(index) if index > 0 => self.with_product(&records[index - 1]).await,
            _ => Ok(None),
        }
    }

    async fn with_product(&self, record: &Record) -> Result<Option<Audit>> {
        let Some(product_id) = record.i64_field(audits::PRODUCT) else {
            return Ok(None);
        };

        Ok(self
            .find_product_ref(product_id)
            .await?
            .map(|product| audit_from_record(record, product)))
    }

    async fn find_product_ref(&self, product_id: i64) -> Result<Option<ProductRef>> {
        let query = RecordQuery::new().filter_eq("id", product_id);
        let records = self.client.get_records(products::TABLE, &query).await?;

        Ok(records.first().map(|r| ProductRef {
            id: r.id,
            name: r.str_field(products::NAME).unwrap_or_default(),
        }))
    }
}
