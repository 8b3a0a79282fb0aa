//! Recommendations table

use serde_json::{Map, Value};

use super::Store;
use crate::client::models::{Record, UpdateRecord};
use crate::client::{GristApi, RecordQuery, SortOrder};
use crate::error::Result;
use crate::models::Recommendation;
use crate::schema::recommendations;

fn recommendation_from_record(record: &Record) -> Recommendation {
    Recommendation {
        id: record.id,
        product_id: record.i64_field(recommendations::PRODUCT),
        text: record.str_field(recommendations::TEXT).unwrap_or_default(),
        status: record.str_field(recommendations::STATUS),
        priority: record.str_field(recommendations::PRIORITY),
        committee: record.str_field(recommendations::COMMITTEE),
    }
}

fn by_product(product_id: i64) -> RecordQuery {
    RecordQuery::new()
        .filter_eq(recommendations::PRODUCT, product_id)
        .sort_by(recommendations::PRIORITY, SortOrder::Desc)
}

impl<C: GristApi + 'static> Store<C> {
    /// Recommendations for a product, highest priority first
    pub async fn find_recommendations(&self, product_id: i64) -> Result<Vec<Recommendation>> {
        self.fetch_recommendations(by_product(product_id)).await
    }

    pub async fn find_recommendations_with_status(
        &self,
        product_id: i64,
        status: &str,
    ) -> Result<Vec<Recommendation>> {
        let query = by_product(product_id).filter_eq(recommendations::STATUS, status);
        self.fetch_recommendations(query).await
    }

    /// Recommendations not yet marked done
    pub async fn find_pending_recommendations(
        &self,
        product_id: i64,
    ) -> Result<Vec<Recommendation>> {
        let all = self.find_recommendations(product_id).await?;
        Ok(all.into_iter().filter(|r| !r.is_done()).collect())
    }

    pub async fn update_recommendation_status(&self, id: i64, status: &str) -> Result<()> {
        let mut fields = Map::new();
        fields.insert(
            recommendations::STATUS.to_string(),
            Value::from(status.to_string()),
        );
        self.client
            .patch_records(recommendations::TABLE, &[UpdateRecord { id, fields }])
            .await?;
        Ok(())
    }

    async fn fetch_recommendations(&self, query: RecordQuery) -> Result<Vec<Recommendation>> {
        let records = self
            .client
            .get_records(recommendations::TABLE, &query)
            .await?;
        Ok(records.iter().map(recommendation_from_record).collect())
    }
}
