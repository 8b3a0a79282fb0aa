//! Products, tools catalogue and column choices

use log::{debug, warn};
use serde_json::{Map, Value};

use super::Store;
use crate::client::models::{Record, UpdateRecord, to_grist_list};
use crate::client::{GristApi, RecordQuery};
use crate::error::{Error, Result};
use crate::models::{ColumnOption, Product, Tool};
use crate::schema::{products, tools};

fn product_from_record(record: &Record) -> Product {
    Product {
        id: record.id,
        name: record.str_field(products::NAME).unwrap_or_default(),
        startup_id: record.i64_field(products::STARTUP),
        status: record.str_field(products::STATUS),
        project_type: record.str_field(products::PROJECT_TYPE),
        architecture: record.str_field(products::ARCHITECTURE),
        languages: record.list_field(products::LANGUAGES),
        description: record.str_field(products::DESCRIPTION),
        repository: record.str_field(products::REPOSITORY),
        homepage: record.str_field(products::HOMEPAGE),
        dependencies: record.list_field(products::DEPENDENCIES),
        shared_tools: record.list_field(products::SHARED_TOOLS),
        dedicated_tools: record.list_field(products::DEDICATED_TOOLS),
        hosting: record.list_field(products::HOSTING),
        frontend: record.list_field(products::FRONTEND),
        backend: record.list_field(products::BACKEND),
        authentication: record.list_field(products::AUTHENTICATION),
    }
}

/// Parse the `choices` array out of a column's `widgetOptions` JSON.
fn choices_from_widget_options(raw: &str) -> std::result::Result<Vec<ColumnOption>, String> {
    let options: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let Some(choices) = options.get("choices").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(choices
        .iter()
        .filter_map(Value::as_str)
        .map(|choice| ColumnOption {
            id: choice.to_string(),
            label: choice.to_string(),
        })
        .collect())
}

impl<C: GristApi + 'static> Store<C> {
    pub async fn find_product(&self, id: i64) -> Result<Option<Product>> {
        let query = RecordQuery::new().filter_eq("id", id);
        let records = self.client.get_records(products::TABLE, &query).await?;
        Ok(records.first().map(product_from_record))
    }

    pub async fn find_products(&self) -> Result<Vec<Product>> {
        let records = self
            .client
            .get_records(products::TABLE, &RecordQuery::new())
            .await?;
        Ok(records.iter().map(product_from_record).collect())
    }

    /// Write the product's shared and dedicated tool lists.
    pub async fn save_product_tools(&self, product: &Product) -> Result<()> {
        if product.id <= 0 {
            return Err(Error::Other("Invalid product: missing id".to_string()));
        }

        let mut fields = Map::new();
        fields.insert(
            products::SHARED_TOOLS.to_string(),
            to_grist_list(&product.shared_tools),
        );
        fields.insert(
            products::DEDICATED_TOOLS.to_string(),
            to_grist_list(&product.dedicated_tools),
        );

        let update = UpdateRecord {
            id: product.id,
            fields,
        };
        self.client.patch_records(products::TABLE, &[update]).await?;
        debug!("Saved tools for product {}", product.id);
        Ok(())
    }

    /// Tools catalogue, shared or dedicated, sorted by name.
    pub async fn find_tools(&self, shared: bool) -> Result<Vec<Tool>> {
        let query = RecordQuery::new()
            .filter_eq(tools::KIND, tools::KIND_TOOL)
            .filter_eq(tools::SHARED, shared);
        let records = self.client.get_records(tools::TABLE, &query).await?;

        let mut tools: Vec<Tool> = records
            .iter()
            .map(|r| Tool {
                id: r.id,
                name: r.str_field(tools::NAME).unwrap_or_default(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tools)
    }

    /// Allowed values of a choice column. Failures are logged and yield an
    /// empty list.
    pub async fn column_options(&self, table: &str, column: &str) -> Vec<ColumnOption> {
        let columns = match self.client.list_columns(table).await {
            Ok(columns) => columns,
            Err(e) => {
                warn!("Failed to fetch column options for {}: {}", column, e);
                return Vec::new();
            }
        };

        let Some(raw) = columns
            .into_iter()
            .find(|c| c.id == column)
            .and_then(|c| c.fields.widget_options)
        else {
            return Vec::new();
        };

        choices_from_widget_options(&raw).unwrap_or_else(|e| {
            warn!("Error parsing widgetOptions for column {}: {}", column, e);
            Vec::new()
        })
    }
}
