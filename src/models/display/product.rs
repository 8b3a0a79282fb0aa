//! Product and tool display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{join_list, or_dash};
use crate::models::{Product, Tool};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProductDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SHARED TOOLS")]
    pub shared_tools: String,

    #[tabled(rename = "DEDICATED TOOLS")]
    pub dedicated_tools: String,
}

impl From<&Product> for ProductDisplay {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            status: or_dash(product.status.as_deref()),
            shared_tools: join_list(&product.shared_tools),
            dedicated_tools: join_list(&product.dedicated_tools),
        }
    }
}

impl From<Product> for ProductDisplay {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ToolDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<Tool> for ToolDisplay {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id,
            name: tool.name,
        }
    }
}
