//! Product, tool and column-choice models

use serde::{Deserialize, Serialize};

/// A product under audit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub startup_id: Option<i64>,
    pub status: Option<String>,
    pub project_type: Option<String>,
    pub architecture: Option<String>,
    pub languages: Vec<String>,
    pub description: Option<String>,
    pub repository: Option<String>,
    pub homepage: Option<String>,
    pub dependencies: Vec<String>,
    pub shared_tools: Vec<String>,
    pub dedicated_tools: Vec<String>,
    pub hosting: Vec<String>,
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub authentication: Vec<String>,
}

/// Entry of the shared/dedicated tools catalogue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub id: i64,
    pub name: String,
}

/// One allowed value of a Grist choice column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnOption {
    pub id: String,
    pub label: String,
}
