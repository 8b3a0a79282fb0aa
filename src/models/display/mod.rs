//! Display model implementations for table and JSON output
//!
//! Display models turn domain types into CLI-friendly rows with
//! upper-case column headers.

mod audit;
mod common;
mod costs;
mod product;
mod question;

pub use audit::AuditDisplay;
pub use costs::{ConsumptionDisplay, HostingDisplay, RecommendationDisplay};
pub use product::{ProductDisplay, ToolDisplay};
pub use question::QuestionDisplay;
