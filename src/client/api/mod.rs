//! API trait definitions split by responsibility
//!
//! - [`RecordsApi`] - Row reads and writes
//! - [`ColumnsApi`] - Table schema metadata
//!
//! The [`GristApi`](super::GristApi) super-trait combines both.

mod columns;
mod records;

pub use columns::ColumnsApi;
pub use records::RecordsApi;
