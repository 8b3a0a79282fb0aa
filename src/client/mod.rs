//! Grist API client

pub mod api;
pub mod grist;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod query;

pub use api::{ColumnsApi, RecordsApi};
pub use grist::GristClient;
#[cfg(test)]
pub use mock::MockGristClient;
pub use query::{RecordQuery, SortOrder};

/// Complete Grist document API.
///
/// Implemented automatically for anything implementing every sub-trait,
/// so callers can stay generic over the real client and the test mock.
pub trait GristApi: RecordsApi + ColumnsApi {}

impl<T: RecordsApi + ColumnsApi> GristApi for T {}
