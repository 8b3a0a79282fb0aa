//! In-memory caches for Grist lookups
//!
//! Caches live for one process. Nothing is persisted between runs.

pub mod lookup;
pub mod ttl;

use std::time::Duration;

/// Cache TTL configuration per data type
pub struct CacheTtl;

impl CacheTtl {
    /// Mapping row id -> tool identifier string
    pub const IDENTIFIERS: Duration = Duration::from_secs(10 * 60); // 10 min
    /// Whole hosting mapping rows
    pub const HOSTING_MAPPINGS: Duration = Duration::from_secs(15 * 60); // 15 min
}

pub use lookup::HostingLookup;
pub use ttl::TtlCache;
