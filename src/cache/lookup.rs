//! Two-tier resolution of hosting mapping ids to tool identifiers
//!
//! The narrow cache maps a row id straight to its identifier string.
//! The wide cache holds whole mapping rows and is filled from a single
//! fetch of the mapping table. A narrow miss that hits the wide cache is
//! promoted into the narrow cache.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use super::{CacheTtl, TtlCache};
use crate::client::models::Record;
use crate::client::{GristApi, RecordQuery};
use crate::error::ApiResult;
use crate::models::HostingMapping;
use crate::schema::hosting;

/// Sizes of both cache tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LookupStats {
    pub identifier_cache_size: usize,
    pub mapping_cache_size: usize,
}

pub struct HostingLookup<C: GristApi> {
    client: Arc<C>,
    identifiers: Mutex<TtlCache<i64, String>>,
    mappings: Mutex<TtlCache<i64, HostingMapping>>,
    /// Set on each successful table fetch, with the row lifetime. Lets an
    /// empty table count as cached.
    fetched: Mutex<TtlCache<(), ()>>,
    /// Serializes table fetches so concurrent misses share one request
    fetch_lock: tokio::sync::Mutex<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn mapping_from_record(record: &Record) -> Option<HostingMapping> {
    let tool_identifier = record.str_field(hosting::TOOL_IDENTIFIER);
    if tool_identifier.is_none() {
        debug!("Hosting mapping {} has no identifier, skipped", record.id);
    }
    Some(HostingMapping {
        id: record.id,
        tool_identifier: tool_identifier?,
    })
}

impl<C: GristApi> HostingLookup<C> {
    /// Lookup with the default lifetimes (10 min identifiers, 15 min rows).
    #[allow(dead_code)]
    pub fn new(client: Arc<C>) -> Self {
        Self::with_caches(
            client,
            TtlCache::new(CacheTtl::IDENTIFIERS),
            TtlCache::new(CacheTtl::HOSTING_MAPPINGS),
        )
    }

    pub fn with_caches(
        client: Arc<C>,
        identifiers: TtlCache<i64, String>,
        mappings: TtlCache<i64, HostingMapping>,
    ) -> Self {
        let fetched = TtlCache::new(mappings.ttl());
        Self {
            client,
            fetched: Mutex::new(fetched),
            identifiers: Mutex::new(identifiers),
            mappings: Mutex::new(mappings),
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Every mapping row. Served from the wide cache until the last fetch
    /// expires, even when that fetch returned no usable row; otherwise the
    /// table is fetched once and cached per row. A failed fetch caches
    /// nothing.
    pub async fn all(&self) -> ApiResult<Vec<HostingMapping>> {
        if let Some(cached) = self.cached_rows() {
            debug!("Cache hit: {} hosting mappings", cached.len());
            return Ok(cached);
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have filled the cache while we waited.
        if let Some(cached) = self.cached_rows() {
            debug!("Cache hit after wait: {} hosting mappings", cached.len());
            return Ok(cached);
        }

        debug!("Cache miss: fetching {}", hosting::TABLE);
        let records = self
            .client
            .get_records(hosting::TABLE, &RecordQuery::new())
            .await?;
        let rows: Vec<HostingMapping> = records.iter().filter_map(mapping_from_record).collect();

        // Marked before the rows so the marker never outlives them.
        lock(&self.fetched).set((), ());
        let mut cache = lock(&self.mappings);
        for row in &rows {
            cache.set(row.id, row.clone());
        }

        Ok(rows)
    }

    #[allow(dead_code)]
    pub async fn by_id(&self, id: i64) -> ApiResult<Option<HostingMapping>> {
        let cached = lock(&self.mappings).get(&id);
        if cached.is_some() {
            return Ok(cached);
        }

        Ok(self.all().await?.into_iter().find(|m| m.id == id))
    }

    /// Identifier string for a mapping row id, or `None` when no row matches.
    pub async fn identifier_for(&self, id: i64) -> ApiResult<Option<String>> {
        let cached = lock(&self.identifiers).get(&id);
        if cached.is_some() {
            debug!("Cache hit: identifier {}", id);
            return Ok(cached);
        }

        let cached_row = lock(&self.mappings).get(&id);
        if let Some(row) = cached_row {
            debug!("Cache hit: mapping row {}, promoting", id);
            return Ok(Some(self.promote(row)));
        }

        let row = self.all().await?.into_iter().find(|m| m.id == id);
        Ok(row.map(|row| self.promote(row)))
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        lock(&self.identifiers).clear();
        lock(&self.fetched).clear();
        lock(&self.mappings).clear();
    }

    pub fn stats(&self) -> LookupStats {
        LookupStats {
            identifier_cache_size: lock(&self.identifiers).size(),
            mapping_cache_size: lock(&self.mappings).size(),
        }
    }

    fn cached_rows(&self) -> Option<Vec<HostingMapping>> {
        if !lock(&self.fetched).has(&()) {
            return None;
        }
        Some(lock(&self.mappings).valid_values())
    }

    fn promote(&self, row: HostingMapping) -> String {
        lock(&self.identifiers).set(row.id, row.tool_identifier.clone());
        row.tool_identifier
    }
}
