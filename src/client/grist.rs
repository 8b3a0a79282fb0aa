//! Grist API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{ColumnsApi, RecordsApi};
use super::models::{
    Column, ColumnsResponse, CreatedResponse, NewRecord, Record, RecordsResponse, UpdateRecord,
    UpsertRecord,
};
use super::query::RecordQuery;
use crate::error::{ApiError, ApiResult};

/// Client-side request budget. Grist documents share a single-threaded
/// data engine, so bursts are smoothed rather than rejected.
const RATE_LIMIT_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => panic!("rate limit must be non-zero"),
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Grist document API client
pub struct GristClient {
    http: HttpClient,
    /// `<api_url>/docs/<doc_id>`
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

#[derive(Serialize)]
struct RecordsBody<'a, T> {
    records: &'a [T],
}

impl GristClient {
    /// Create a client for one Grist document.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str, suffix: &str) -> String {
        format!("{}/tables/{}/{}", self.base_url, table, suffix)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Send a request and map non-success statuses to [`ApiError`].
    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        self.rate_limiter.until_ready().await;

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(error_message(response, "Resource not found").await)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                ApiError::RateLimit(Duration::from_secs(retry_after))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(error_message(response, "Bad request").await)
            }
            status if status.is_server_error() => ApiError::ServerError {
                status: status.as_u16(),
                message: error_message(response, "Server error").await,
            },
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Grist reports failures as `{"error": "..."}`; fall back to the raw body.
async fn error_message(response: Response, fallback: &str) -> String {
    let text = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => return fallback.to_string(),
    };

    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(text)
}

#[async_trait]
impl RecordsApi for GristClient {
    async fn get_records(&self, table: &str, query: &RecordQuery) -> ApiResult<Vec<Record>> {
        let url = self.table_url(table, "records");
        let builder = self
            .request(Method::GET, &url)
            .query(&query.to_query_params());

        let response: RecordsResponse = self.send_json(builder).await?;
        debug!("Fetched {} rows from {}", response.records.len(), table);
        Ok(response.records)
    }

    async fn put_records(&self, table: &str, records: &[UpsertRecord]) -> ApiResult<()> {
        let url = self.table_url(table, "records");
        let builder = self
            .request(Method::PUT, &url)
            .json(&RecordsBody { records });
        self.send(builder).await?;
        Ok(())
    }

    async fn patch_records(&self, table: &str, records: &[UpdateRecord]) -> ApiResult<()> {
        let url = self.table_url(table, "records");
        let builder = self
            .request(Method::PATCH, &url)
            .json(&RecordsBody { records });
        self.send(builder).await?;
        Ok(())
    }

    async fn post_records(&self, table: &str, records: &[NewRecord]) -> ApiResult<Vec<i64>> {
        let url = self.table_url(table, "records");
        let builder = self
            .request(Method::POST, &url)
            .json(&RecordsBody { records });
        let response: CreatedResponse = self.send_json(builder).await?;
        Ok(response.records.into_iter().map(|r| r.id).collect())
    }

    async fn delete_records(&self, table: &str, ids: &[i64]) -> ApiResult<()> {
        let url = self.table_url(table, "data/delete");
        let builder = self.request(Method::POST, &url).json(ids);
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl ColumnsApi for GristClient {
    async fn list_columns(&self, table: &str) -> ApiResult<Vec<Column>> {
        let url = self.table_url(table, "columns");
        let response: ColumnsResponse = self.send_json(self.request(Method::GET, &url)).await?;
        Ok(response.columns)
    }
}
