use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use tracing::debug;

use crate::model::filter::FilterClause;
use crate::model::organization::LocationSummary;
use crate::upstream::client::{AttendanceBackend, parse_count};
use crate::upstream::error::UpstreamError;

/// Caches upstream bodies by endpoint and exact payload bytes.
/// Failures are never cached.
pub struct CachedBackend {
    inner: Arc<dyn AttendanceBackend>,
    cache: Cache<String, Arc<Value>>,
    locations: Cache<String, Arc<Vec<LocationSummary>>>,
}

impl CachedBackend {
    pub fn new(inner: Arc<dyn AttendanceBackend>, max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            locations: Cache::builder()
                .max_capacity(64)
                .time_to_live(ttl)
                .build(),
        }
    }

    fn key(endpoint: &str, payload: &[FilterClause]) -> Result<String, UpstreamError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| UpstreamError::UnexpectedShape(e.to_string()))?;
        Ok(format!("{endpoint}:{body}"))
    }
}

#[async_trait]
impl AttendanceBackend for CachedBackend {
    async fn search(&self, payload: &[FilterClause]) -> Result<Value, UpstreamError> {
        let key = Self::key("search", payload)?;
        if let Some(hit) = self.cache.get(&key).await {
            debug!("Search served from cache");
            return Ok(hit.as_ref().clone());
        }

        let body = self.inner.search(payload).await?;
        self.cache.insert(key, Arc::new(body.clone())).await;
        Ok(body)
    }

    async fn count(&self, payload: &[FilterClause]) -> Result<u64, UpstreamError> {
        let key = Self::key("count", payload)?;
        if let Some(hit) = self.cache.get(&key).await {
            debug!("Count served from cache");
            return parse_count(&hit);
        }

        let count = self.inner.count(payload).await?;
        self.cache.insert(key, Arc::new(Value::from(count))).await;
        Ok(count)
    }

    async fn locations(
        &self,
        organization_code: &str,
    ) -> Result<Vec<LocationSummary>, UpstreamError> {
        if let Some(hit) = self.locations.get(organization_code).await {
            return Ok(hit.as_ref().clone());
        }

        let locations = self.inner.locations(organization_code).await?;
        self.locations
            .insert(organization_code.to_string(), Arc::new(locations.clone()))
            .await;
        Ok(locations)
    }
}
