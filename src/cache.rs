//! Time-boxed cache for the public data snapshot.

use crate::error::Result;
use crate::models::PublicData;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

#[derive(Debug, Clone)]
struct CachedSnapshot {
    data: Arc<PublicData>,
    fetched_at: DateTime<Utc>,
}

impl CachedSnapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        Utc::now() - self.fetched_at < ttl
    }
}

/// Single-slot cache of the most recent full snapshot.
///
/// The slot lock is held while a fetch runs, so concurrent callers share one
/// request: later callers wait and then read the entry the first one stored.
#[derive(Debug)]
pub struct PublicDataCache {
    slot: Mutex<Option<CachedSnapshot>>,
    ttl: Duration,
}

impl PublicDataCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached snapshot, or run `fetch` when it is missing, stale
    /// or `force_refresh` is set. A failed fetch leaves the slot untouched.
    pub async fn get<F, Fut>(&self, force_refresh: bool, fetch: F) -> Result<Arc<PublicData>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PublicData>>,
    {
        let mut slot = self.slot.lock().await;

        if !force_refresh {
            if let Some(cached) = slot.as_ref().filter(|c| c.is_fresh(self.ttl)) {
                debug!(fetched_at = %cached.fetched_at, "public data served from cache");
                return Ok(cached.data.clone());
            }
        }

        let data = Arc::new(fetch().await?);
        *slot = Some(CachedSnapshot {
            data: data.clone(),
            fetched_at: Utc::now(),
        });
        debug!(properties = data.properties.len(), "public data cached");

        Ok(data)
    }

    /// Fresh snapshot without fetching
    pub async fn peek(&self) -> Option<Arc<PublicData>> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|c| c.is_fresh(self.ttl))
            .map(|c| c.data.clone())
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }
}

impl Default for PublicDataCache {
    fn default() -> Self {
        Self::new()
    }
}
