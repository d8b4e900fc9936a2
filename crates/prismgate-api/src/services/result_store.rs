//! In-memory result store
//!
//! Holds each orchestration run's final output behind a fresh result token so
//! the submit response can redirect and the render step can fetch it, possibly
//! more than once. Entries are time-boxed and the map is capacity-bounded;
//! a background sweeper prunes expired entries between requests.

use std::collections::HashMap;
use std::sync::Arc;

use prismgate_core::models::UploadResult;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

struct StoredResult {
    result: UploadResult,
    stored_at: Instant,
}

/// Thread-safe token -> result map with TTL and bounded capacity.
#[derive(Clone)]
pub struct ResultStore {
    inner: Arc<Mutex<HashMap<String, StoredResult>>>,
    ttl: Duration,
    max_entries: usize,
}

impl ResultStore {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            max_entries,
        }
    }

    /// Store a result under its token. Prunes expired entries first and
    /// evicts the oldest live entry when the store is at capacity.
    pub async fn put(&self, token: String, result: UploadResult) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();
        map.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);

        if map.len() >= self.max_entries {
            if let Some(oldest) = map
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(token, _)| token.clone())
            {
                tracing::warn!(evicted_token = %oldest, "Result store at capacity, evicting oldest entry");
                map.remove(&oldest);
            }
        }

        map.insert(
            token,
            StoredResult {
                result,
                stored_at: now,
            },
        );
    }

    /// Peek a stored result. Repeat retrieval keeps working until the entry
    /// expires; unknown or expired tokens return None.
    pub async fn get(&self, token: &str) -> Option<UploadResult> {
        let map = self.inner.lock().await;
        map.get(token)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.result.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Remove expired entries.
    pub async fn prune(&self) {
        let mut map = self.inner.lock().await;
        let before = map.len();
        let now = Instant::now();
        map.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        let removed = before - map.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = map.len(), "Pruned expired results");
        }
    }

    /// Spawn a background task pruning expired entries on an interval.
    pub fn spawn_sweeper(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.prune().await;
            }
        });
    }
}
