use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;
use wheelhouse_core::types::DbId;

/// Identifies one cached server query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Transactions,
    Transaction(DbId),
    Items,
    Repairs,
    Bikes,
    Customers,
    OrderRequests,
    Summary,
    WorkflowSteps(Uuid),
}

struct CacheEntry {
    stored_at: Instant,
    value: Arc<dyn Any + Send + Sync>,
}

/// Query results with a fixed staleness window.
///
/// Owned by the composition root and shared behind an `Arc`. Values are
/// stored type-erased; a read with the wrong type behaves like a miss.
pub struct QueryCache {
    stale_after: Duration,
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    /// A fresh cached value for `key`, if any.
    pub async fn get<T: Any + Send + Sync>(&self, key: QueryKey) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        let entry = entries.get(&key)?;
        if entry.stored_at.elapsed() >= self.stale_after {
            return None;
        }
        Arc::clone(&entry.value).downcast::<T>().ok()
    }

    /// Store a value, replacing any previous one. Returns the shared copy.
    pub async fn insert<T: Any + Send + Sync>(&self, key: QueryKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            stored_at: Instant::now(),
            value: Arc::clone(&value) as Arc<dyn Any + Send + Sync>,
        };
        self.entries.write().await.insert(key, entry);
        value
    }

    pub async fn invalidate(&self, key: QueryKey) {
        if self.entries.write().await.remove(&key).is_some() {
            tracing::debug!(?key, "Cache entry invalidated");
        }
    }

    /// Drop every entry matching `predicate`.
    pub async fn invalidate_where(&self, predicate: impl Fn(&QueryKey) -> bool) {
        self.entries.write().await.retain(|key, _| !predicate(key));
    }

    pub async fn invalidate_all(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
