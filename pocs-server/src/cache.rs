use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Async memoization with a time-to-live. Identical queries against ODWB return
/// the same snapshot for a while, so counts and loaded datasets are reused.
pub struct MemoCache<K, V> {
    entries: RwLock<HashMap<K, (V, Instant)>>,
    ttl: Duration,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some((value, cached_at)) if cached_at.elapsed() < self.ttl => Some(value.clone()),
            Some((_, cached_at)) => {
                tracing::debug!(
                    "Cached entry {:?} is expired ({}s old)",
                    key,
                    cached_at.elapsed().as_secs()
                );
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key, (value, Instant::now()));
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    /// Failures are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!("Cache hit for {:?}", key);
            return Ok(value);
        }

        let value = compute().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
