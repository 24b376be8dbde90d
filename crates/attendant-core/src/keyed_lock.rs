use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-key async mutex registry.
///
/// Serializes cache population for one key without serializing distinct
/// keys against each other. The registry lock is held only while looking
/// up the entry, never across the per-key critical section.
#[derive(Default)]
pub struct KeyedLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a key. Callers then `.lock().await`
    /// the returned mutex for the duration of the miss handling.
    pub async fn entry(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().await;
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the registry entry once the guarded cache slot is populated, so
    /// the registry does not grow with every key ever seen. Waiters already
    /// holding the Arc keep their handle; later callers get a fresh lock and
    /// re-check the cache as usual.
    pub async fn discard(&self, key: &str) {
        self.inner.lock().await.remove(key);
    }
}
