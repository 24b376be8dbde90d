use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use attendant_assistants::AssistantsApi;
use attendant_types::SessionKey;

use crate::error::{OrchestratorError, Result};
use crate::keyed_lock::KeyedLocks;

/// Owns the session key -> remote thread id cache.
///
/// A thread handle is never silently replaced; only `invalidate` removes
/// one. Same per-key locking discipline as the provisioner.
pub struct ThreadRegistry {
    api: Arc<dyn AssistantsApi>,
    cache: RwLock<HashMap<String, String>>,
    locks: KeyedLocks,
}

impl ThreadRegistry {
    pub fn new(api: Arc<dyn AssistantsApi>) -> Self {
        Self {
            api,
            cache: RwLock::new(HashMap::new()),
            locks: KeyedLocks::new(),
        }
    }

    /// Return the remote thread id for a session, creating it on first use.
    pub async fn get_or_create(&self, key: &SessionKey) -> Result<String> {
        let cache_key = key.cache_key();

        if let Some(thread_id) = self.cache.read().await.get(&cache_key) {
            return Ok(thread_id.clone());
        }

        let lock = self.locks.entry(&cache_key).await;
        let _guard = lock.lock().await;

        if let Some(thread_id) = self.cache.read().await.get(&cache_key) {
            let thread_id = thread_id.clone();
            self.locks.discard(&cache_key).await;
            return Ok(thread_id);
        }

        let thread_id = self.api.create_thread().await.map_err(|e| {
            tracing::error!(session = %key, error = %e, "thread creation failed");
            OrchestratorError::ThreadCreation(e)
        })?;

        tracing::info!(session = %key, thread_id = %thread_id, "thread created");

        self.cache
            .write()
            .await
            .insert(cache_key.clone(), thread_id.clone());
        self.locks.discard(&cache_key).await;

        Ok(thread_id)
    }

    /// Explicitly drop the thread handle for a session.
    pub async fn invalidate(&self, key: &SessionKey) {
        self.cache.write().await.remove(&key.cache_key());
    }
}
