use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use attendant_assistants::{AssistantSpec, AssistantsApi};
use attendant_persist::PersistenceClient;

use crate::error::{OrchestratorError, Result};
use crate::instructions::{build_instructions, instructions_fingerprint};
use crate::keyed_lock::KeyedLocks;

/// Cached remote assistant for one client.
#[derive(Debug, Clone)]
pub struct AssistantHandle {
    pub assistant_id: String,
    pub fingerprint: u64,
}

#[derive(Debug, Clone)]
pub struct ProvisionerSettings {
    pub model: String,
    /// Tool type names passed through to assistant creation.
    pub tools: Vec<String>,
    /// Prefix for the remote assistant display name.
    pub name_prefix: String,
}

impl Default for ProvisionerSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo-preview".to_string(),
            tools: vec!["retrieval".to_string()],
            name_prefix: "Attendant".to_string(),
        }
    }
}

/// Owns the client_id -> assistant handle cache.
///
/// At most one live handle per client; handles are invalidated whole and
/// recreated, never patched in place. The cache is in-memory only, so a
/// process restart reprovisions every client on first use.
pub struct AssistantProvisioner {
    api: Arc<dyn AssistantsApi>,
    persist: Arc<dyn PersistenceClient>,
    settings: ProvisionerSettings,
    cache: RwLock<HashMap<String, AssistantHandle>>,
    locks: KeyedLocks,
}

impl AssistantProvisioner {
    pub fn new(
        api: Arc<dyn AssistantsApi>,
        persist: Arc<dyn PersistenceClient>,
        settings: ProvisionerSettings,
    ) -> Self {
        Self {
            api,
            persist,
            settings,
            cache: RwLock::new(HashMap::new()),
            locks: KeyedLocks::new(),
        }
    }

    /// Return the remote assistant id for a client, provisioning on first use.
    ///
    /// Concurrent first-use for the same client produces exactly one remote
    /// creation: the per-client lock serializes miss handling, and the cache
    /// is re-checked once the lock is held. Distinct clients never contend.
    pub async fn get_or_create(&self, client_id: &str) -> Result<String> {
        if let Some(handle) = self.cache.read().await.get(client_id) {
            return Ok(handle.assistant_id.clone());
        }

        let lock = self.locks.entry(client_id).await;
        let _guard = lock.lock().await;

        // Another task may have provisioned while we waited for the lock.
        if let Some(handle) = self.cache.read().await.get(client_id) {
            let assistant_id = handle.assistant_id.clone();
            self.locks.discard(client_id).await;
            return Ok(assistant_id);
        }

        let profile = self
            .persist
            .get_client(client_id)
            .await?
            .ok_or_else(|| OrchestratorError::NotFound(client_id.to_string()))?;

        let facts = self.persist.get_business_info(client_id).await?;
        let documents = self.persist.get_business_documents(client_id).await?;

        let instructions = build_instructions(&profile, &facts, &documents);
        let fingerprint = instructions_fingerprint(&instructions);

        let spec = AssistantSpec {
            name: format!("{} - {}", self.settings.name_prefix, profile.name),
            instructions,
            model: self.settings.model.clone(),
            tools: self.settings.tools.clone(),
        };

        let assistant_id = self.api.create_assistant(spec).await.map_err(|e| {
            tracing::error!(client_id, error = %e, "assistant creation failed");
            OrchestratorError::Provisioning(e)
        })?;

        tracing::info!(client_id, assistant_id = %assistant_id, "assistant provisioned");

        self.cache.write().await.insert(
            client_id.to_string(),
            AssistantHandle {
                assistant_id: assistant_id.clone(),
                fingerprint,
            },
        );
        self.locks.discard(client_id).await;

        Ok(assistant_id)
    }

    /// Drop the cached assistant (best-effort remote delete) and eagerly
    /// reprovision from current business data.
    ///
    /// Idempotent: absence of a cached handle is not an error, and retrying
    /// after a failed reprovision is safe.
    pub async fn invalidate_and_recreate(&self, client_id: &str) -> Result<String> {
        let removed = self.cache.write().await.remove(client_id);

        if let Some(handle) = &removed {
            if let Err(e) = self.api.delete_assistant(&handle.assistant_id).await {
                tracing::warn!(
                    client_id,
                    assistant_id = %handle.assistant_id,
                    error = %e,
                    "remote assistant delete failed; continuing"
                );
            }
        }

        let assistant_id = self.get_or_create(client_id).await?;

        if let (Some(old), Some(new)) = (removed, self.cached(client_id).await) {
            if old.fingerprint == new.fingerprint {
                tracing::info!(client_id, "reprovisioned with unchanged instructions");
            }
        }

        Ok(assistant_id)
    }

    /// Current cached handle, if any. Read-only; used by diagnostics and tests.
    pub async fn cached(&self, client_id: &str) -> Option<AssistantHandle> {
        self.cache.read().await.get(client_id).cloned()
    }
}
