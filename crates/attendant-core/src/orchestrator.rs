use std::sync::Arc;
use tokio::time::Instant;

use attendant_assistants::AssistantsApi;
use attendant_persist::PersistenceClient;
use attendant_types::{MessageRole, SessionKey};

use crate::error::{OrchestratorError, Result};
use crate::executor::{RunExecutor, RunPolicy};
use crate::provisioner::{AssistantProvisioner, ProvisionerSettings};
use crate::threads::ThreadRegistry;

#[derive(Debug, Clone, Default)]
pub struct OrchestratorSettings {
    pub provisioner: ProvisionerSettings,
    pub run_policy: RunPolicy,
    /// Pre-provisioned assistant used by the widget (`ask`) entry point.
    pub default_assistant_id: Option<String>,
}

/// Result of one dashboard message exchange.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub conversation_id: String,
    pub thread_id: String,
    pub reply: String,
}

/// Result of one widget exchange; carries the (possibly synthesized)
/// user id back so the caller can resume the session.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub reply: String,
    pub user_id: String,
    pub thread_id: String,
}

/// Structured outcome of a training request; never a panic or propagated
/// provisioning error.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub success: bool,
    pub message: String,
}

/// Top-level composition: resolve client, ensure assistant, ensure thread,
/// execute run, persist the exchange.
pub struct Orchestrator {
    provisioner: AssistantProvisioner,
    threads: ThreadRegistry,
    executor: RunExecutor,
    persist: Arc<dyn PersistenceClient>,
    default_assistant_id: Option<String>,
}

impl Orchestrator {
    pub fn new(
        api: Arc<dyn AssistantsApi>,
        persist: Arc<dyn PersistenceClient>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            provisioner: AssistantProvisioner::new(
                api.clone(),
                persist.clone(),
                settings.provisioner,
            ),
            threads: ThreadRegistry::new(api.clone()),
            executor: RunExecutor::new(api, settings.run_policy),
            persist,
            default_assistant_id: settings.default_assistant_id,
        }
    }

    /// Exchange one message on behalf of a client/role pair.
    ///
    /// Fails with `NotFound` before any remote call when the client is
    /// unknown. The optional deadline bounds the run-poll loop.
    pub async fn send_message(
        &self,
        client_id: &str,
        role: &str,
        message: &str,
        deadline: Option<Instant>,
    ) -> Result<SendOutcome> {
        self.persist
            .get_client(client_id)
            .await?
            .ok_or_else(|| OrchestratorError::NotFound(client_id.to_string()))?;

        let conversation = self.find_or_create_conversation(client_id, role).await?;

        self.persist
            .save_message(&conversation.id, MessageRole::User, message)
            .await?;

        let assistant_id = self.provisioner.get_or_create(client_id).await?;

        let key = SessionKey::client_role(client_id, role);
        let thread_id = self.threads.get_or_create(&key).await?;

        let reply = self
            .executor
            .execute(&thread_id, &assistant_id, message, deadline)
            .await?;

        self.persist
            .save_message(&conversation.id, MessageRole::Assistant, &reply)
            .await?;

        Ok(SendOutcome {
            conversation_id: conversation.id,
            thread_id,
            reply,
        })
    }

    /// Widget entry point: no client resolution, uses the configured
    /// default assistant. Anonymous users get a time-derived id, which
    /// makes the session non-resumable across restarts by design.
    pub async fn ask(
        &self,
        message: &str,
        widget_id: &str,
        user_id: Option<String>,
        language: Option<String>,
    ) -> Result<AskOutcome> {
        let assistant_id = self.default_assistant_id.clone().ok_or_else(|| {
            OrchestratorError::Provisioning(anyhow::anyhow!(
                "no default assistant configured for the widget entry point"
            ))
        })?;

        let user_id = user_id.unwrap_or_else(anonymous_user_id);
        tracing::debug!(widget_id, user_id = %user_id, language = ?language, "widget exchange");

        let key = SessionKey::widget(&user_id, widget_id);
        let thread_id = self.threads.get_or_create(&key).await?;

        let reply = self
            .executor
            .execute(&thread_id, &assistant_id, message, None)
            .await?;

        Ok(AskOutcome {
            reply,
            user_id,
            thread_id,
        })
    }

    /// Rebuild a client's assistant from its current business data.
    ///
    /// Unknown clients are an error; a failed reprovision is reported as a
    /// structured unsuccessful outcome, so retrying the request stays safe.
    pub async fn train(&self, client_id: &str) -> Result<TrainOutcome> {
        self.persist
            .get_client(client_id)
            .await?
            .ok_or_else(|| OrchestratorError::NotFound(client_id.to_string()))?;

        match self.provisioner.invalidate_and_recreate(client_id).await {
            Ok(assistant_id) => Ok(TrainOutcome {
                success: true,
                message: format!("assistant {} provisioned", assistant_id),
            }),
            Err(e) => {
                tracing::error!(client_id, error = %e, "training failed");
                Ok(TrainOutcome {
                    success: false,
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn provisioner(&self) -> &AssistantProvisioner {
        &self.provisioner
    }

    pub fn threads(&self) -> &ThreadRegistry {
        &self.threads
    }

    async fn find_or_create_conversation(
        &self,
        client_id: &str,
        role: &str,
    ) -> Result<attendant_persist::Conversation> {
        let existing = self
            .persist
            .get_conversations(client_id)
            .await?
            .into_iter()
            .find(|c| c.role == role && c.is_active());

        match existing {
            Some(conversation) => Ok(conversation),
            None => Ok(self.persist.create_conversation(client_id, role).await?),
        }
    }
}

fn anonymous_user_id() -> String {
    format!("anon_{}", chrono::Utc::now().timestamp_millis())
}
