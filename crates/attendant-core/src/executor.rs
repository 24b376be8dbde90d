use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use attendant_assistants::{AssistantsApi, RunStatus};
use attendant_types::MessageRole;

use crate::error::{OrchestratorError, Result};

/// Poll policy for run completion, injected from configuration so tests
/// can use zero-delay fakes. interval * max_attempts bounds worst-case
/// latency even when the remote platform never turns terminal.
#[derive(Debug, Clone)]
pub struct RunPolicy {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_attempts: 10,
        }
    }
}

/// Drives one message exchange through a remote run to a terminal outcome.
pub struct RunExecutor {
    api: Arc<dyn AssistantsApi>,
    policy: RunPolicy,
}

impl RunExecutor {
    pub fn new(api: Arc<dyn AssistantsApi>, policy: RunPolicy) -> Self {
        Self { api, policy }
    }

    /// Append the user message, launch a run, poll until terminal, and
    /// extract the assistant's reply.
    ///
    /// Terminal remote failures surface as `RunFailed` and are never retried
    /// here. An exhausted poll budget, or an expired caller deadline,
    /// surfaces as `RunTimeout`.
    pub async fn execute(
        &self,
        thread_id: &str,
        assistant_id: &str,
        message: &str,
        deadline: Option<Instant>,
    ) -> Result<String> {
        self.api
            .create_message(thread_id, MessageRole::User, message)
            .await
            .map_err(|e| {
                tracing::error!(thread_id, error = %e, "message append failed");
                OrchestratorError::Platform(e)
            })?;

        let run_id = self
            .api
            .create_run(thread_id, assistant_id)
            .await
            .map_err(|e| {
                tracing::error!(thread_id, assistant_id, error = %e, "run creation failed");
                OrchestratorError::Platform(e)
            })?;

        let mut attempts: u32 = 0;
        while attempts < self.policy.max_attempts {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    tracing::warn!(thread_id, run_id = %run_id, attempts, "deadline expired while polling");
                    return Err(OrchestratorError::RunTimeout { attempts });
                }
            }

            let run = self
                .api
                .retrieve_run(thread_id, &run_id)
                .await
                .map_err(|e| {
                    tracing::error!(thread_id, run_id = %run_id, error = %e, "run poll failed");
                    OrchestratorError::Platform(e)
                })?;
            attempts += 1;

            match run.status {
                RunStatus::Completed => return self.collect_reply(thread_id).await,
                RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                    tracing::error!(
                        thread_id,
                        run_id = %run_id,
                        status = run.status.as_str(),
                        detail = ?run.error,
                        "run reached terminal failure"
                    );
                    return Err(OrchestratorError::RunFailed {
                        status: run.status,
                        detail: run.error,
                    });
                }
                // created / queued / in_progress / unknown: keep waiting
                _ => {
                    if attempts < self.policy.max_attempts {
                        let mut next = Instant::now() + self.policy.poll_interval;
                        // Never sleep past the caller's deadline.
                        if let Some(deadline) = deadline {
                            next = next.min(deadline);
                        }
                        tokio::time::sleep_until(next).await;
                    }
                }
            }
        }

        tracing::warn!(thread_id, run_id = %run_id, attempts, "poll budget exhausted");
        Err(OrchestratorError::RunTimeout { attempts })
    }

    async fn collect_reply(&self, thread_id: &str) -> Result<String> {
        let message = self
            .api
            .latest_message(thread_id)
            .await
            .map_err(|e| {
                tracing::error!(thread_id, error = %e, "reply retrieval failed");
                OrchestratorError::Platform(e)
            })?
            .ok_or(OrchestratorError::EmptyResponse)?;

        // A non-assistant head means another writer raced us on this thread;
        // treating it as success would return the wrong text.
        if message.role != MessageRole::Assistant {
            return Err(OrchestratorError::UnexpectedRole);
        }

        Ok(message.content)
    }
}
