use anyhow::Result;
use async_trait::async_trait;
use attendant_types::MessageRole;
use serde::{Deserialize, Serialize};

/// Everything needed to provision one remote assistant.
#[derive(Debug, Clone)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    /// Tool type names, e.g. "retrieval".
    pub tools: Vec<String>,
}

/// Remote run lifecycle states.
///
/// The platform adds statuses over time (`requires_action`, `cancelling`,
/// `incomplete`); anything unrecognized lands in `Unknown`, which is
/// non-terminal so the executor keeps polling toward its budget instead of
/// failing on a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Created,
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Terminal states end the run; everything else means "keep polling".
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Created => "created",
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        }
    }
}

/// One observation of a remote run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub id: String,
    pub status: RunStatus,
    pub error: Option<String>,
}

/// A message as read back from a remote thread, flattened to plain text.
#[derive(Debug, Clone)]
pub struct ThreadMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Remote assistant platform operations consumed by the orchestrator.
///
/// Implementations provide the actual transport; tests substitute stubs.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    /// Create a remote assistant and return its id
    async fn create_assistant(&self, spec: AssistantSpec) -> Result<String>;

    /// Delete a remote assistant (best-effort; absence is not an error)
    async fn delete_assistant(&self, assistant_id: &str) -> Result<()>;

    /// Create an empty remote thread and return its id
    async fn create_thread(&self) -> Result<String>;

    /// Append a message to a thread
    async fn create_message(&self, thread_id: &str, role: MessageRole, content: &str)
        -> Result<()>;

    /// Launch a run of the assistant against a thread and return the run id
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<String>;

    /// Read the current state of a run
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunState>;

    /// Most recent message on the thread, if any
    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>>;
}
