use attendant_assistants::RunStatus;
use attendant_persist::PersistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Client not found: {0}")]
    NotFound(String),

    #[error("Assistant provisioning failed: {0}")]
    Provisioning(#[source] anyhow::Error),

    #[error("Thread creation failed: {0}")]
    ThreadCreation(#[source] anyhow::Error),

    /// The remote run reached a terminal failure state. Never retried here;
    /// retry is a caller decision.
    #[error("Run ended as {status:?}: {detail:?}")]
    RunFailed {
        status: RunStatus,
        detail: Option<String>,
    },

    /// Poll budget (or caller deadline) exhausted while the run was still
    /// non-terminal. Distinct from RunFailed so callers can tell "remote job
    /// errored" from "we gave up waiting".
    #[error("Run did not reach a terminal state after {attempts} polls")]
    RunTimeout { attempts: u32 },

    #[error("Thread has no messages after run completion")]
    EmptyResponse,

    #[error("Most recent thread message is not from the assistant")]
    UnexpectedRole,

    /// The persistence collaborator failed where data was expected. Soft
    /// failure, not a crash.
    #[error("Persistence degraded: {0}")]
    PersistenceDegraded(#[from] PersistError),

    /// Any other remote-platform call failure (message append, retrieval).
    #[error("Remote platform call failed: {0}")]
    Platform(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
