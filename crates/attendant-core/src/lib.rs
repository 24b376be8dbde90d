pub mod error;
pub mod executor;
pub mod instructions;
pub mod keyed_lock;
pub mod orchestrator;
pub mod provisioner;
pub mod threads;

pub use error::OrchestratorError;
pub use executor::{RunExecutor, RunPolicy};
pub use instructions::{build_instructions, instructions_fingerprint};
pub use orchestrator::{AskOutcome, Orchestrator, OrchestratorSettings, SendOutcome, TrainOutcome};
pub use provisioner::{AssistantProvisioner, ProvisionerSettings};
pub use threads::ThreadRegistry;
