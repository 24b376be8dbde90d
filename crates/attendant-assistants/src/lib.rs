pub mod openai;
pub mod traits;

pub use openai::OpenAIAssistantsClient;
pub use traits::{AssistantSpec, AssistantsApi, RunState, RunStatus, ThreadMessage};
