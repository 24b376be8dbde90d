use serde::{Deserialize, Serialize};

/// A business tenant as seen by the orchestrator.
///
/// Read-only here; owned by the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: String,
    pub name: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "es".to_string()
}

/// One entry of a client's structured business information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessFact {
    pub title: String,
    pub content: String,
}

/// A summarized business document made available to the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDocument {
    pub title: String,
    pub summary: String,
}
