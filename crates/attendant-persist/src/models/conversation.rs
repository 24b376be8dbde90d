use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted conversation between one client's role and the assistant.
///
/// Ids are hex strings at this boundary; ObjectId stays inside the mongo
/// module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub client_id: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_active(&self) -> bool {
        self.status == super::CONVERSATION_ACTIVE
    }
}
