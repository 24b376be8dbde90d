use attendant_types::MessageRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
