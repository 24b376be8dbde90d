use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message inside a thread or a stored conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local identifier that maps one logical conversation onto a remote thread.
///
/// Widget sessions key on (user, widget); dashboard sessions key on
/// (client, role). At most one live thread per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Widget { user_id: String, widget_id: String },
    ClientRole { client_id: String, role: String },
}

impl SessionKey {
    pub fn widget(user_id: impl Into<String>, widget_id: impl Into<String>) -> Self {
        SessionKey::Widget {
            user_id: user_id.into(),
            widget_id: widget_id.into(),
        }
    }

    pub fn client_role(client_id: impl Into<String>, role: impl Into<String>) -> Self {
        SessionKey::ClientRole {
            client_id: client_id.into(),
            role: role.into(),
        }
    }

    /// Unique string form used as the thread cache key.
    pub fn cache_key(&self) -> String {
        match self {
            SessionKey::Widget { user_id, widget_id } => format!("{}_{}", user_id, widget_id),
            SessionKey::ClientRole { client_id, role } => format!("{}:{}", client_id, role),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}
