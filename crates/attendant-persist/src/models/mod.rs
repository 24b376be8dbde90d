mod conversation;
mod crm;
mod message;

pub use conversation::Conversation;
pub use crm::{Lead, Ticket};
pub use message::StoredMessage;

/// Status given to a conversation at creation time.
pub const CONVERSATION_ACTIVE: &str = "active";
