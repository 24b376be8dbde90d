mod client;
mod conversation;
mod crm;
mod message;

pub use client::ClientRepository;
pub use conversation::ConversationRepository;
pub use crm::CrmRepository;
pub use message::MessageRepository;
