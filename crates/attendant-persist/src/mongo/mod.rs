mod client;
mod models;
mod repositories;

pub use client::PersistClient;
pub use repositories::{ClientRepository, ConversationRepository, CrmRepository, MessageRepository};
