pub mod error;
pub mod models;
pub mod mongo;
pub mod trait_client;

pub use error::{PersistError, Result};
pub use models::{Conversation, Lead, StoredMessage, Ticket};
pub use mongo::PersistClient;
pub use trait_client::PersistenceClient;
