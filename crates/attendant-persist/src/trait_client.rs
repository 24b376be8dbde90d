use async_trait::async_trait;
use attendant_types::{BusinessDocument, BusinessFact, ClientProfile, MessageRole};

use crate::error::Result;
use crate::models::{Conversation, Lead, StoredMessage, Ticket};

/// Persistence operations the orchestrator depends on.
///
/// Absence is `Ok(None)` / `Ok(vec![])`; infrastructure failure is `Err`.
/// Callers can therefore tell "no data" apart from "lookup failed" instead
/// of masking outages as empty tenants.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Look up a client profile by id
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientProfile>>;

    /// Ordered business facts for a client
    async fn get_business_info(&self, client_id: &str) -> Result<Vec<BusinessFact>>;

    /// Ordered business documents for a client
    async fn get_business_documents(&self, client_id: &str) -> Result<Vec<BusinessDocument>>;

    /// Create a new active conversation for a client/role pair
    async fn create_conversation(&self, client_id: &str, role: &str) -> Result<Conversation>;

    /// All conversations for a client
    async fn get_conversations(&self, client_id: &str) -> Result<Vec<Conversation>>;

    /// Append a message to a conversation
    async fn save_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage>;

    /// All messages of a conversation, oldest first
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>>;

    /// Leads captured for a client
    async fn get_leads(&self, client_id: &str) -> Result<Vec<Lead>>;

    /// Support tickets opened for a client
    async fn get_tickets(&self, client_id: &str) -> Result<Vec<Ticket>>;
}
