use async_trait::async_trait;
use attendant_types::{BusinessDocument, BusinessFact, ClientProfile, MessageRole};
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{Conversation, Lead, StoredMessage, Ticket};
use crate::mongo::repositories::{
    ClientRepository, ConversationRepository, CrmRepository, MessageRepository,
};
use crate::trait_client::PersistenceClient;

/// Facade over the per-collection repositories.
pub struct PersistClient {
    client_repo: ClientRepository,
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
    crm_repo: CrmRepository,
}

impl PersistClient {
    pub async fn new(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            client_repo: ClientRepository::new(&client, db_name),
            conversation_repo: ConversationRepository::new(&client, db_name),
            message_repo: MessageRepository::new(&client, db_name),
            crm_repo: CrmRepository::new(&client, db_name),
        })
    }

    pub fn clients(&self) -> &ClientRepository {
        &self.client_repo
    }

    pub fn conversations(&self) -> &ConversationRepository {
        &self.conversation_repo
    }

    pub fn messages(&self) -> &MessageRepository {
        &self.message_repo
    }

    pub fn crm(&self) -> &CrmRepository {
        &self.crm_repo
    }
}

#[async_trait]
impl PersistenceClient for PersistClient {
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientProfile>> {
        self.client_repo.get_client(client_id).await
    }

    async fn get_business_info(&self, client_id: &str) -> Result<Vec<BusinessFact>> {
        self.client_repo.get_business_info(client_id).await
    }

    async fn get_business_documents(&self, client_id: &str) -> Result<Vec<BusinessDocument>> {
        self.client_repo.get_business_documents(client_id).await
    }

    async fn create_conversation(&self, client_id: &str, role: &str) -> Result<Conversation> {
        self.conversation_repo
            .create_conversation(client_id, role)
            .await
    }

    async fn get_conversations(&self, client_id: &str) -> Result<Vec<Conversation>> {
        self.conversation_repo.get_conversations(client_id).await
    }

    async fn save_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage> {
        self.message_repo
            .save_message(conversation_id, role, content)
            .await
    }

    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        self.message_repo.get_messages(conversation_id).await
    }

    async fn get_leads(&self, client_id: &str) -> Result<Vec<Lead>> {
        self.crm_repo.get_leads(client_id).await
    }

    async fn get_tickets(&self, client_id: &str) -> Result<Vec<Ticket>> {
        self.crm_repo.get_tickets(client_id).await
    }
}
