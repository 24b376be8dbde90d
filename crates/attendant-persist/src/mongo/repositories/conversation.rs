use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::{Conversation, CONVERSATION_ACTIVE};
use crate::mongo::models::ConversationDoc;

#[derive(Clone)]
pub struct ConversationRepository {
    collection: Collection<ConversationDoc>,
}

impl ConversationRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("conversations");
        Self { collection }
    }

    /// Create a new active conversation
    pub async fn create_conversation(&self, client_id: &str, role: &str) -> Result<Conversation> {
        let conversation = ConversationDoc {
            id: ObjectId::new(),
            client_id: client_id.to_string(),
            role: role.to_string(),
            status: CONVERSATION_ACTIVE.to_string(),
            created_at: Utc::now(),
        };

        self.collection.insert_one(&conversation).await?;
        Ok(conversation.into())
    }

    /// List conversations for a client, newest first
    pub async fn get_conversations(&self, client_id: &str) -> Result<Vec<Conversation>> {
        let filter = doc! { "client_id": client_id };
        let docs: Vec<ConversationDoc> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Conversation::from).collect())
    }
}
