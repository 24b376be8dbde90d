use attendant_types::MessageRole;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{bson::doc, Client, Collection};
use std::str::FromStr;

use crate::error::{PersistError, Result};
use crate::models::StoredMessage;
use crate::mongo::models::MessageDoc;

#[derive(Clone)]
pub struct MessageRepository {
    collection: Collection<MessageDoc>,
}

impl MessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Append a message to a conversation
    pub async fn save_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage> {
        let conversation_oid = parse_oid(conversation_id)?;
        let message = MessageDoc {
            id: ObjectId::new(),
            conversation_id: conversation_oid,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        self.collection.insert_one(&message).await?;
        Ok(message.into())
    }

    /// All messages of a conversation, oldest first
    pub async fn get_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        let conversation_oid = parse_oid(conversation_id)?;
        let filter = doc! { "conversation_id": conversation_oid };
        let docs: Vec<MessageDoc> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(StoredMessage::from).collect())
    }
}

fn parse_oid(id: &str) -> Result<ObjectId> {
    ObjectId::from_str(id).map_err(|_| PersistError::InvalidObjectId(id.to_string()))
}
