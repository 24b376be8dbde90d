// BSON document shapes; converted to the public models at the module edge.

use attendant_types::{BusinessDocument, BusinessFact, ClientProfile, MessageRole};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{Conversation, Lead, StoredMessage, Ticket};

/// business_details collection; keyed by the external client id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lang: Option<String>,
}

impl From<ClientDoc> for ClientProfile {
    fn from(doc: ClientDoc) -> Self {
        ClientProfile {
            id: doc.id,
            name: doc.name,
            lang: doc.lang.unwrap_or_else(|| "es".to_string()),
        }
    }
}

/// business_info collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInfoDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessInfoDoc> for BusinessFact {
    fn from(doc: BusinessInfoDoc) -> Self {
        BusinessFact {
            title: doc.title,
            content: doc.content,
        }
    }
}

/// business_documents collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDocumentDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessDocumentDoc> for BusinessDocument {
    fn from(doc: BusinessDocumentDoc) -> Self {
        BusinessDocument {
            title: doc.title,
            summary: doc.summary,
        }
    }
}

/// conversations collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ConversationDoc> for Conversation {
    fn from(doc: ConversationDoc) -> Self {
        Conversation {
            id: doc.id.to_hex(),
            client_id: doc.client_id,
            role: doc.role,
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

/// messages collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub conversation_id: ObjectId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageDoc> for StoredMessage {
    fn from(doc: MessageDoc) -> Self {
        StoredMessage {
            id: doc.id.to_hex(),
            conversation_id: doc.conversation_id.to_hex(),
            role: doc.role,
            content: doc.content,
            created_at: doc.created_at,
        }
    }
}

/// captured_leads collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<LeadDoc> for Lead {
    fn from(doc: LeadDoc) -> Self {
        Lead {
            id: doc.id.to_hex(),
            client_id: doc.client_id,
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

/// support_tickets collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

impl From<TicketDoc> for Ticket {
    fn from(doc: TicketDoc) -> Self {
        Ticket {
            id: doc.id.to_hex(),
            client_id: doc.client_id,
            title: doc.title,
            description: doc.description,
            status: doc.status,
            priority: doc.priority,
            created_at: doc.created_at,
        }
    }
}
