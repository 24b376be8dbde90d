use attendant_types::{BusinessDocument, BusinessFact, ClientProfile};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::mongo::models::{BusinessDocumentDoc, BusinessInfoDoc, ClientDoc};

/// Read-only access to client profiles and their business data.
#[derive(Clone)]
pub struct ClientRepository {
    clients: Collection<ClientDoc>,
    business_info: Collection<BusinessInfoDoc>,
    business_documents: Collection<BusinessDocumentDoc>,
}

impl ClientRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self {
            clients: db.collection("business_details"),
            business_info: db.collection("business_info"),
            business_documents: db.collection("business_documents"),
        }
    }

    /// Get a client profile by id
    pub async fn get_client(&self, client_id: &str) -> Result<Option<ClientProfile>> {
        let filter = doc! { "_id": client_id };
        let found = self.clients.find_one(filter).await?;
        Ok(found.map(ClientProfile::from))
    }

    /// Business facts for a client, in creation order
    pub async fn get_business_info(&self, client_id: &str) -> Result<Vec<BusinessFact>> {
        let filter = doc! { "client_id": client_id };
        let docs: Vec<BusinessInfoDoc> = self
            .business_info
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(BusinessFact::from).collect())
    }

    /// Business documents for a client, in creation order
    pub async fn get_business_documents(&self, client_id: &str) -> Result<Vec<BusinessDocument>> {
        let filter = doc! { "client_id": client_id };
        let docs: Vec<BusinessDocumentDoc> = self
            .business_documents
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(BusinessDocument::from).collect())
    }
}
