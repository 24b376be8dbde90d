use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::{Lead, Ticket};
use crate::mongo::models::{LeadDoc, TicketDoc};

/// Read side for CRM data the widget captures.
#[derive(Clone)]
pub struct CrmRepository {
    leads: Collection<LeadDoc>,
    tickets: Collection<TicketDoc>,
}

impl CrmRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self {
            leads: db.collection("captured_leads"),
            tickets: db.collection("support_tickets"),
        }
    }

    pub async fn get_leads(&self, client_id: &str) -> Result<Vec<Lead>> {
        let filter = doc! { "client_id": client_id };
        let docs: Vec<LeadDoc> = self
            .leads
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Lead::from).collect())
    }

    pub async fn get_tickets(&self, client_id: &str) -> Result<Vec<Ticket>> {
        let filter = doc! { "client_id": client_id };
        let docs: Vec<TicketDoc> = self
            .tickets
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Ticket::from).collect())
    }
}
