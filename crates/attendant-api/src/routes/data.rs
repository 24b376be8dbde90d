use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use attendant_persist::{Conversation, Lead, PersistenceClient, StoredMessage, Ticket};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

async fn ensure_client(state: &AppState, client_id: &str) -> ApiResult<()> {
    state
        .persist
        .get_client(client_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Client not found: {}", client_id)))?;
    Ok(())
}

/// Leads captured for a client
pub async fn get_leads(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<Lead>>> {
    ensure_client(&state, &client_id).await?;
    let leads = state.persist.get_leads(&client_id).await?;
    Ok(Json(leads))
}

/// Support tickets opened for a client
pub async fn get_tickets(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<Ticket>>> {
    ensure_client(&state, &client_id).await?;
    let tickets = state.persist.get_tickets(&client_id).await?;
    Ok(Json(tickets))
}

#[derive(Debug, Serialize)]
pub struct ConversationWithMessages {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<StoredMessage>,
}

/// Conversations for a client, each with its message history
pub async fn get_conversations(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<ConversationWithMessages>>> {
    ensure_client(&state, &client_id).await?;

    let conversations = state.persist.get_conversations(&client_id).await?;

    let mut result = Vec::with_capacity(conversations.len());
    for conversation in conversations {
        let messages = state.persist.get_messages(&conversation.id).await?;
        result.push(ConversationWithMessages {
            conversation,
            messages,
        });
    }

    Ok(Json(result))
}
