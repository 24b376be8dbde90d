use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub client_id: String,
    /// Conversation role, e.g. "sales" or "support".
    pub role: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub thread_id: String,
    pub conversation_id: String,
    pub response: String,
}

/// Exchange one message with a client's assistant.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    tracing::info!(client_id = %req.client_id, role = %req.role, "message received");

    let outcome = state
        .orchestrator
        .send_message(&req.client_id, &req.role, &req.message, None)
        .await?;

    Ok(Json(MessageResponse {
        thread_id: outcome.thread_id,
        conversation_id: outcome.conversation_id,
        response: outcome.reply,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub client_id: String,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub message: String,
}

/// Rebuild a client's assistant from its current business data.
pub async fn train(
    State(state): State<AppState>,
    Json(req): Json<TrainRequest>,
) -> ApiResult<Json<TrainResponse>> {
    let outcome = state.orchestrator.train(&req.client_id).await?;

    if !outcome.success {
        return Err(ApiError::Upstream(outcome.message));
    }

    Ok(Json(TrainResponse {
        success: true,
        message: outcome.message,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub widget_id: String,
    pub user_id: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub user_id: String,
    pub thread_id: String,
}

/// Widget entry point: anonymous-friendly exchange against the default
/// assistant.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    tracing::info!(widget_id = %req.widget_id, user_id = ?req.user_id, "chat received");

    let outcome = state
        .orchestrator
        .ask(&req.message, &req.widget_id, req.user_id, req.language)
        .await?;

    Ok(Json(ChatResponse {
        response: outcome.reply,
        user_id: outcome.user_id,
        thread_id: outcome.thread_id,
    }))
}
