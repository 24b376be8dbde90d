// OpenAI Assistants API client (HTTP direct, no SDK)

use crate::traits::{AssistantSpec, AssistantsApi, RunState, RunStatus, ThreadMessage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use attendant_types::MessageRole;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA: &str = "assistants=v2";

pub struct OpenAIAssistantsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIAssistantsClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );
        headers.insert(
            HeaderName::from_static("openai-beta"),
            HeaderValue::from_static(ASSISTANTS_BETA),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Point the client at a different base URL (local stubs, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn into_checked(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }
        Ok(response)
    }
}

#[async_trait]
impl AssistantsApi for OpenAIAssistantsClient {
    async fn create_assistant(&self, spec: AssistantSpec) -> Result<String> {
        let tools: Vec<_> = spec
            .tools
            .iter()
            .map(|t| serde_json::json!({ "type": t }))
            .collect();

        let payload = serde_json::json!({
            "name": spec.name,
            "instructions": spec.instructions,
            "model": spec.model,
            "tools": tools,
        });

        let response = self
            .http_client
            .post(format!("{}/assistants", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send create-assistant request")?;

        let assistant: AssistantObject = Self::into_checked(response)
            .await?
            .json()
            .await
            .context("Failed to parse assistant response")?;

        Ok(assistant.id)
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(format!("{}/assistants/{}", self.base_url, assistant_id))
            .send()
            .await
            .context("Failed to send delete-assistant request")?;

        // A 404 means the assistant is already gone, which is the desired state.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::into_checked(response).await?;
        Ok(())
    }

    async fn create_thread(&self) -> Result<String> {
        let response = self
            .http_client
            .post(format!("{}/threads", self.base_url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .context("Failed to send create-thread request")?;

        let thread: ThreadObject = Self::into_checked(response)
            .await?
            .json()
            .await
            .context("Failed to parse thread response")?;

        Ok(thread.id)
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<()> {
        let payload = serde_json::json!({
            "role": role.as_str(),
            "content": content,
        });

        let response = self
            .http_client
            .post(format!("{}/threads/{}/messages", self.base_url, thread_id))
            .json(&payload)
            .send()
            .await
            .context("Failed to send create-message request")?;

        Self::into_checked(response).await?;
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<String> {
        let payload = serde_json::json!({ "assistant_id": assistant_id });

        let response = self
            .http_client
            .post(format!("{}/threads/{}/runs", self.base_url, thread_id))
            .json(&payload)
            .send()
            .await
            .context("Failed to send create-run request")?;

        let run: RunObject = Self::into_checked(response)
            .await?
            .json()
            .await
            .context("Failed to parse run response")?;

        Ok(run.id)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunState> {
        let response = self
            .http_client
            .get(format!(
                "{}/threads/{}/runs/{}",
                self.base_url, thread_id, run_id
            ))
            .send()
            .await
            .context("Failed to send retrieve-run request")?;

        let run: RunObject = Self::into_checked(response)
            .await?
            .json()
            .await
            .context("Failed to parse run response")?;

        Ok(run.into_state())
    }

    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>> {
        let response = self
            .http_client
            .get(format!("{}/threads/{}/messages", self.base_url, thread_id))
            .query(&[("order", "desc"), ("limit", "1")])
            .send()
            .await
            .context("Failed to send list-messages request")?;

        let list: MessageList = Self::into_checked(response)
            .await?
            .json()
            .await
            .context("Failed to parse message list")?;

        Ok(list.data.into_iter().next().map(MessageObject::flatten))
    }
}

// ============================================================================
// ASSISTANTS API WIRE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssistantObject {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThreadObject {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunObject {
    pub id: String,
    pub status: RunStatus,
    pub last_error: Option<LastError>,
}

impl RunObject {
    fn into_state(self) -> RunState {
        RunState {
            id: self.id,
            status: self.status,
            error: self
                .last_error
                .map(|e| format!("{}: {}", e.code, e.message)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LastError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageList {
    pub data: Vec<MessageObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageObject {
    pub role: MessageRole,
    pub content: Vec<ContentPart>,
}

impl MessageObject {
    /// Concatenate the text parts into one plain string.
    fn flatten(self) -> ThreadMessage {
        let content = self
            .content
            .into_iter()
            .filter_map(|part| part.text.map(|t| t.value))
            .collect::<Vec<_>>()
            .join("\n");

        ThreadMessage {
            role: self.role,
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextValue {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_parsing() {
        let run: RunObject = serde_json::from_str(
            r#"{"id": "run_1", "status": "in_progress", "last_error": null}"#,
        )
        .unwrap();

        assert_eq!(run.status, RunStatus::InProgress);
        assert!(!run.status.is_terminal());
    }

    #[test]
    fn test_unrecognized_status_is_nonterminal() {
        // Statuses the platform added after this enum was written must not
        // break polling.
        for raw in ["requires_action", "cancelling", "incomplete"] {
            let run: RunObject = serde_json::from_str(&format!(
                r#"{{"id": "run_1", "status": "{}", "last_error": null}}"#,
                raw
            ))
            .unwrap();

            assert_eq!(run.status, RunStatus::Unknown);
            assert!(!run.status.is_terminal());
        }
    }

    #[test]
    fn test_run_error_detail() {
        let run: RunObject = serde_json::from_str(
            r#"{
                "id": "run_2",
                "status": "failed",
                "last_error": {"code": "rate_limit_exceeded", "message": "Too many requests"}
            }"#,
        )
        .unwrap();

        let state = run.into_state();
        assert_eq!(state.status, RunStatus::Failed);
        assert!(state.status.is_terminal());
        assert_eq!(
            state.error.as_deref(),
            Some("rate_limit_exceeded: Too many requests")
        );
    }

    #[test]
    fn test_message_flattening() {
        let list: MessageList = serde_json::from_str(
            r#"{
                "data": [{
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": {"value": "Hello"}},
                        {"type": "image_file", "text": null},
                        {"type": "text", "text": {"value": "world"}}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let message = list.data.into_iter().next().unwrap().flatten();
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, "Hello\nworld");
    }
}
