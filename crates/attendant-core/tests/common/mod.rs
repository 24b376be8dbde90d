// Hand-rolled stub collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use attendant_assistants::{AssistantSpec, AssistantsApi, RunState, RunStatus, ThreadMessage};
use attendant_persist::{
    Conversation, Lead, PersistError, PersistenceClient, StoredMessage, Ticket,
};
use attendant_types::{BusinessDocument, BusinessFact, ClientProfile, MessageRole};
use chrono::Utc;

/// Scriptable in-memory remote platform.
pub struct StubPlatform {
    pub assistants_created: AtomicUsize,
    pub assistants_deleted: Mutex<Vec<String>>,
    pub threads_created: AtomicUsize,
    pub runs_created: AtomicUsize,
    pub polls: AtomicUsize,
    pub total_calls: AtomicUsize,
    /// Statuses returned by successive polls; once drained, `default_status`.
    pub run_script: Mutex<VecDeque<RunStatus>>,
    pub default_status: RunStatus,
    pub run_error: Option<String>,
    /// What `latest_message` returns. None simulates an empty thread.
    pub reply: Mutex<Option<ThreadMessage>>,
    pub fail_assistant_creation: AtomicBool,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            assistants_created: AtomicUsize::new(0),
            assistants_deleted: Mutex::new(Vec::new()),
            threads_created: AtomicUsize::new(0),
            runs_created: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
            total_calls: AtomicUsize::new(0),
            run_script: Mutex::new(VecDeque::new()),
            default_status: RunStatus::Completed,
            run_error: None,
            reply: Mutex::new(Some(ThreadMessage {
                role: MessageRole::Assistant,
                content: "stubbed reply".to_string(),
            })),
            fail_assistant_creation: AtomicBool::new(false),
        }
    }

    pub fn with_run_script(self, statuses: Vec<RunStatus>) -> Self {
        *self.run_script.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_default_status(mut self, status: RunStatus) -> Self {
        self.default_status = status;
        self
    }

    pub fn with_run_error(mut self, detail: &str) -> Self {
        self.run_error = Some(detail.to_string());
        self
    }

    pub fn with_reply(self, message: Option<ThreadMessage>) -> Self {
        *self.reply.lock().unwrap() = message;
        self
    }
}

#[async_trait]
impl AssistantsApi for StubPlatform {
    async fn create_assistant(&self, _spec: AssistantSpec) -> Result<String> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_assistant_creation.load(Ordering::SeqCst) {
            anyhow::bail!("assistant creation rejected by stub");
        }
        let n = self.assistants_created.fetch_add(1, Ordering::SeqCst);
        Ok(format!("asst_{}", n))
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.assistants_deleted
            .lock()
            .unwrap()
            .push(assistant_id.to_string());
        Ok(())
    }

    async fn create_thread(&self) -> Result<String> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst);
        Ok(format!("thread_{}", n))
    }

    async fn create_message(
        &self,
        _thread_id: &str,
        _role: MessageRole,
        _content: &str,
    ) -> Result<()> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<String> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let n = self.runs_created.fetch_add(1, Ordering::SeqCst);
        Ok(format!("run_{}", n))
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<RunState> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.polls.fetch_add(1, Ordering::SeqCst);
        let status = self
            .run_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_status);
        Ok(RunState {
            id: run_id.to_string(),
            status,
            error: self.run_error.clone(),
        })
    }

    async fn latest_message(&self, _thread_id: &str) -> Result<Option<ThreadMessage>> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.lock().unwrap().clone())
    }
}

/// In-memory persistence collaborator.
pub struct StubPersist {
    pub clients: HashMap<String, ClientProfile>,
    pub facts: HashMap<String, Vec<BusinessFact>>,
    pub documents: HashMap<String, Vec<BusinessDocument>>,
    pub conversations: Mutex<Vec<Conversation>>,
    pub messages: Mutex<Vec<StoredMessage>>,
    conversation_seq: AtomicUsize,
    message_seq: AtomicUsize,
    /// When set, every lookup fails as infrastructure trouble.
    pub degraded: AtomicBool,
}

impl StubPersist {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            facts: HashMap::new(),
            documents: HashMap::new(),
            conversations: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            conversation_seq: AtomicUsize::new(0),
            message_seq: AtomicUsize::new(0),
            degraded: AtomicBool::new(false),
        }
    }

    pub fn with_client(mut self, id: &str, name: &str, facts: Vec<BusinessFact>) -> Self {
        self.clients.insert(
            id.to_string(),
            ClientProfile {
                id: id.to_string(),
                name: name.to_string(),
                lang: "en".to_string(),
            },
        );
        self.facts.insert(id.to_string(), facts);
        self.documents.insert(id.to_string(), Vec::new());
        self
    }

    fn check(&self) -> Result<(), PersistError> {
        if self.degraded.load(Ordering::SeqCst) {
            return Err(PersistError::Internal("stub outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceClient for StubPersist {
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientProfile>, PersistError> {
        self.check()?;
        Ok(self.clients.get(client_id).cloned())
    }

    async fn get_business_info(&self, client_id: &str) -> Result<Vec<BusinessFact>, PersistError> {
        self.check()?;
        Ok(self.facts.get(client_id).cloned().unwrap_or_default())
    }

    async fn get_business_documents(
        &self,
        client_id: &str,
    ) -> Result<Vec<BusinessDocument>, PersistError> {
        self.check()?;
        Ok(self.documents.get(client_id).cloned().unwrap_or_default())
    }

    async fn create_conversation(
        &self,
        client_id: &str,
        role: &str,
    ) -> Result<Conversation, PersistError> {
        self.check()?;
        let n = self.conversation_seq.fetch_add(1, Ordering::SeqCst);
        let conversation = Conversation {
            id: format!("conv_{}", n),
            client_id: client_id.to_string(),
            role: role.to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
        };
        self.conversations.lock().unwrap().push(conversation.clone());
        Ok(conversation)
    }

    async fn get_conversations(&self, client_id: &str) -> Result<Vec<Conversation>, PersistError> {
        self.check()?;
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn save_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage, PersistError> {
        self.check()?;
        let n = self.message_seq.fetch_add(1, Ordering::SeqCst);
        let message = StoredMessage {
            id: format!("msg_{}", n),
            conversation_id: conversation_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn get_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<StoredMessage>, PersistError> {
        self.check()?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn get_leads(&self, _client_id: &str) -> Result<Vec<Lead>, PersistError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn get_tickets(&self, _client_id: &str) -> Result<Vec<Ticket>, PersistError> {
        self.check()?;
        Ok(Vec::new())
    }
}
