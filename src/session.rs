//! Headless chat preview.
//!
//! [`ChatSession`] owns what a chat surface needs around the prompt client: the
//! transcript, the one-send-at-a-time guard and outcome notifications. The
//! client itself stays stateless.
//!
//! A send goes through these steps:
//! 1. local validation (nothing changes on failure)
//! 2. take the [`SendGuard`] slot, or fail with `Busy`
//! 3. append an optimistic user message
//! 4. call the backend
//! 5. append the agent reply, or remove the optimistic message again

mod guard;
mod notify;

pub use guard::{SendGuard, SendPermit};
pub use notify::{
    noop_sink, InMemoryNotificationSink, NoopNotificationSink, Notification, NotificationLevel,
    NotificationSink, TracingNotificationSink,
};

use crate::client::PromptClient;
use crate::types::PromptResponse;
use crate::validation::validate_submission;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Timestamp label given to messages created during the session.
pub const JUST_NOW: &str = "Just now";

/// Description of the success notification.
pub const SUCCESS_DESCRIPTION: &str = "message processed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// Call-to-action link attached to an agent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    /// Display label, not a machine timestamp.
    pub timestamp: String,
    #[serde(rename = "hasLink", skip_serializing_if = "Option::is_none", default)]
    pub link: Option<Link>,
}

impl Message {
    /// Outgoing message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::User,
            timestamp: JUST_NOW.to_string(),
            link: None,
        }
    }

    /// Reply built from a backend response. Keeps the backend's id, or gets a
    /// fresh one when the backend sent none.
    pub fn agent(response: PromptResponse) -> Self {
        Self {
            id: response
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            content: response.content.unwrap_or_default(),
            sender: Sender::Agent,
            timestamp: JUST_NOW.to_string(),
            link: None,
        }
    }
}

/// The fixed transcript a session starts with and returns to on reset.
pub fn seed_transcript() -> Vec<Message> {
    vec![
        Message {
            id: "1".to_string(),
            content: "Where can I find my invoice for last month?".to_string(),
            sender: Sender::User,
            timestamp: "Today, 10:23 AM".to_string(),
            link: None,
        },
        Message {
            id: "2".to_string(),
            content: "You can find all your invoices in the Billing section of your dashboard.\n\n\
                      1. Go to Settings\n\
                      2. Click on \"Billing & Plans\"\n\
                      3. Scroll down to \"Invoice History\""
                .to_string(),
            sender: Sender::Agent,
            timestamp: JUST_NOW.to_string(),
            link: Some(Link {
                text: "Go to Billing Settings".to_string(),
                url: "#".to_string(),
            }),
        },
    ]
}

/// Anything that can deliver a prompt to the backend.
#[async_trait]
pub trait PromptTransport: Send + Sync {
    async fn send_prompt(&self, content: &str, email: &str) -> Result<PromptResponse>;
}

#[async_trait]
impl PromptTransport for PromptClient {
    async fn send_prompt(&self, content: &str, email: &str) -> Result<PromptResponse> {
        PromptClient::send_prompt(self, content, email).await
    }
}

#[async_trait]
impl<T: PromptTransport + ?Sized> PromptTransport for Arc<T> {
    async fn send_prompt(&self, content: &str, email: &str) -> Result<PromptResponse> {
        (**self).send_prompt(content, email).await
    }
}

/// Chat transcript plus the single in-flight send around it.
pub struct ChatSession<T = PromptClient> {
    transport: T,
    guard: SendGuard,
    messages: Mutex<Vec<Message>>,
    notifier: Arc<dyn NotificationSink>,
}

impl<T: PromptTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            guard: SendGuard::new(),
            messages: Mutex::new(seed_transcript()),
            notifier: noop_sink(),
        }
    }

    pub fn with_notifier(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifier = sink;
        self
    }

    /// Snapshot of the transcript.
    pub fn messages(&self) -> Vec<Message> {
        self.transcript().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Restore the seed transcript. A pending send still lands afterwards.
    pub fn reset(&self) {
        *self.transcript() = seed_transcript();
    }

    /// Validate, submit and record one exchange.
    ///
    /// Returns the agent message that was appended. On any failure the
    /// transcript is left as it was before the call and an error notification
    /// is raised.
    pub async fn send(&self, content: &str, email: &str) -> Result<Message> {
        if let Err(err) = validate_submission(content, email) {
            self.notifier.notify(Notification::error(err.to_string())).await;
            return Err(err);
        }

        let _permit = match self.guard.try_acquire() {
            Ok(permit) => permit,
            Err(err) => {
                self.notifier.notify(Notification::error(err.to_string())).await;
                return Err(err);
            }
        };

        let outgoing = Message::user(content);
        let outgoing_id = outgoing.id.clone();
        self.transcript().push(outgoing);

        match self.transport.send_prompt(content, email).await {
            Ok(response) => {
                let reply = Message::agent(response);
                self.transcript().push(reply.clone());
                self.notifier
                    .notify(Notification::success(SUCCESS_DESCRIPTION))
                    .await;
                Ok(reply)
            }
            Err(err) => {
                // Remove by id: a reset may have happened while the call was pending.
                self.transcript().retain(|m| m.id != outgoing_id);
                debug!(error_kind = err.kind().name(), "rolled back optimistic message");
                self.notifier.notify(Notification::error(err.to_string())).await;
                Err(err)
            }
        }
    }

    fn transcript(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}
