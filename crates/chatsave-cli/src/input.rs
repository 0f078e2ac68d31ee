//! Captured-conversation input files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chatsave::ChatsaveService;
use chatsave_core::{Conversation, Message, Options};
use serde::Deserialize;
use tracing::{debug, warn};

/// A conversation as captured from a chat page
#[derive(Debug, Deserialize)]
pub struct Capture {
    pub platform: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub messages: Vec<CapturedMessage>,
}

/// One message container. `html` wins when both fields are present.
#[derive(Debug, Deserialize)]
pub struct CapturedMessage {
    pub role: String,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl Capture {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parse {}", path.display()))
    }

    /// Convert every captured message and collect the non-empty ones
    pub fn into_conversation(self, options: &Options, date: String, dedupe: bool) -> Conversation {
        let service = ChatsaveService::with_options(options.clone());
        let mut conversation = Conversation::new(self.platform, date);

        for (i, captured) in self.messages.into_iter().enumerate() {
            let message = match (captured.html, captured.text) {
                (Some(html), _) => service.message_from_html(&captured.role, &html),
                (None, Some(text)) => Some(Message::new(captured.role.as_str(), text)),
                (None, None) => None,
            };

            let Some(message) = message.filter(|m| !m.text.is_empty()) else {
                warn!(index = i, role = %captured.role, "skipping message without content");
                continue;
            };

            if dedupe {
                conversation.push_unique(message);
            } else {
                conversation.push(message);
            }
        }

        debug!(messages = conversation.len(), "conversation assembled");
        conversation
    }
}
