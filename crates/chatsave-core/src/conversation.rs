//! Conversation records
//!
//! Messages arrive already converted to markup; the conversation only keeps
//! them in order, together with the platform name and export date.

use std::collections::HashSet;

use tracing::debug;

/// One message of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Speaker label, e.g. "User" or the assistant's name
    pub role: String,
    /// Markup text of the message, trimmed
    pub text: String,
    /// Inner HTML the text was converted from
    pub source_html: String,
}

impl Message {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into().trim().to_string(),
            source_html: String::new(),
        }
    }

    /// Attach the HTML this message was converted from
    pub fn with_source_html(mut self, html: impl Into<String>) -> Self {
        self.source_html = html.into();
        self
    }
}

/// An ordered list of messages ready for export
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub platform: Option<String>,
    /// Export date, already formatted
    pub date: String,
    messages: Vec<Message>,
    seen: HashSet<String>,
}

impl Conversation {
    pub fn new(platform: Option<String>, date: impl Into<String>) -> Self {
        Self {
            platform,
            date: date.into(),
            messages: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Append a message. Messages without text are dropped.
    pub fn push(&mut self, message: Message) {
        if message.text.trim().is_empty() {
            debug!(role = %message.role, "dropping empty message");
            return;
        }
        self.seen.insert(message.text.clone());
        self.messages.push(message);
    }

    /// Append a message unless one with the same text is already present.
    ///
    /// Some chat pages render the same message in more than one container;
    /// this keeps the first copy. Returns whether the message was stored.
    pub fn push_unique(&mut self, message: Message) -> bool {
        if self.seen.contains(&message.text) {
            debug!(role = %message.role, "skipping duplicate message");
            return false;
        }
        let before = self.messages.len();
        self.push(message);
        self.messages.len() > before
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }
}

impl Extend<Message> for Conversation {
    fn extend<T: IntoIterator<Item = Message>>(&mut self, iter: T) {
        for message in iter {
            self.push(message);
        }
    }
}
