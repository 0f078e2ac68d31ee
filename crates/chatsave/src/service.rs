//! ChatsaveService - the main entry point for DOM to markup conversion and export.

use chatsave_core::{parse, render_markup, Conversation, DocumentNode, Message, Options};
use tracing::debug;

use crate::convert::convert;
use crate::node::Node;
use crate::{ChatsaveError, Result};

/// The main service for turning chat message DOM into exportable markup
#[derive(Debug, Clone, Default)]
pub struct ChatsaveService {
    options: Options,
}

impl ChatsaveService {
    /// Create a new ChatsaveService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ChatsaveService with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Convert a DOM Node tree to markup text
    pub fn convert(&self, node: &Node) -> String {
        convert(node)
    }

    /// Parse an HTML fragment and convert it to markup text
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        convert(&crate::html::parse_html(html))
    }

    /// Build a message from a message container.
    ///
    /// Falls back to the container's plain text when conversion produces
    /// nothing but whitespace. Returns `None` when both are empty.
    pub fn message(&self, role: &str, node: &Node) -> Option<Message> {
        let mut text = self.convert(node);

        if text.trim().is_empty() {
            debug!(role, "markup conversion was empty, falling back to text content");
            text = node.text_content();
        }

        let message = Message::new(role, text).with_source_html(node.inner_html());
        if message.text.is_empty() {
            debug!(role, "message container has no text");
            return None;
        }

        Some(message)
    }

    /// Build a message from the HTML of a message container
    #[cfg(feature = "html")]
    pub fn message_from_html(&self, role: &str, html: &str) -> Option<Message> {
        self.message(role, &crate::html::parse_html(html))
    }

    /// Render a conversation as a markup document
    pub fn export_markup(&self, conversation: &Conversation) -> Result<String> {
        if conversation.is_empty() {
            return Err(ChatsaveError::NoConversation);
        }

        debug!(
            messages = conversation.len(),
            platform = conversation.platform(),
            "rendering markup export"
        );
        Ok(render_markup(conversation, &self.options))
    }

    /// Parse a message's markup into document nodes
    pub fn parse_message(&self, message: &Message) -> Vec<DocumentNode> {
        parse(&message.text)
    }
}
