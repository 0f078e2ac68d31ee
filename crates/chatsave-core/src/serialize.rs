//! Markup export serialization
//!
//! Wraps the converted messages of a conversation into one markup document:
//! a title, a date line, then each message under its role heading, all
//! separated by rules.

use crate::conversation::{Conversation, Message};
use crate::options::Options;

const RULE: &str = "---";

/// Render a conversation as a markup document
pub fn render_markup(conversation: &Conversation, options: &Options) -> String {
    let body_len: usize = conversation
        .messages()
        .iter()
        .map(|m| m.role.len() + m.text.len() + 16)
        .sum();
    let mut out = String::with_capacity(128 + body_len);

    render_header(conversation, options, &mut out);
    for message in conversation.messages() {
        render_message(message, &mut out);
    }

    out
}

fn render_header(conversation: &Conversation, options: &Options, out: &mut String) {
    out.push_str("# ");
    out.push_str(&options.markup_title_for(conversation.platform()));
    out.push_str("\n\n**");
    out.push_str(&options.date_label);
    out.push_str(":** ");
    out.push_str(&conversation.date);
    out.push_str("\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
}

fn render_message(message: &Message, out: &mut String) {
    out.push_str("### ");
    out.push_str(&message.role);
    out.push_str("\n\n");
    out.push_str(&message.text);
    out.push_str("\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
}
