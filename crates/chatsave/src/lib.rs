//! # chatsave
//!
//! Convert chat-page DOM nodes to markup text.
//!
//! Chat web applications render each message as a DOM subtree. This crate
//! folds such a subtree into a small Markdown-like markup, which is either
//! exported as text directly or parsed again into document nodes by
//! `chatsave-core` for rich-document output.
//!
//! ## Design
//!
//! The converter accepts a CDP-style DOM Node structure rather than live DOM
//! objects. This design allows:
//!
//! - **Parser agnostic**: Any HTML parser or browser bridge can build the Node structure
//! - **Pure conversion**: The tree is only read, never mutated
//! - **Optional HTML parsing**: scraper is only pulled in by the `html` feature
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use chatsave::{convert, Node};
//!
//! let mut ol = Node::element("ol");
//! ol.add_child(Node::element("li").with_child(Node::text("first")));
//! ol.add_child(Node::element("li").with_child(Node::text("second")));
//!
//! assert_eq!(convert(&ol), "1. first\n2. second\n\n");
//! ```
//!
//! ## Example (export)
//!
//! ```rust
//! use chatsave::{ChatsaveService, Conversation};
//!
//! let service = ChatsaveService::new();
//! let mut conversation = Conversation::new(Some("Claude".to_string()), "2024-05-01");
//! conversation.extend(service.message_from_html("User", "<p>What is <b>Rust</b>?</p>"));
//!
//! let markup = service.export_markup(&conversation).unwrap();
//! assert!(markup.contains("What is **Rust**?"));
//! ```

mod convert;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;

pub use convert::convert;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use service::ChatsaveService;

pub use chatsave_core::{
    parse, parse_inline, render_markup, Conversation, DocumentNode, InlineRun, Message, Options,
};

/// Error type for chatsave operations
#[derive(Debug, thiserror::Error)]
pub enum ChatsaveError {
    #[error("no conversation found")]
    NoConversation,
}

pub type Result<T> = std::result::Result<T, ChatsaveError>;
