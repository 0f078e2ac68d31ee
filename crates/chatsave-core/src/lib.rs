//! chatsave-core - document model, markup parsing and plain-text export
//!
//! This crate holds everything that works on markup text. It is used by
//! `chatsave` (which produces markup from DOM trees) and `chatsave-docx`
//! (which turns parsed documents into word-processor files).
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────┐ ──render_markup──▶ Markup document
//! DOM ──chatsave───▶ │ Markup text  │
//!                    └──────────────┘ ──parse──▶ DocumentNode[] ──▶ .docx
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatsave_core::{parse, DocumentNode, InlineRun};
//!
//! let nodes = parse("## Plan\n- **first** step");
//!
//! assert_eq!(
//!     nodes[1],
//!     DocumentNode::ListItem {
//!         ordered: false,
//!         index: None,
//!         runs: vec![
//!             InlineRun::styled("first", true, false, false),
//!             InlineRun::plain(" step"),
//!         ],
//!     }
//! );
//! ```

mod ast;
mod conversation;
mod inline;
mod options;
mod parse;
mod serialize;

pub use ast::{runs_text, DocumentNode, InlineRun};
pub use conversation::{Conversation, Message};
pub use inline::parse_inline;
pub use options::{Options, PLATFORM_PLACEHOLDER};
pub use parse::{parse, FENCE};
pub use serialize::render_markup;
