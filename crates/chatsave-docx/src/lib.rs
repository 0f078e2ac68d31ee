//! # chatsave-docx
//!
//! Write a [`Conversation`] as a Word (`.docx`) document.
//!
//! Each message's markup is parsed with [`chatsave_core::parse`] and every
//! resulting node is laid out as WordprocessingML paragraphs. The package
//! holds only the parts Word needs to open it: content types, relationships,
//! the document body and a small style sheet.
//!
//! ```rust
//! use chatsave_core::{Conversation, Message, Options};
//!
//! let mut conversation = Conversation::new(Some("Claude".to_string()), "2024-05-01");
//! conversation.push(Message::new("User", "Explain **ownership**"));
//!
//! let bytes = chatsave_docx::to_docx_bytes(&conversation, &Options::default()).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

mod document;
mod package;
mod styles;

use std::io::{Cursor, Seek, Write};

use chatsave_core::{Conversation, Options};
use tracing::debug;

/// Error type for docx export
#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    #[error("no conversation found")]
    NoConversation,

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocxError>;

/// Build the `word/document.xml` part for a conversation
pub fn document_xml(conversation: &Conversation, options: &Options) -> String {
    document::wrap_document(&document::body_xml(conversation, options))
}

/// Write a conversation as a `.docx` package, returning the writer
pub fn write_docx<W: Write + Seek>(
    conversation: &Conversation,
    options: &Options,
    writer: W,
) -> Result<W> {
    if conversation.is_empty() {
        return Err(DocxError::NoConversation);
    }

    debug!(
        messages = conversation.len(),
        platform = conversation.platform(),
        "writing docx package"
    );
    package::write_package(writer, &document_xml(conversation, options))
}

/// Write a conversation as a `.docx` package in memory
pub fn to_docx_bytes(conversation: &Conversation, options: &Options) -> Result<Vec<u8>> {
    let cursor = write_docx(conversation, options, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}
