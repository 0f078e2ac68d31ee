//! Document model
//!
//! The block/run structure re-derived from markup text. It is what the
//! rich-document writers consume: one `DocumentNode` per markup line (a code
//! block spans several lines), each carrying styled `InlineRun`s.

use serde::Serialize;

/// A contiguous styled text span within a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
}

impl InlineRun {
    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn styled(text: impl Into<String>, bold: bool, italic: bool, monospace: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            monospace,
        }
    }

    /// True when the run carries no styling
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.monospace
    }
}

/// A block-level document node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentNode {
    /// Heading with level (1-4) and inline content
    Heading { level: u8, runs: Vec<InlineRun> },

    /// Paragraph containing inline content
    Paragraph { runs: Vec<InlineRun> },

    /// Fenced code block, lines kept verbatim
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },

    /// Bulleted or numbered list line
    ListItem {
        ordered: bool,
        index: Option<u32>,
        runs: Vec<InlineRun>,
    },

    /// Quoted line
    Quote { runs: Vec<InlineRun> },

    /// Thematic break (horizontal rule)
    Rule,

    /// Empty source line
    BlankLine,
}

impl DocumentNode {
    /// Inline runs of this node, if it has any
    pub fn runs(&self) -> Option<&[InlineRun]> {
        match self {
            DocumentNode::Heading { runs, .. }
            | DocumentNode::Paragraph { runs }
            | DocumentNode::ListItem { runs, .. }
            | DocumentNode::Quote { runs } => Some(runs),
            DocumentNode::CodeBlock { .. } | DocumentNode::Rule | DocumentNode::BlankLine => None,
        }
    }

    /// Get the text content of this node with all styling dropped
    pub fn text(&self) -> String {
        match self {
            DocumentNode::CodeBlock { lines, .. } => lines.join("\n"),
            other => other.runs().map(runs_text).unwrap_or_default(),
        }
    }
}

/// Helper to concatenate the text of a run sequence
pub fn runs_text(runs: &[InlineRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let run = InlineRun::plain("hello");
        assert_eq!(run.text, "hello");
        assert!(run.is_plain());
    }

    #[test]
    fn test_node_text() {
        let node = DocumentNode::Paragraph {
            runs: vec![
                InlineRun::plain("a "),
                InlineRun::styled("b", true, false, false),
            ],
        };
        assert_eq!(node.text(), "a b");

        let code = DocumentNode::CodeBlock {
            language: None,
            lines: vec!["x = 1".to_string(), "y = 2".to_string()],
        };
        assert_eq!(code.text(), "x = 1\ny = 2");
        assert!(code.runs().is_none());
        assert_eq!(DocumentNode::Rule.text(), "");
    }
}
