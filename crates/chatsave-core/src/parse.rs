//! Markup to document parsing
//!
//! A single top-to-bottom pass over the lines of markup text. Each line maps
//! to exactly one node, except that a fenced code block consumes every line
//! up to and including its closing fence.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::ast::DocumentNode;
use crate::inline::parse_inline;

/// Fence marker opening and closing a code block
pub const FENCE: &str = "```";

/// Heading prefixes, longest first
const HEADING_PREFIXES: [(&str, u8); 4] = [("####", 4), ("###", 3), ("##", 2), ("#", 1)];

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s+(.+)$").expect("ordered item pattern is a valid regex"));

/// Parse markup text into document nodes.
///
/// Never fails: anything unrecognised becomes a paragraph, and an
/// unterminated code fence swallows the rest of the input.
///
/// ```rust
/// use chatsave_core::{parse, DocumentNode};
///
/// let nodes = parse("# Title\n\nBody");
/// assert!(matches!(nodes[0], DocumentNode::Heading { level: 1, .. }));
/// assert_eq!(nodes[1], DocumentNode::BlankLine);
/// ```
pub fn parse(markup: &str) -> Vec<DocumentNode> {
    let lines = split_lines(markup);
    let mut nodes = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            let language = Some(info.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            i += 1;

            let mut code = Vec::new();
            while i < lines.len() && lines[i].trim() != FENCE {
                code.push(lines[i].to_string());
                i += 1;
            }
            if i >= lines.len() {
                trace!(lines = code.len(), "unterminated code fence runs to end of input");
            }
            // Skip the closing fence
            i += 1;

            nodes.push(DocumentNode::CodeBlock {
                language,
                lines: code,
            });
            continue;
        }

        nodes.push(classify_line(line, trimmed));
        i += 1;
    }

    nodes
}

/// Classify a single non-fence line
fn classify_line(line: &str, trimmed: &str) -> DocumentNode {
    if trimmed.is_empty() {
        return DocumentNode::BlankLine;
    }

    for (prefix, level) in HEADING_PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return DocumentNode::Heading {
                level,
                runs: parse_inline(rest.trim()),
            };
        }
    }

    if trimmed == "---" || trimmed == "___" {
        return DocumentNode::Rule;
    }

    if let Some(rest) = trimmed.strip_prefix('>') {
        return DocumentNode::Quote {
            runs: parse_inline(rest.trim()),
        };
    }

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return DocumentNode::ListItem {
            ordered: false,
            index: None,
            runs: parse_inline(rest.trim()),
        };
    }

    if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
        let index = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let rest = caps.get(2).map_or("", |m| m.as_str());
        return DocumentNode::ListItem {
            ordered: true,
            index,
            runs: parse_inline(rest),
        };
    }

    DocumentNode::Paragraph {
        runs: parse_inline(line),
    }
}

/// Split on `\n`, treating a final newline as a terminator rather than the
/// start of one more empty line. A trailing `\r` is dropped from each line.
fn split_lines(text: &str) -> Vec<&str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::InlineRun;

    fn plain(text: &str) -> Vec<InlineRun> {
        vec![InlineRun::plain(text)]
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse(""), vec![DocumentNode::BlankLine]);
        assert_eq!(
            parse("\n\n"),
            vec![DocumentNode::BlankLine, DocumentNode::BlankLine]
        );
        assert_eq!(parse("   "), vec![DocumentNode::BlankLine]);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            parse("#### T"),
            vec![DocumentNode::Heading {
                level: 4,
                runs: plain("T"),
            }]
        );
        assert_eq!(
            parse("# Title"),
            vec![DocumentNode::Heading {
                level: 1,
                runs: plain("Title"),
            }]
        );
        assert_eq!(
            parse("##No space"),
            vec![DocumentNode::Heading {
                level: 2,
                runs: plain("No space"),
            }]
        );
    }

    #[test]
    fn test_long_hash_run_caps_at_level_four() {
        let nodes = parse("##### T");
        assert_eq!(
            nodes,
            vec![DocumentNode::Heading {
                level: 4,
                runs: plain("# T"),
            }]
        );
    }

    #[test]
    fn test_heading_inline_runs() {
        let nodes = parse("## **Bold** title");
        assert_eq!(
            nodes,
            vec![DocumentNode::Heading {
                level: 2,
                runs: vec![
                    InlineRun::styled("Bold", true, false, false),
                    InlineRun::plain(" title"),
                ],
            }]
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let nodes = parse("```python\nx=1\n  y = 2\n```");
        assert_eq!(
            nodes,
            vec![DocumentNode::CodeBlock {
                language: Some("python".to_string()),
                lines: vec!["x=1".to_string(), "  y = 2".to_string()],
            }]
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let nodes = parse("```\n# not a heading\n```\nafter");
        assert_eq!(
            nodes,
            vec![
                DocumentNode::CodeBlock {
                    language: None,
                    lines: vec!["# not a heading".to_string()],
                },
                DocumentNode::Paragraph {
                    runs: plain("after"),
                },
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_swallows_rest() {
        let nodes = parse("```rust\nfn main() {}\n\n# tail");
        assert_eq!(
            nodes,
            vec![DocumentNode::CodeBlock {
                language: Some("rust".to_string()),
                lines: vec![
                    "fn main() {}".to_string(),
                    String::new(),
                    "# tail".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_closing_fence_must_be_bare() {
        // A fence carrying text does not close the block
        let nodes = parse("```\na\n```js\nb\n```");
        assert_eq!(
            nodes,
            vec![DocumentNode::CodeBlock {
                language: None,
                lines: vec!["a".to_string(), "```js".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn test_rules() {
        assert_eq!(parse("---"), vec![DocumentNode::Rule]);
        assert_eq!(parse("  ___  "), vec![DocumentNode::Rule]);
        assert_eq!(
            parse("----"),
            vec![DocumentNode::Paragraph {
                runs: plain("----"),
            }]
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            parse("> quoted *words*"),
            vec![DocumentNode::Quote {
                runs: vec![
                    InlineRun::plain("quoted "),
                    InlineRun::styled("words", false, true, false),
                ],
            }]
        );
        assert_eq!(
            parse(">tight"),
            vec![DocumentNode::Quote {
                runs: plain("tight"),
            }]
        );
    }

    #[test]
    fn test_unordered_items() {
        assert_eq!(
            parse("- one\n* two"),
            vec![
                DocumentNode::ListItem {
                    ordered: false,
                    index: None,
                    runs: plain("one"),
                },
                DocumentNode::ListItem {
                    ordered: false,
                    index: None,
                    runs: plain("two"),
                },
            ]
        );
    }

    #[test]
    fn test_ordered_items() {
        assert_eq!(
            parse("1. first\n12.  twelfth"),
            vec![
                DocumentNode::ListItem {
                    ordered: true,
                    index: Some(1),
                    runs: plain("first"),
                },
                DocumentNode::ListItem {
                    ordered: true,
                    index: Some(12),
                    runs: plain("twelfth"),
                },
            ]
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_list_numbers() {
        assert_eq!(
            parse("٣. item"),
            vec![DocumentNode::Paragraph {
                runs: plain("٣. item"),
            }]
        );
    }

    #[test]
    fn test_malformed_ordered_item_is_paragraph() {
        assert_eq!(
            parse("1.no space"),
            vec![DocumentNode::Paragraph {
                runs: plain("1.no space"),
            }]
        );
        assert_eq!(
            parse("3."),
            vec![DocumentNode::Paragraph { runs: plain("3.") }]
        );
    }

    #[test]
    fn test_paragraph_keeps_untrimmed_line() {
        assert_eq!(
            parse("  indented text"),
            vec![DocumentNode::Paragraph {
                runs: plain("  indented text"),
            }]
        );
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(
            parse("a\r\n\r\nb"),
            vec![
                DocumentNode::Paragraph { runs: plain("a") },
                DocumentNode::BlankLine,
                DocumentNode::Paragraph { runs: plain("b") },
            ]
        );
    }

    #[test]
    fn test_table_row_is_paragraph() {
        let nodes = parse("| a | b |");
        assert_eq!(
            nodes,
            vec![DocumentNode::Paragraph {
                runs: plain("| a | b |"),
            }]
        );
    }
}
