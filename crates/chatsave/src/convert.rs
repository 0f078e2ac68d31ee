//! Convert a DOM Node tree to markup text
//!
//! A depth-first fold: children are converted and concatenated first, then
//! the element's own tag decides how that content is wrapped. Text is passed
//! through verbatim; markup characters in the source are not escaped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Node, NodeType};

static LANGUAGE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"language-([A-Za-z0-9_]+)").expect("language class pattern is a valid regex")
});

/// The element kinds the converter knows how to wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Heading(usize),
    Paragraph,
    Bold,
    Italic,
    Code,
    Link,
    List,
    ListItem,
    Quote,
    LineBreak,
    Table,
    TableRow,
    TableCell,
    GenericBlock,
    Other,
}

impl Tag {
    fn of(node: &Node) -> Self {
        match node.tag_name().as_str() {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "p" => Tag::Paragraph,
            "strong" | "b" => Tag::Bold,
            "em" | "i" => Tag::Italic,
            "code" => Tag::Code,
            "a" => Tag::Link,
            "ul" | "ol" => Tag::List,
            "li" => Tag::ListItem,
            "blockquote" => Tag::Quote,
            "br" => Tag::LineBreak,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "th" | "td" => Tag::TableCell,
            "div" => Tag::GenericBlock,
            _ => Tag::Other,
        }
    }
}

/// Convert a node (and its subtree) to markup text.
///
/// `None` converts to an empty string, as do comments, documents and
/// fragments.
///
/// ```rust
/// use chatsave::{convert, Node};
///
/// let h2 = Node::element("h2").with_child(Node::text("Steps"));
/// assert_eq!(convert(&h2), "## Steps\n\n");
/// assert_eq!(convert(None), "");
/// ```
pub fn convert<'a>(node: impl Into<Option<&'a Node>>) -> String {
    match node.into() {
        Some(node) => convert_node(node, None),
        None => String::new(),
    }
}

fn convert_node(node: &Node, parent: Option<&Node>) -> String {
    match node.node_type {
        NodeType::Text => return node.node_value.clone().unwrap_or_default(),
        NodeType::Element => {}
        _ => return String::new(),
    }

    if node.is_tag("pre") {
        if let Some(code) = node.find_descendant("code") {
            return fenced_code_block(code);
        }
    }

    let content: String = node
        .children()
        .map(|child| convert_node(child, Some(node)))
        .collect();

    wrap(Tag::of(node), node, parent, content)
}

/// Apply the element's wrapping rule to its converted content
fn wrap(tag: Tag, node: &Node, parent: Option<&Node>, content: String) -> String {
    match tag {
        Tag::Heading(level) => format!("{} {}\n\n", "#".repeat(level), content),
        Tag::Paragraph => format!("{}\n\n", content),
        Tag::Bold => format!("**{}**", content),
        Tag::Italic => format!("*{}*", content),
        Tag::Code => {
            if parent.is_some_and(|p| p.is_tag("pre")) {
                content
            } else {
                format!("`{}`", content)
            }
        }
        // A missing href leaves the target empty rather than printing a placeholder
        Tag::Link => format!("[{}]({})", content, node.attr("href").unwrap_or_default()),
        Tag::List => format!("{}\n", content),
        Tag::ListItem => format!("{} {}\n", list_item_prefix(node, parent), content.trim()),
        Tag::Quote => format!("> {}\n\n", content),
        Tag::LineBreak => "\n".to_string(),
        Tag::Table => format!("\n{}\n", content),
        Tag::TableRow => format!("| {} |\n", content),
        Tag::TableCell => format!("{} | ", content),
        Tag::GenericBlock => {
            let only_text = node.child_count() == 1 && node.children().all(Node::is_text);
            if node.child_count() == 0 || only_text {
                content
            } else {
                format!("{}\n", content)
            }
        }
        Tag::Other => content,
    }
}

/// `N.` inside an ordered list, counting only `li` siblings; `-` otherwise
fn list_item_prefix(node: &Node, parent: Option<&Node>) -> String {
    let Some(parent) = parent.filter(|p| p.is_tag("ol")) else {
        return "-".to_string();
    };

    let position = parent
        .element_children()
        .filter(|child| child.is_tag("li"))
        .position(|item| std::ptr::eq(item, node))
        .map_or(0, |i| i + 1);

    format!("{}.", position)
}

/// Emit a `pre` block from its code element's raw text
fn fenced_code_block(code: &Node) -> String {
    let language = code
        .attr("class")
        .and_then(|class| LANGUAGE_CLASS.captures(class))
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());

    format!("\n```{}\n{}\n```\n\n", language, code.text_content())
}
