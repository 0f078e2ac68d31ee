//! HTML parsing support.
//!
//! This module parses HTML strings (typically the inner HTML of a message
//! container) and converts them to the CDP-style Node structure used by the
//! converter.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree.
///
/// The returned root is the synthetic `<html>` element wrapping the
/// fragment; it converts transparently.
///
/// # Example
///
/// ```rust
/// use chatsave::{convert, parse_html};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
/// assert_eq!(convert(&node), "# Hello *World*\n\n");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
