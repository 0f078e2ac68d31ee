//! WordprocessingML body generation
//!
//! Each document node becomes one or more `<w:p>` paragraphs. Formatting is
//! written inline (direct paragraph and run properties) except for the
//! heading styles, which live in `styles.xml`.

use chatsave_core::{parse, Conversation, DocumentNode, InlineRun, Options};
use quick_xml::escape::escape;

/// Half-points for code text
const CODE_SIZE: u32 = 20;
/// Shading behind code block lines
const CODE_BLOCK_FILL: &str = "F5F5F5";
/// Shading behind inline code
const INLINE_CODE_FILL: &str = "F0F0F0";
const QUOTE_INDENT: u32 = 720;
const LIST_INDENT: u32 = 360;

#[derive(Debug, Clone, Copy, Default)]
struct Spacing {
    before: Option<u32>,
    after: Option<u32>,
    line: Option<u32>,
}

impl Spacing {
    fn after(after: u32) -> Self {
        Self {
            after: Some(after),
            ..Self::default()
        }
    }

    fn around(before: u32, after: u32) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
            line: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Run {
    text: String,
    bold: bool,
    italic: bool,
    font: Option<String>,
    size: Option<u32>,
    fill: Option<&'static str>,
}

impl Run {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn monospace(mut self, font: &str, fill: Option<&'static str>) -> Self {
        self.font = Some(font.to_string());
        self.size = Some(CODE_SIZE);
        self.fill = fill;
        self
    }

    fn from_inline(run: &InlineRun, options: &Options) -> Self {
        if run.is_plain() {
            return Run::new(run.text.as_str());
        }
        let mut out = Run::new(run.text.as_str());
        out.bold = run.bold;
        out.italic = run.italic;
        if run.monospace {
            out = out.monospace(&options.code_font, Some(INLINE_CODE_FILL));
        }
        out
    }

    fn has_properties(&self) -> bool {
        self.bold || self.italic || self.font.is_some() || self.size.is_some() || self.fill.is_some()
    }

    fn write(&self, out: &mut String) {
        out.push_str("<w:r>");
        if self.has_properties() {
            out.push_str("<w:rPr>");
            if let Some(font) = &self.font {
                let font = escape(font.as_str());
                out.push_str(&format!(
                    r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
                ));
            }
            if self.bold {
                out.push_str("<w:b/>");
            }
            if self.italic {
                out.push_str("<w:i/>");
            }
            if let Some(size) = self.size {
                out.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
            }
            if let Some(fill) = self.fill {
                out.push_str(&format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/>"#));
            }
            out.push_str("</w:rPr>");
        }
        out.push_str(r#"<w:t xml:space="preserve">"#);
        out.push_str(&escape(self.text.as_str()));
        out.push_str("</w:t></w:r>");
    }
}

#[derive(Debug, Clone, Default)]
struct Paragraph {
    style: Option<String>,
    fill: Option<&'static str>,
    spacing: Option<Spacing>,
    indent: Option<u32>,
    centered: bool,
    runs: Vec<Run>,
}

impl Paragraph {
    fn new() -> Self {
        Self::default()
    }

    fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    fn fill(mut self, fill: &'static str) -> Self {
        self.fill = Some(fill);
        self
    }

    fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    fn indent(mut self, left: u32) -> Self {
        self.indent = Some(left);
        self
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    fn runs(mut self, runs: impl IntoIterator<Item = Run>) -> Self {
        self.runs.extend(runs);
        self
    }

    fn has_properties(&self) -> bool {
        self.style.is_some()
            || self.fill.is_some()
            || self.spacing.is_some()
            || self.indent.is_some()
            || self.centered
    }

    fn write(&self, out: &mut String) {
        out.push_str("<w:p>");
        if self.has_properties() {
            out.push_str("<w:pPr>");
            if let Some(style) = &self.style {
                out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape(style.as_str())));
            }
            if let Some(fill) = self.fill {
                out.push_str(&format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/>"#));
            }
            if let Some(spacing) = self.spacing {
                out.push_str("<w:spacing");
                if let Some(before) = spacing.before {
                    out.push_str(&format!(r#" w:before="{before}""#));
                }
                if let Some(after) = spacing.after {
                    out.push_str(&format!(r#" w:after="{after}""#));
                }
                if let Some(line) = spacing.line {
                    out.push_str(&format!(r#" w:line="{line}" w:lineRule="auto""#));
                }
                out.push_str("/>");
            }
            if let Some(left) = self.indent {
                out.push_str(&format!(r#"<w:ind w:left="{left}"/>"#));
            }
            if self.centered {
                out.push_str(r#"<w:jc w:val="center"/>"#);
            }
            out.push_str("</w:pPr>");
        }
        for run in &self.runs {
            run.write(out);
        }
        out.push_str("</w:p>");
    }
}

fn inline_runs<'a>(runs: &'a [InlineRun], options: &'a Options) -> impl Iterator<Item = Run> + 'a {
    runs.iter().map(move |run| Run::from_inline(run, options))
}

fn separator(options: &Options) -> Paragraph {
    Paragraph::new()
        .spacing(Spacing::around(200, 200))
        .run(Run::new(options.separator()))
}

/// Paragraphs for one document node
fn node_paragraphs(node: &DocumentNode, options: &Options) -> Vec<Paragraph> {
    match node {
        // Heading styles carry their own weight, so inline styling is dropped
        DocumentNode::Heading { level, .. } => vec![Paragraph::new()
            .style(format!("Heading{}", level))
            .run(Run::new(node.text()))],
        DocumentNode::Paragraph { runs } => vec![Paragraph::new()
            .spacing(Spacing::after(100))
            .runs(inline_runs(runs, options))],
        DocumentNode::BlankLine => vec![Paragraph::new()],
        DocumentNode::Rule => vec![separator(options)],
        DocumentNode::Quote { runs } => vec![Paragraph::new()
            .spacing(Spacing::around(100, 100))
            .indent(QUOTE_INDENT)
            .runs(inline_runs(runs, options).map(Run::italic))],
        DocumentNode::ListItem {
            ordered,
            index,
            runs,
        } => {
            let marker = match (ordered, index) {
                (true, Some(n)) => format!("{}. ", n),
                (true, None) => "1. ".to_string(),
                (false, _) => "• ".to_string(),
            };
            vec![Paragraph::new()
                .indent(LIST_INDENT)
                .run(Run::new(marker))
                .runs(inline_runs(runs, options))]
        }
        DocumentNode::CodeBlock { language, lines } => {
            let mut paragraphs = Vec::with_capacity(lines.len() + 2);
            if let Some(language) = language {
                paragraphs.push(
                    Paragraph::new()
                        .spacing(Spacing::around(200, 100))
                        .run(Run::new(format!("{} ({}):", options.code_label, language)).bold()),
                );
            }
            for line in lines {
                paragraphs.push(
                    Paragraph::new()
                        .fill(CODE_BLOCK_FILL)
                        .spacing(Spacing {
                            line: Some(276),
                            ..Spacing::default()
                        })
                        .run(Run::new(line.as_str()).monospace(&options.code_font, None)),
                );
            }
            paragraphs.push(Paragraph::new());
            paragraphs
        }
    }
}

/// Build the `<w:body>` content for a conversation
pub(crate) fn body_xml(conversation: &Conversation, options: &Options) -> String {
    let mut body = String::new();

    Paragraph::new()
        .style("Heading1")
        .centered()
        .run(Run::new(options.document_title_for(conversation.platform())))
        .write(&mut body);
    Paragraph::new()
        .spacing(Spacing::after(400))
        .centered()
        .run(Run::new(format!("{}: {}", options.date_label, conversation.date)))
        .write(&mut body);

    for message in conversation.messages() {
        Paragraph::new()
            .style("Heading2")
            .spacing(Spacing::around(300, 200))
            .run(Run::new(message.role.as_str()))
            .write(&mut body);

        for node in parse(&message.text) {
            for paragraph in node_paragraphs(&node, options) {
                paragraph.write(&mut body);
            }
        }

        separator(options).write(&mut body);
    }

    body
}

/// Wrap body content in a complete `word/document.xml`
pub(crate) fn wrap_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsave_core::Message;

    fn xml(node: &DocumentNode) -> String {
        let mut out = String::new();
        for paragraph in node_paragraphs(node, &Options::default()) {
            paragraph.write(&mut out);
        }
        out
    }

    #[test]
    fn test_heading_style() {
        let node = DocumentNode::Heading {
            level: 3,
            runs: vec![InlineRun::plain("Setup")],
        };
        assert_eq!(
            xml(&node),
            r#"<w:p><w:pPr><w:pStyle w:val="Heading3"/></w:pPr><w:r><w:t xml:space="preserve">Setup</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_heading_drops_inline_styling() {
        let node = DocumentNode::Heading {
            level: 2,
            runs: vec![
                InlineRun::styled("Bold", true, false, false),
                InlineRun::plain(" title"),
            ],
        };
        let out = xml(&node);
        assert!(!out.contains("<w:rPr>"));
        assert!(out.contains(">Bold title</w:t>"));
    }

    #[test]
    fn test_plain_run_has_no_properties() {
        let node = DocumentNode::Paragraph {
            runs: vec![InlineRun::plain("just text")],
        };
        assert_eq!(
            xml(&node),
            r#"<w:p><w:pPr><w:spacing w:after="100"/></w:pPr><w:r><w:t xml:space="preserve">just text</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_run_properties() {
        let node = DocumentNode::Paragraph {
            runs: vec![
                InlineRun::styled("b", true, true, false),
                InlineRun::styled("c", false, false, true),
            ],
        };
        let out = xml(&node);
        assert!(out.starts_with(r#"<w:p><w:pPr><w:spacing w:after="100"/></w:pPr>"#));
        assert!(out.contains("<w:rPr><w:b/><w:i/></w:rPr>"));
        assert!(out.contains(
            r#"<w:rPr><w:rFonts w:ascii="Courier New" w:hAnsi="Courier New" w:cs="Courier New"/><w:sz w:val="20"/><w:shd w:val="clear" w:color="auto" w:fill="F0F0F0"/></w:rPr>"#
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let node = DocumentNode::Paragraph {
            runs: vec![InlineRun::plain("a < b && c > d")],
        };
        assert!(xml(&node).contains("a &lt; b &amp;&amp; c &gt; d"));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(xml(&DocumentNode::BlankLine), "<w:p></w:p>");
    }

    #[test]
    fn test_quote_is_italic_and_indented() {
        let node = DocumentNode::Quote {
            runs: vec![InlineRun::plain("wise")],
        };
        let out = xml(&node);
        assert!(out.contains(r#"<w:spacing w:before="100" w:after="100"/><w:ind w:left="720"/>"#));
        assert!(out.contains("<w:rPr><w:i/></w:rPr>"));
    }

    #[test]
    fn test_list_markers() {
        let bullet = DocumentNode::ListItem {
            ordered: false,
            index: None,
            runs: vec![InlineRun::plain("x")],
        };
        assert!(xml(&bullet).contains(">• </w:t>"));

        let numbered = DocumentNode::ListItem {
            ordered: true,
            index: Some(7),
            runs: vec![InlineRun::plain("x")],
        };
        let out = xml(&numbered);
        assert!(out.contains(">7. </w:t>"));
        assert!(out.contains(r#"<w:ind w:left="360"/>"#));
    }

    #[test]
    fn test_code_block() {
        let node = DocumentNode::CodeBlock {
            language: Some("rust".to_string()),
            lines: vec!["fn a() {}".to_string(), "  b".to_string()],
        };
        let paragraphs = node_paragraphs(&node, &Options::default());
        // caption, two lines, trailing empty paragraph
        assert_eq!(paragraphs.len(), 4);

        let out = xml(&node);
        assert!(out.contains("<w:b/></w:rPr><w:t xml:space=\"preserve\">Code (rust):</w:t>"));
        assert!(out.contains(r#"w:fill="F5F5F5""#));
        assert!(out.contains(r#"<w:spacing w:line="276" w:lineRule="auto"/>"#));
        assert!(out.contains(">  b</w:t>"));
        assert!(out.ends_with("<w:p></w:p>"));
    }

    #[test]
    fn test_code_block_without_language_has_no_caption() {
        let node = DocumentNode::CodeBlock {
            language: None,
            lines: vec!["x".to_string()],
        };
        assert_eq!(node_paragraphs(&node, &Options::default()).len(), 2);
        assert!(!xml(&node).contains("Code"));
    }

    #[test]
    fn test_body_layout() {
        let mut conversation = Conversation::new(Some("Claude".to_string()), "2024-05-01");
        conversation.push(Message::new("User", "Hello"));

        let body = body_xml(&conversation, &Options::default());
        let title = body.find("Claude Conversation").unwrap();
        let date = body.find("Date: 2024-05-01").unwrap();
        let role = body.find(">User</w:t>").unwrap();
        let text = body.find(">Hello</w:t>").unwrap();
        assert!(title < date && date < role && role < text);
        assert!(body.contains(r#"<w:pStyle w:val="Heading1"/><w:jc w:val="center"/>"#));
        assert!(body.contains(r#"<w:spacing w:before="300" w:after="200"/>"#));
        assert!(body.ends_with(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            "─".repeat(50)
        )));
    }
}
