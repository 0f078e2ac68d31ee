//! Configuration options for conversation export

use serde::Deserialize;

/// Placeholder replaced with the platform name in title templates
pub const PLATFORM_PLACEHOLDER: &str = "{platform}";

/// Options for markup and rich-document export.
///
/// Deserializes with every field optional, so a config file only needs to
/// name the labels it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Title line of the markup export
    pub markup_title: String,

    /// Title line of the rich document
    pub document_title: String,

    /// Label in front of the export date
    pub date_label: String,

    /// Platform name used when the conversation does not carry one
    pub default_platform: String,

    /// Caption prefix for code blocks in rich documents
    pub code_label: String,

    /// Number of `─` characters in a rich-document separator line
    pub separator_width: usize,

    /// Font for code blocks and inline code in rich documents
    pub code_font: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            markup_title: "Saved {platform} Conversation".to_string(),
            document_title: "{platform} Conversation".to_string(),
            date_label: "Date".to_string(),
            default_platform: "AI".to_string(),
            code_label: "Code".to_string(),
            separator_width: 50,
            code_font: "Courier New".to_string(),
        }
    }
}

impl Options {
    /// Markup export title for a platform
    pub fn markup_title_for(&self, platform: Option<&str>) -> String {
        self.fill_platform(&self.markup_title, platform)
    }

    /// Rich document title for a platform
    pub fn document_title_for(&self, platform: Option<&str>) -> String {
        self.fill_platform(&self.document_title, platform)
    }

    /// The separator line used between messages in rich documents
    pub fn separator(&self) -> String {
        "─".repeat(self.separator_width)
    }

    fn fill_platform(&self, template: &str, platform: Option<&str>) -> String {
        let platform = platform
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.default_platform);
        template.replace(PLATFORM_PLACEHOLDER, platform)
    }
}
