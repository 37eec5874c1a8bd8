//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::Section;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format grouped sections to a document
    fn format(&self, sections: &[Section]) -> String;
}
