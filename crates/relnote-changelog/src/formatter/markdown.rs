//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ParsedCommit, Section};

/// Indentation of body lines inside a `<details>` block
const BODY_INDENT: &str = "       ";

/// Stands in for blank body lines so collapsed blocks keep their spacing
const BLANK_LINE_MARKER: &str = "<br><br>";

/// Markdown changelog formatter
///
/// Sections become `##` headings and commits become bullet items. Commits
/// with a body are rendered as collapsible `<details>` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// Format a single commit as a bullet item, without trailing newline
    pub fn format_commit(&self, commit: &ParsedCommit) -> String {
        if !commit.has_body() {
            return format!("* {}", commit.description);
        }

        format!(
            "* <details>\n     <summary>{}</summary>\n{}   </details>",
            commit.description,
            render_body(&commit.body)
        )
    }
}

fn render_body(body: &str) -> String {
    let mut output = String::new();
    for line in body.split('\n') {
        output.push_str(BODY_INDENT);
        if line.trim().is_empty() {
            output.push_str(BLANK_LINE_MARKER);
        } else {
            output.push_str(line);
        }
        output.push('\n');
    }
    output
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, sections), fields(section_count = sections.len()))]
    fn format(&self, sections: &[Section]) -> String {
        let mut output = String::new();

        for section in sections {
            if section.is_empty() {
                continue;
            }

            output.push_str(&format!("\n## {}\n", section.title));
            for commit in &section.commits {
                output.push_str(&self.format_commit(commit));
                output.push('\n');
            }
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}
