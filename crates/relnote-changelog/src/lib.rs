//! relnote changelog - changelog generation from commit history
//!
//! This crate turns raw commits into a Markdown changelog: it parses
//! conventional-commit headers, resolves the commit range to read, groups
//! commits under the configured section titles and renders the result.

pub mod formatter;
pub mod generator;
pub mod links;
pub mod output;
pub mod parser;
pub mod range;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::{group_commits, render, sort_commits, Changelog, ChangelogGenerator};
pub use links::TicketLinker;
pub use output::write_changelog;
pub use parser::{CommitParser, ConventionalParser};
pub use range::{resolve_range, RevisionRange};
pub use types::{ParsedCommit, Section};
