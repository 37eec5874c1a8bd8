//! Changelog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit with its header split into conventional-commit fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Original commit hash
    pub hash: String,
    /// Commit type (feat, fix, etc.), empty when the header has no prefix
    pub commit_type: String,
    /// Scope from the parentheses, empty when absent
    pub scope: String,
    /// Header text after the prefix, or the whole header
    pub description: String,
    /// Trimmed commit body
    pub body: String,
    /// Commit timestamp; `None` if it could not be parsed
    pub timestamp: Option<DateTime<Utc>>,
}

impl ParsedCommit {
    /// Check if the commit has a body
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// A section in a changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title
    pub title: String,
    /// Commits in this section
    pub commits: Vec<ParsedCommit>,
}

impl Section {
    /// Create a new section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            commits: Vec::new(),
        }
    }

    /// Add a commit to the section
    pub fn add_commit(&mut self, commit: ParsedCommit) {
        self.commits.push(commit);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
