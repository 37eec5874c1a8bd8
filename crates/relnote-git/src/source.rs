//! History source abstraction

use crate::repository::{GitRepo, Result};
use crate::types::RawCommit;

/// Read-only queries the changelog pipeline makes against history
pub trait HistorySource {
    /// Tag names, newest first
    fn tags_by_date(&self) -> Result<Vec<String>>;

    /// Id of the parentless commit history starts from
    fn root_commit(&self) -> Result<String>;

    /// Whether a revision name resolves
    fn revision_exists(&self, revision: &str) -> Result<bool>;

    /// Non-merge commits in `from..to`
    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<RawCommit>>;
}

impl HistorySource for GitRepo {
    fn tags_by_date(&self) -> Result<Vec<String>> {
        GitRepo::tags_by_date(self)
    }

    fn root_commit(&self) -> Result<String> {
        GitRepo::root_commit(self)
    }

    fn revision_exists(&self, revision: &str) -> Result<bool> {
        GitRepo::revision_exists(self, revision)
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<RawCommit>> {
        GitRepo::commits_between(self, from, to)
    }
}
