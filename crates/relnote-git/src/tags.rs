//! Tag operations

use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use relnote_core::error::GitError;

impl GitRepo {
    /// List tag names, newest first by the committer date of the tagged
    /// commit. Ties are broken by name, descending.
    ///
    /// Tags that do not peel to a commit are skipped.
    #[instrument(skip(self))]
    pub fn tags_by_date(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push((commit.committer().when().seconds(), name.to_string())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that is not a commit"),
            }
        }

        tags.sort_by(|a, b| b.cmp(a));
        debug!(count = tags.len(), "listed tags by date");
        Ok(tags.into_iter().map(|(_, name)| name).collect())
    }

    /// Check whether a revision (tag, branch or commit id) exists
    #[instrument(skip(self))]
    pub fn revision_exists(&self, revision: &str) -> Result<bool> {
        match self.repo.revparse_single(revision) {
            Ok(_) => Ok(true),
            Err(e)
                if matches!(
                    e.code(),
                    git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}
