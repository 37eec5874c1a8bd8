//! Commit history operations

use chrono::{FixedOffset, TimeZone};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::RawCommit;
use relnote_core::error::GitError;

impl GitRepo {
    /// Get non-merge commits reachable from `to` but not from `from`,
    /// newest first (the `git log --no-merges from..to` set).
    #[instrument(skip(self))]
    pub fn commits_between(&self, from: &str, to: &str) -> Result<Vec<RawCommit>> {
        let from_oid = self.resolve_commit(from)?;
        let to_oid = self.resolve_commit(to)?;

        let walk = || -> std::result::Result<Vec<RawCommit>, git2::Error> {
            let mut revwalk = self.repo.revwalk()?;
            revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
            revwalk.push(to_oid)?;
            revwalk.hide(from_oid)?;

            let mut commits = Vec::new();
            for oid in revwalk {
                let commit = self.repo.find_commit(oid?)?;
                if commit.parent_count() > 1 {
                    continue;
                }
                commits.push(commit_to_raw(&commit));
            }
            Ok(commits)
        };

        let commits = walk().map_err(|e| {
            GitError::FetchFailed(format!("{}..{}: {}", from, to, e.message()))
        })?;
        debug!(count = commits.len(), "read commits in range");
        Ok(commits)
    }

    /// Find the parentless commit history starts from.
    ///
    /// With several roots reachable from HEAD the oldest one is returned.
    #[instrument(skip(self))]
    pub fn root_commit(&self) -> Result<String> {
        let head = self
            .head_commit()
            .map_err(|e| GitError::FetchFailed(format!("repository has no commits: {}", e)))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut root = None;
        for oid in revwalk {
            let oid = oid?;
            if self.repo.find_commit(oid)?.parent_count() == 0 {
                root = Some(oid);
            }
        }

        let root = root.ok_or_else(|| GitError::FetchFailed("no root commit found".to_string()))?;
        debug!(root = %root, "found root commit");
        Ok(root.to_string())
    }

    /// Resolve a revision (tag, branch, hash) to the commit it names
    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::ReferenceNotFound(revision.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;
        Ok(object.peel_to_commit()?.id())
    }
}

/// Convert a git2 Commit to a RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>) -> RawCommit {
    let message = String::from_utf8_lossy(commit.message_bytes());
    let when = commit.committer().when();

    // Unrepresentable dates become an empty timestamp, which the parser
    // treats as unset
    let timestamp = FixedOffset::east_opt(when.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(when.seconds(), 0).single())
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();

    RawCommit::from_message(commit.id().to_string(), &message, timestamp)
}
