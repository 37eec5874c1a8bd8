//! Commit range resolution

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use relnote_core::error::{ChangelogError, GitError, Result};
use relnote_git::HistorySource;

/// Concrete endpoints of the history to read: commits after `from` up to
/// and including `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    /// Exclusive start
    pub from: String,
    /// Inclusive end
    pub to: String,
}

/// Determine the commit range to read.
///
/// With neither endpoint given, the range covers the latest release: from
/// the second newest tag (or the root commit when there is only one tag) to
/// the newest tag. Supplying exactly one endpoint is an error. Supplied
/// endpoints are returned as-is; empty strings count as absent.
#[instrument(skip(source))]
pub fn resolve_range(
    source: &dyn HistorySource,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<RevisionRange> {
    let from = from.filter(|s| !s.is_empty());
    let to = to.filter(|s| !s.is_empty());

    match (from, to) {
        (Some(from), Some(to)) => Ok(RevisionRange {
            from: from.to_string(),
            to: to.to_string(),
        }),
        (None, None) => {
            let tags = source.tags_by_date()?;
            let mut tags = tags.into_iter();
            let to = tags.next().ok_or(GitError::NoTags)?;
            let from = match tags.next() {
                Some(previous) => previous,
                None => {
                    debug!(tag = %to, "only one tag, starting from the root commit");
                    source.root_commit()?
                }
            };
            info!(from = %from, to = %to, "resolved range from tags");
            Ok(RevisionRange { from, to })
        }
        _ => Err(ChangelogError::IncompleteRange.into()),
    }
}
