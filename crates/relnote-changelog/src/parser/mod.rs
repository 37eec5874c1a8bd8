//! Commit parsing

mod conventional;

pub use conventional::ConventionalParser;

use crate::types::ParsedCommit;
use relnote_git::RawCommit;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a raw commit into a structured format.
    ///
    /// Parsing never fails: anything the parser does not recognize is kept
    /// verbatim as the description.
    fn parse(&self, commit: &RawCommit) -> ParsedCommit;
}
