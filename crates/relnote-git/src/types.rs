//! Git types

use serde::{Deserialize, Serialize};

/// A commit as read from history, before any message parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Commit hash (full)
    pub hash: String,
    /// First line of the message
    pub header: String,
    /// Everything after the first line, untrimmed
    pub body: String,
    /// Committer date in RFC 3339 format
    pub timestamp: String,
}

impl RawCommit {
    /// Create a RawCommit from a full commit message
    pub fn from_message(
        hash: impl Into<String>,
        message: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        let (header, body) = split_message(message);
        Self {
            hash: hash.into(),
            header: header.to_string(),
            body: body.to_string(),
            timestamp: timestamp.into(),
        }
    }
}

/// Split a commit message into its header line and the remaining body.
///
/// The first line is kept verbatim, leading whitespace included; only
/// trailing whitespace of the whole message is dropped.
pub fn split_message(message: &str) -> (&str, &str) {
    let message = message.trim_end();
    message.split_once('\n').unwrap_or((message, ""))
}
