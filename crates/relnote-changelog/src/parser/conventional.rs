//! Conventional Commits header parser
//!
//! Recognizes `type(scope): description` headers:
//! https://www.conventionalcommits.org/

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use super::CommitParser;
use crate::types::ParsedCommit;
use relnote_git::{split_message, RawCommit};

/// Regex for parsing conventional commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?:\s*(?P<description>.*)$")
        .expect("Invalid regex")
});

/// Parser for Conventional Commits headers
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a header line, body and RFC 3339 timestamp
    pub fn parse_parts(&self, header: &str, body: &str, timestamp: &str) -> ParsedCommit {
        let (commit_type, scope, description) = match HEADER_REGEX.captures(header) {
            Some(caps) => (
                caps["type"].to_string(),
                caps.name("scope")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                caps["description"].to_string(),
            ),
            None => (String::new(), String::new(), header.to_string()),
        };

        ParsedCommit {
            hash: String::new(),
            commit_type,
            scope,
            description,
            body: body.trim().to_string(),
            timestamp: parse_timestamp(timestamp),
        }
    }

    /// Parse a complete commit message, splitting off the header line
    pub fn parse_message(&self, message: &str, timestamp: &str) -> ParsedCommit {
        let (header, body) = split_message(message);
        self.parse_parts(header, body, timestamp)
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &RawCommit) -> ParsedCommit {
        ParsedCommit {
            hash: commit.hash.clone(),
            ..self.parse_parts(&commit.header, &commit.body, &commit.timestamp)
        }
    }
}

/// A malformed date leaves the commit unordered instead of failing the run
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!(timestamp = raw, error = %e, "unparseable commit date, leaving unset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    const TS: &str = "2024-03-01T12:00:00+01:00";

    #[test]
    fn test_parse_simple_feat() {
        let parsed = ConventionalParser::new().parse_parts("feat: add new feature", "", TS);

        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.description, "add new feature");
        assert!(parsed.scope.is_empty());
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn test_parse_with_scope() {
        let parsed = ConventionalParser::new().parse_parts("fix(parser): handle edge case", "", TS);

        assert_eq!(parsed.commit_type, "fix");
        assert_eq!(parsed.scope, "parser");
        assert_eq!(parsed.description, "handle edge case");
    }

    #[test]
    fn test_type_case_preserved() {
        let parsed = ConventionalParser::new().parse_parts("FEAT: shout", "", TS);
        assert_eq!(parsed.commit_type, "FEAT");
    }

    #[test]
    fn test_no_space_after_colon() {
        let parsed = ConventionalParser::new().parse_parts("docs:readme", "", TS);
        assert_eq!(parsed.commit_type, "docs");
        assert_eq!(parsed.description, "readme");
    }

    #[test]
    fn test_parse_non_conventional() {
        let header = "Just a regular commit message";
        let parsed = ConventionalParser::new().parse_parts(header, "", TS);

        assert!(parsed.commit_type.is_empty());
        assert!(parsed.scope.is_empty());
        assert_eq!(parsed.description, header);
    }

    #[test]
    fn test_breaking_marker_is_not_recognized() {
        let header = "feat!: breaking change";
        let parsed = ConventionalParser::new().parse_parts(header, "", TS);

        assert!(parsed.commit_type.is_empty());
        assert_eq!(parsed.description, header);
    }

    #[test]
    fn test_non_letter_type_is_not_recognized() {
        let parsed = ConventionalParser::new().parse_parts("v2: bump", "", TS);
        assert!(parsed.commit_type.is_empty());
        assert_eq!(parsed.description, "v2: bump");
    }

    #[test]
    fn test_body_is_trimmed() {
        let parsed = ConventionalParser::new().parse_parts(
            "feat: add feature",
            "\n\n  This is the body\n\nWith multiple paragraphs.  \n",
            TS,
        );
        assert_eq!(parsed.body, "This is the body\n\nWith multiple paragraphs.");
    }

    #[test]
    fn test_timestamp_parsed_to_utc() {
        let parsed = ConventionalParser::new().parse_parts("feat: x", "", "1970-01-01T01:00:10+01:00");
        assert_eq!(parsed.timestamp, Some(at(10)));
    }

    #[test]
    fn test_bad_timestamp_is_unset() {
        let parsed = ConventionalParser::new().parse_parts("feat: x", "", "yesterday");
        assert_eq!(parsed.timestamp, None);
        assert_eq!(parsed.description, "x");
    }

    #[test]
    fn test_parse_message() {
        let parsed = ConventionalParser::new()
            .parse_message("refactor(core): split module\n\nMoved things.\n", TS);
        assert_eq!(parsed.commit_type, "refactor");
        assert_eq!(parsed.scope, "core");
        assert_eq!(parsed.body, "Moved things.");
    }

    #[test]
    fn test_indented_header_is_unclassified() {
        let parsed = ConventionalParser::new().parse_message("  fix: y\nbody", TS);
        assert!(parsed.commit_type.is_empty());
        assert_eq!(parsed.description, "  fix: y");
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_parse_raw_commit_keeps_hash() {
        let raw = RawCommit::from_message("deadbeef", "ci: pipeline", TS);
        let parsed = ConventionalParser::new().parse(&raw);
        assert_eq!(parsed.hash, "deadbeef");
        assert_eq!(parsed.commit_type, "ci");
    }

    #[test]
    fn test_empty_header() {
        let parsed = ConventionalParser::new().parse_parts("", "", TS);
        assert!(parsed.description.is_empty());
        assert!(parsed.commit_type.is_empty());
    }
}
