//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::defaults::{DEFAULT_FALLBACK_TITLE, DEFAULT_TYPE_MAPPINGS};

/// Root configuration
///
/// Only the `changelog` section is read from configuration files; the
/// repository location, range endpoints and output path come from the
/// command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the git repository
    #[serde(skip)]
    pub repo: PathBuf,

    /// Start of the commit range (exclusive)
    #[serde(skip)]
    pub from: Option<String>,

    /// End of the commit range (inclusive)
    #[serde(skip)]
    pub to: Option<String>,

    /// Destination file; stdout when unset
    #[serde(skip)]
    pub output: Option<PathBuf>,

    /// Changelog rendering configuration
    pub changelog: ChangelogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            from: None,
            to: None,
            output: None,
            changelog: ChangelogConfig::default(),
        }
    }
}

impl Config {
    /// Strip surrounding double quotes from the repository path.
    ///
    /// Shells on some platforms hand quoted paths through verbatim.
    pub fn clean_repo_path(&mut self) {
        if let Some(raw) = self.repo.to_str() {
            let trimmed = raw.trim_matches('"');
            if trimmed.len() != raw.len() {
                self.repo = PathBuf::from(trimmed);
            }
        }
    }
}

/// Changelog rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Ordered commit type to section title mapping
    pub type_map: TypeMap,

    /// Title of the section for commits with unknown types
    pub fallback_title: String,

    /// Regex matching ticket references in the rendered document
    pub ticket_pattern: Option<String>,

    /// Link target for tickets, `{ticket}` is replaced with the match
    pub ticket_template_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            type_map: TypeMap::default(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            ticket_pattern: None,
            ticket_template_url: None,
        }
    }
}

impl ChangelogConfig {
    /// Ticket linking rule, if a non-empty pattern is configured
    pub fn ticket_rule(&self) -> Option<TicketRule> {
        let pattern = self.ticket_pattern.as_deref().filter(|p| !p.is_empty())?;
        Some(TicketRule {
            pattern: pattern.to_string(),
            template_url: self.ticket_template_url.clone().unwrap_or_default(),
        })
    }
}

/// Uncompiled ticket linking rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRule {
    /// Regex pattern
    pub pattern: String,
    /// URL template containing `{ticket}`
    pub template_url: String,
}

/// A single commit type to display title mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMappingEntry {
    /// Commit type as written in the header (e.g. `feat`)
    pub key: String,
    /// Section title
    pub title: String,
}

impl TypeMappingEntry {
    /// Create a new mapping entry
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Ordered list of type mappings
///
/// Order determines section order in the rendered changelog. Duplicate
/// keys are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap(Vec<TypeMappingEntry>);

impl TypeMap {
    /// Create a type map from explicit entries
    pub fn new(entries: Vec<TypeMappingEntry>) -> Self {
        Self(entries)
    }

    /// Parse `key=Title,key=Title` pairs.
    ///
    /// Pairs without `=` are skipped; keys and titles are trimmed. Callers
    /// treat empty input as "no mappings given" and keep the defaults.
    pub fn parse_pairs(input: &str) -> Self {
        let mut entries = Vec::new();
        for pair in input.split(',') {
            match pair.split_once('=') {
                Some((key, title)) => entries.push(TypeMappingEntry::new(key.trim(), title.trim())),
                None => warn!(pair, "skipping type mapping without '='"),
            }
        }
        Self(entries)
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, TypeMappingEntry> {
        self.0.iter()
    }

    /// Whether `key` is a recognized type
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|e| e.key == key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self(
            DEFAULT_TYPE_MAPPINGS
                .iter()
                .map(|(key, title)| TypeMappingEntry::new(*key, *title))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a TypeMap {
    type Item = &'a TypeMappingEntry;
    type IntoIter = std::slice::Iter<'a, TypeMappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
