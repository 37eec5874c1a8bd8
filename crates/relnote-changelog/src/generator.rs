//! Changelog generation

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, instrument};

use relnote_core::config::{ChangelogConfig, TicketRule, TypeMap};
use relnote_core::error::{GitError, Result};
use relnote_git::HistorySource;

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::links::TicketLinker;
use crate::parser::{CommitParser, ConventionalParser};
use crate::range::{resolve_range, RevisionRange};
use crate::types::{ParsedCommit, Section};

/// Sort commits by timestamp, oldest first.
///
/// The sort is stable, and unset timestamps sort before all others.
pub fn sort_commits(commits: &mut [ParsedCommit]) {
    commits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// Bucket commits by type into sections.
///
/// Sections follow type map order, with the fallback section last; empty
/// sections are left out. Commits keep their relative order within a
/// section. An entry whose key repeats an earlier one gets its own section
/// holding the same commits.
pub fn group_commits(
    commits: &[ParsedCommit],
    type_map: &TypeMap,
    fallback_title: &str,
) -> Vec<Section> {
    let mut grouped: HashMap<&str, Vec<&ParsedCommit>> = HashMap::new();
    let mut fallback = Section::new(fallback_title);

    for commit in commits {
        if type_map.contains_key(&commit.commit_type) {
            grouped
                .entry(commit.commit_type.as_str())
                .or_default()
                .push(commit);
        } else {
            fallback.add_commit(commit.clone());
        }
    }

    let mut sections = Vec::new();
    for entry in type_map {
        if let Some(bucket) = grouped.get(entry.key.as_str()) {
            let mut section = Section::new(&entry.title);
            for commit in bucket {
                section.add_commit((*commit).clone());
            }
            sections.push(section);
        }
    }

    let fallback_count = fallback.commits.len();
    if !fallback.is_empty() {
        sections.push(fallback);
    }

    debug!(
        section_count = sections.len(),
        fallback_count, "changelog sections built"
    );
    sections
}

/// Format grouped sections as Markdown and link ticket references
/// anywhere in the result
fn format_document(sections: &[Section], linker: Option<&TicketLinker>) -> String {
    let markdown = MarkdownFormatter::new().format(sections);
    match linker {
        Some(linker) => linker.link(&markdown),
        None => markdown,
    }
}

/// Render commits to a Markdown changelog.
///
/// Commits are sorted, grouped and formatted; if a ticket rule is given,
/// ticket references anywhere in the document are turned into links. The
/// rule is compiled before anything is rendered.
pub fn render(
    commits: &[ParsedCommit],
    type_map: &TypeMap,
    fallback_title: &str,
    ticket_rule: Option<&TicketRule>,
) -> Result<String> {
    let linker = ticket_rule.map(TicketLinker::new).transpose()?;

    let mut sorted = commits.to_vec();
    sort_commits(&mut sorted);
    let sections = group_commits(&sorted, type_map, fallback_title);
    Ok(format_document(&sections, linker.as_ref()))
}

/// A generated changelog together with the range and grouping it came from
#[derive(Debug, Clone, Serialize)]
pub struct Changelog {
    /// Commit range the changelog covers
    pub range: RevisionRange,
    /// Grouped commits, in output order
    pub sections: Vec<Section>,
    /// Rendered document
    pub content: String,
}

/// Changelog generator
///
/// Runs the full pipeline against a [`HistorySource`]: validate the
/// requested endpoints, resolve the range, fetch, parse, group and render.
pub struct ChangelogGenerator {
    parser: ConventionalParser,
    linker: Option<TicketLinker>,
    config: ChangelogConfig,
}

impl ChangelogGenerator {
    /// Create a new generator.
    ///
    /// Fails if the configured ticket pattern does not compile.
    pub fn new(config: ChangelogConfig) -> Result<Self> {
        let linker = config
            .ticket_rule()
            .as_ref()
            .map(TicketLinker::new)
            .transpose()?;

        Ok(Self {
            parser: ConventionalParser::new(),
            linker,
            config,
        })
    }

    /// Check that every supplied endpoint names an existing revision
    #[instrument(skip(self, source))]
    pub fn validate_endpoints(
        &self,
        source: &dyn HistorySource,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<()> {
        for revision in [from, to].into_iter().flatten() {
            if revision.is_empty() {
                continue;
            }
            if !source.revision_exists(revision)? {
                return Err(GitError::ReferenceNotFound(revision.to_string()).into());
            }
        }
        Ok(())
    }

    /// Fetch and parse the commits in `range`
    #[instrument(skip(self, source))]
    pub fn collect(
        &self,
        source: &dyn HistorySource,
        range: &RevisionRange,
    ) -> Result<Vec<ParsedCommit>> {
        let raw = source.commits_between(&range.from, &range.to)?;
        let parsed: Vec<ParsedCommit> = raw.iter().map(|c| self.parser.parse(c)).collect();
        debug!(commit_count = parsed.len(), "parsed commits");
        Ok(parsed)
    }

    /// Run the whole pipeline
    #[instrument(skip(self, source))]
    pub fn generate(
        &self,
        source: &dyn HistorySource,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Changelog> {
        self.validate_endpoints(source, from, to)?;
        let range = resolve_range(source, from, to)?;
        info!(from = %range.from, to = %range.to, "generating changelog");

        let mut commits = self.collect(source, &range)?;
        sort_commits(&mut commits);
        let sections = group_commits(
            &commits,
            &self.config.type_map,
            &self.config.fallback_title,
        );
        let content = format_document(&sections, self.linker.as_ref());
        debug!(output_len = content.len(), "changelog formatted");

        Ok(Changelog {
            range,
            sections,
            content,
        })
    }
}
