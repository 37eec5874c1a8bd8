//! Generate command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use relnote_changelog::{write_changelog, Changelog, ChangelogGenerator};
use relnote_core::config::{load_config, load_config_or_default, validate_config, Config, TypeMap};
use relnote_core::RelnoteError;
use relnote_git::GitRepo;

use crate::cli::{output, Cli, OutputFormat};

/// Generate a changelog from git commit messages
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Starting reference, exclusive (tag or commit hash). If omitted
    /// together with --to, the tag before the latest tag is used, or the
    /// first commit when there is only one tag
    #[arg(long)]
    pub from: Option<String>,

    /// Ending reference (tag or commit hash). If omitted together with
    /// --from, the latest tag is used
    #[arg(long)]
    pub to: Option<String>,

    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Comma-separated type to title mappings, e.g.
    /// 'feat=Features,fix=Bug Fixes'. Replaces the default mappings
    #[arg(long, value_name = "MAPPINGS")]
    pub type_map: Option<String>,

    /// Title of the section for commits of unknown types [default: Other]
    #[arg(long, value_name = "TITLE")]
    pub fallback_type_title: Option<String>,

    /// Regex matching ticket references to turn into links
    #[arg(long, value_name = "REGEX")]
    pub ticket_pattern: Option<String>,

    /// Link target for tickets; {ticket} is replaced with the match
    #[arg(long, value_name = "URL")]
    pub ticket_template_url: Option<String>,

    /// Output file, must not exist yet (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            repo = %self.repo.display(),
            from = ?self.from,
            to = ?self.to,
            "executing generate command"
        );

        let mut config = self.apply(Config::default());
        config.clean_repo_path();

        let repo = GitRepo::discover(&config.repo).map_err(RelnoteError::from)?;

        let file_config = match &cli.config {
            Some(path) => load_config(path)?,
            None => load_config_or_default(repo.path())?.0,
        };
        let config = Config {
            repo: config.repo,
            ..self.apply(file_config)
        };
        validate_config(&config)?;

        let generator = ChangelogGenerator::new(config.changelog.clone())?;
        let changelog = generator.generate(&repo, config.from.as_deref(), config.to.as_deref())?;

        if !cli.quiet {
            print_parameters(&config, &changelog);
        }

        let document = match cli.format {
            OutputFormat::Text => changelog.content,
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&changelog)?;
                json.push('\n');
                json
            }
        };

        match &config.output {
            Some(path) => {
                write_changelog(path, &document)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Changelog written to {}",
                        style(path.display()).cyan()
                    ));
                }
            }
            None => print!("{}", document),
        }

        Ok(())
    }

    /// Layer command-line flags over a base configuration
    fn apply(&self, mut config: Config) -> Config {
        config.repo = self.repo.clone();
        config.from = self.from.clone();
        config.to = self.to.clone();
        config.output = self.output.clone();

        // An empty --type-map is treated as not given
        if let Some(pairs) = self.type_map.as_deref().filter(|p| !p.trim().is_empty()) {
            config.changelog.type_map = TypeMap::parse_pairs(pairs);
        }
        if let Some(title) = &self.fallback_type_title {
            config.changelog.fallback_title = title.clone();
        }
        if self.ticket_pattern.is_some() {
            config.changelog.ticket_pattern = self.ticket_pattern.clone();
        }
        if self.ticket_template_url.is_some() {
            config.changelog.ticket_template_url = self.ticket_template_url.clone();
        }

        config
    }
}

fn print_parameters(config: &Config, changelog: &Changelog) {
    let changelog_config = &config.changelog;
    let or_none = |value: &Option<String>| value.clone().unwrap_or_default();

    eprintln!("{}", output::header("Changelog Generation Parameters:"));
    eprintln!("{}", output::key_value("Repository", &config.repo.display().to_string()));
    eprintln!("{}", output::key_value("From", &changelog.range.from));
    eprintln!("{}", output::key_value("To", &changelog.range.to));
    eprintln!(
        "{}",
        output::key_value("Ticket Pattern", &or_none(&changelog_config.ticket_pattern))
    );
    eprintln!(
        "{}",
        output::key_value(
            "Ticket Template URL",
            &or_none(&changelog_config.ticket_template_url)
        )
    );
    eprintln!("{}", output::key_value("Type Mappings", ""));
    for entry in &changelog_config.type_map {
        eprintln!("    - {}: {}", entry.key, entry.title);
    }
    eprintln!(
        "{}",
        output::key_value("Fallback Type Title", &changelog_config.fallback_title)
    );
    eprintln!("{}", style("-".repeat(62)).dim());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use git2::{Commit, Oid, Repository, Signature, Time};
    use relnote_core::config::TypeMappingEntry;
    use relnote_core::{ChangelogError, ConfigError, GitError};
    use tempfile::TempDir;

    use crate::cli::Commands;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn generate_command(cli: &Cli) -> &GenerateCommand {
        match &cli.command {
            Commands::Generate(cmd) => cmd,
        }
    }

    /// Repository with tags v1.0.0 and v1.1.0 and two commits between them
    fn fixture_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let messages = [
            ("chore: initial", Some("v1.0.0")),
            ("fix: handle PROJ-12 crash\n\nDetails here.", None),
            ("feat(cli): add generate command", Some("v1.1.0")),
        ];

        let mut parent: Option<Oid> = None;
        for (i, (message, tag)) in messages.iter().enumerate() {
            let sig = Signature::new(
                "Test",
                "test@example.com",
                &Time::new(1_000 * (i as i64 + 1), 0),
            )
            .unwrap();
            let parents: Vec<Commit<'_>> = parent
                .map(|p| repo.find_commit(p).unwrap())
                .into_iter()
                .collect();
            let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();
            let oid = repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
                .unwrap();
            if let Some(tag) = tag {
                let object = repo.find_object(oid, None).unwrap();
                repo.tag_lightweight(tag, &object, false).unwrap();
            }
            parent = Some(oid);
        }

        temp
    }

    #[test]
    fn test_flags_override_file_config() {
        let cli = parse(&[
            "relnote",
            "generate",
            "--from",
            "v1.0.0",
            "--to",
            "v1.1.0",
            "--type-map",
            "fix=Bugs,feat=Features",
            "--fallback-type-title",
            "Misc",
            "--ticket-pattern",
            r"PROJ-\d+",
        ]);

        let mut file_config = Config::default();
        file_config.changelog.ticket_template_url = Some("https://t/{ticket}".to_string());

        let config = generate_command(&cli).apply(file_config);
        assert_eq!(config.from.as_deref(), Some("v1.0.0"));
        assert_eq!(config.to.as_deref(), Some("v1.1.0"));
        assert_eq!(
            config.changelog.type_map,
            TypeMap::new(vec![
                TypeMappingEntry::new("fix", "Bugs"),
                TypeMappingEntry::new("feat", "Features"),
            ])
        );
        assert_eq!(config.changelog.fallback_title, "Misc");
        assert_eq!(config.changelog.ticket_pattern.as_deref(), Some(r"PROJ-\d+"));
        assert_eq!(
            config.changelog.ticket_template_url.as_deref(),
            Some("https://t/{ticket}")
        );
    }

    #[test]
    fn test_no_flags_keep_file_config() {
        let cli = parse(&["relnote", "generate"]);

        let mut file_config = Config::default();
        file_config.changelog.fallback_title = "Misc".to_string();

        let config = generate_command(&cli).apply(file_config);
        assert_eq!(config.changelog.fallback_title, "Misc");
        assert_eq!(config.changelog.type_map.len(), 9);
        assert_eq!(config.repo, PathBuf::from("."));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_empty_type_map_keeps_defaults() {
        for value in ["", "   "] {
            let cli = parse(&["relnote", "generate", "--type-map", value]);
            let config = generate_command(&cli).apply(Config::default());
            assert_eq!(config.changelog.type_map, TypeMap::default());
        }
    }

    #[test]
    fn test_ticket_rule_split_between_file_and_flag() {
        let temp = fixture_repo();
        std::fs::write(
            temp.path().join("relnote.toml"),
            "[changelog]\nticket_pattern = 'PROJ-\\d+'\n",
        )
        .unwrap();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("CHANGELOG.md");

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--ticket-template-url",
            "https://t/{ticket}",
            "--output",
            out.to_str().unwrap(),
        ]);
        cli.execute().unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("<a href=\"https://t/PROJ-12\">PROJ-12</a>"));
    }

    #[test]
    fn test_ticket_pattern_without_template_is_error() {
        let temp = fixture_repo();

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--ticket-pattern",
            r"PROJ-\d+",
        ]);
        let err = cli.execute().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RelnoteError>(),
            Some(RelnoteError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_generate_writes_output_file() {
        let temp = fixture_repo();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("CHANGELOG.md");

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--ticket-pattern",
            r"PROJ-\d+",
            "--ticket-template-url",
            "https://t/{ticket}",
            "--output",
            out.to_str().unwrap(),
        ]);
        cli.execute().unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            concat!(
                "\n## New Features\n",
                "* add generate command\n",
                "\n## Fixes\n",
                "* <details>\n",
                "     <summary>handle <a href=\"https://t/PROJ-12\">PROJ-12</a> crash</summary>\n",
                "       Details here.\n",
                "   </details>\n",
            )
        );
    }

    #[test]
    fn test_generate_refuses_existing_output() {
        let temp = fixture_repo();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("CHANGELOG.md");
        std::fs::write(&out, "existing").unwrap();

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ]);
        let err = cli.execute().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RelnoteError>(),
            Some(RelnoteError::Changelog(ChangelogError::OutputAlreadyExists(_)))
        ));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "existing");
    }

    #[test]
    fn test_generate_missing_repo_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            missing.to_str().unwrap(),
        ]);
        let err = cli.execute().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RelnoteError>(),
            Some(RelnoteError::Git(GitError::InvalidLocation(_)))
        ));
    }

    #[test]
    fn test_generate_unknown_reference() {
        let temp = fixture_repo();

        let cli = parse(&[
            "relnote",
            "--quiet",
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--from",
            "v0.0.1",
            "--to",
            "v1.1.0",
        ]);
        let err = cli.execute().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RelnoteError>(),
            Some(RelnoteError::Git(GitError::ReferenceNotFound(ref r))) if r == "v0.0.1"
        ));
    }

    #[test]
    fn test_quoted_repo_path() {
        let cli = parse(&["relnote", "generate", "--repo", "\"/tmp/x\""]);
        let mut config = generate_command(&cli).apply(Config::default());
        config.clean_repo_path();
        assert_eq!(config.repo, PathBuf::from("/tmp/x"));
    }
}
