//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnote.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnote.yaml";

/// Title of the section collecting commits with unknown types
pub const DEFAULT_FALLBACK_TITLE: &str = "Other";

/// Placeholder substituted with the matched ticket in link templates
pub const TICKET_PLACEHOLDER: &str = "{ticket}";

/// Built-in type mappings, in output order
pub const DEFAULT_TYPE_MAPPINGS: [(&str, &str); 9] = [
    ("feat", "New Features"),
    ("fix", "Fixes"),
    ("perf", "Performance Improvements"),
    ("refactor", "Code Refactoring"),
    ("style", "Code Style"),
    ("test", "Add or Update Tests"),
    ("docs", "Documentation"),
    ("build", "Build System"),
    ("ci", "Continuous Integration"),
];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".relnote.toml",
        ".relnote.yaml",
    ]
}
