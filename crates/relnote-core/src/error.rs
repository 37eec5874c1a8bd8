//! Error types for relnote

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnoteError
pub type Result<T> = std::result::Result<T, RelnoteError>;

/// Main error type for relnote operations
#[derive(Debug, Error)]
pub enum RelnoteError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository path missing or not a directory
    #[error("Repository path does not exist or is not a directory: {0}")]
    InvalidLocation(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Named revision does not exist
    #[error("Reference does not exist in the repository: {0}")]
    ReferenceNotFound(String),

    /// Repository has no tags to derive a range from
    #[error("No tags found in repository")]
    NoTags,

    /// History query failed
    #[error("Failed to read history: {0}")]
    FetchFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Only one end of the commit range was supplied
    #[error("if either 'from' or 'to' is provided, both must be provided")]
    IncompleteRange,

    /// Ticket pattern failed to compile
    #[error("Invalid ticket pattern '{pattern}': {reason}")]
    MalformedLinkPattern { pattern: String, reason: String },

    /// Refusing to overwrite an existing changelog
    #[error("File already exists: {0}")]
    OutputAlreadyExists(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
