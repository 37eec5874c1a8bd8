//! relnote core - shared types for changelog generation
//!
//! This crate provides the error taxonomy and the configuration model
//! (type map, fallback title, ticket linking rule) used by the other
//! relnote crates.

pub mod config;
pub mod error;

pub use config::{ChangelogConfig, Config, TicketRule, TypeMap, TypeMappingEntry};
pub use error::{ChangelogError, ConfigError, GitError, RelnoteError, Result};
