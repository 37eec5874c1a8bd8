//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::defaults::TICKET_PLACEHOLDER;
use super::types::{ChangelogConfig, Config};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(&config.changelog)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Validate the changelog section
pub fn validate_changelog(config: &ChangelogConfig) -> Result<()> {
    if config.fallback_title.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.fallback_title".to_string(),
            message: "fallback title cannot be empty".to_string(),
        }
        .into());
    }

    for (i, entry) in config.type_map.iter().enumerate() {
        if entry.key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.type_map[{}].key", i),
                message: "type key cannot be empty".to_string(),
            }
            .into());
        }
    }

    if let Some(rule) = config.ticket_rule() {
        if rule.template_url.is_empty() {
            return Err(ConfigError::MissingField("ticket_template_url".to_string()).into());
        }
        if !rule.template_url.contains(TICKET_PLACEHOLDER) {
            debug!(
                template = %rule.template_url,
                "ticket template has no {{ticket}} placeholder, every link gets the same target"
            );
        }
    }

    Ok(())
}
