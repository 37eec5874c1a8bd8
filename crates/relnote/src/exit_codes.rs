//! Exit codes for the CLI

use relnote_core::RelnoteError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Changelog error
pub const CHANGELOG_ERROR: u8 = 4;

/// Map an error to the exit code reported for it
pub fn for_error(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<RelnoteError>() {
        Some(RelnoteError::Config(_)) => CONFIG_ERROR,
        Some(RelnoteError::Git(_)) => GIT_ERROR,
        Some(RelnoteError::Changelog(_)) => CHANGELOG_ERROR,
        _ => ERROR,
    }
}
