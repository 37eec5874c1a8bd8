//! Changelog output

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::info;

use relnote_core::error::{ChangelogError, Result};

/// Write the changelog to a new file.
///
/// Fails with [`ChangelogError::OutputAlreadyExists`] rather than
/// overwriting an existing file.
pub fn write_changelog(path: &Path, content: &str) -> Result<()> {
    info!(path = %path.display(), bytes = content.len(), "writing changelog");

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => ChangelogError::OutputAlreadyExists(path.to_path_buf()),
            _ => ChangelogError::Io(e),
        })?;

    file.write_all(content.as_bytes())
        .map_err(ChangelogError::Io)?;
    Ok(())
}
