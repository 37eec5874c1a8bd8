//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use relnote_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Discover and open a repository by searching parent directories
    ///
    /// Fails with [`GitError::InvalidLocation`] when the path is not an
    /// existing directory, and [`GitError::NotARepository`] when no work
    /// tree contains it.
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        if !start_path.is_dir() {
            return Err(GitError::InvalidLocation(start_path.to_path_buf()));
        }

        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::Git2(e)
            }
        })?;

        // Bare repositories have no work tree to generate a changelog for
        let path = repo
            .workdir()
            .ok_or_else(|| GitError::NotARepository(start_path.to_path_buf()))?
            .to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the work tree path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the HEAD commit
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        head.peel_to_commit().map_err(GitError::Git2)
    }
}
