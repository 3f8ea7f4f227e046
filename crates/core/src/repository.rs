//! Target-repository guard.
//!
//! The overlay targets a directory that must already be a Git working
//! directory. The check is a plain filesystem test (a `.git` entry, file or
//! directory, so worktrees and submodule checkouts pass too); no object-level
//! Git access happens anywhere in this crate.

use std::path::{Path, PathBuf};

use crate::errors::RepositoryError;

/// A validated Git working directory.
#[derive(Debug)]
pub struct Repository {
    directory: PathBuf,
}

impl Repository {
    /// Validate `directory` and return a handle to it.
    pub fn open<P: Into<PathBuf>>(directory: P) -> Result<Self, RepositoryError> {
        let directory = directory.into();

        if !directory.is_dir() {
            return Err(RepositoryError::DirectoryNotFound {
                directory: directory.display().to_string(),
            });
        }
        if !directory.join(".git").exists() {
            return Err(RepositoryError::NotARepository {
                directory: directory.display().to_string(),
            });
        }

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
