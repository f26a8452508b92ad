//! Repository discovery.
//!
//! A provider root is valid when it is itself a `.git` directory or when it
//! has a `.git` directory directly under it. Discovery happens once, at
//! provider construction; opening is left to the handle manager.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::storage::error::{StorageError, StorageResult};

/// the metadata directory name git uses
pub const GIT_DIR: &str = ".git";

/// A validated on-disk repository location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    git_dir: PathBuf,
}

impl RepositoryLocation {
    /// Look for a `.git` directory at or one level under `root`.
    pub fn discover(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();

        // `Path::file_name` ignores a trailing separator, so `repo/.git/` lands here too.
        if root.file_name().is_some_and(|name| name == GIT_DIR) && root.is_dir() {
            return Ok(Self {
                git_dir: root.to_path_buf(),
            });
        }

        let git_dir = root.join(GIT_DIR);
        if git_dir.is_dir() {
            return Ok(Self { git_dir });
        }

        Err(StorageError::NotARepository(root.to_path_buf()))
    }

    /// the `.git` directory that was found
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Open a fresh connection to the repository.
    pub fn open(&self) -> StorageResult<Repository> {
        Ok(Repository::open(&self.git_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use tempfile::TempDir;

    #[test]
    fn test_discover_accepts_root_and_git_dir_spellings() {
        let fixture = Fixture::new();
        let root = fixture.path().to_string_lossy().to_string();

        for candidate in [
            root.clone(),
            format!("{}/", root),
            format!("{}/.git", root),
            format!("{}/.git/", root),
        ] {
            let location = RepositoryLocation::discover(&candidate);
            assert!(location.is_ok(), "{} should be a repository", candidate);
        }
    }

    #[test]
    fn test_discover_rejects_missing_git_dir() {
        let fixture = Fixture::new();
        let wrong = fixture.path().join("Wrong").join("Path");
        assert!(matches!(
            RepositoryLocation::discover(&wrong),
            Err(StorageError::NotARepository(_))
        ));
        assert!(RepositoryLocation::discover(wrong.join(".git")).is_err());

        let empty = TempDir::new().unwrap();
        assert!(RepositoryLocation::discover(empty.path()).is_err());
    }

    #[test]
    fn test_discover_does_not_search_upwards() {
        let fixture = Fixture::new();
        std::fs::create_dir_all(fixture.path().join("nested")).unwrap();
        assert!(RepositoryLocation::discover(fixture.path().join("nested")).is_err());
    }

    #[test]
    fn test_open_from_location() {
        let fixture = Fixture::sample();
        let location = RepositoryLocation::discover(fixture.path()).unwrap();
        let repo = location.open().unwrap();
        assert!(repo.head().is_ok());
        assert_eq!(location.git_dir(), fixture.path().join(".git"));
    }
}
