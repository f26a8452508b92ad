//! Storage layer error types
//!
//! All errors that can occur while talking to the git object database are
//! defined here. We use `thiserror` for ergonomic error definition and better
//! error messages

use std::path::PathBuf;

use thiserror::Error;

/// the main error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// error from the underlying Git library
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// no `.git` directory at or directly under the given root
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// the handle was used while no consumer held it open
    #[error("repository handle is closed: {0}")]
    RepositoryClosed(PathBuf),

    /// the commit was not found
    #[error("commit not found: {0}")]
    CommitNotFound(String),
}

impl StorageError {
    /// check if this error indicates the resource doesn't exist
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::CommitNotFound(_) => true,
            StorageError::Git(e) => e.code() == git2::ErrorCode::NotFound,
            _ => false,
        }
    }
}

/// result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(StorageError::CommitNotFound("abc".into()).is_not_found());
        assert!(!StorageError::RepositoryClosed(PathBuf::from("/repo")).is_not_found());
        assert!(!StorageError::NotARepository(PathBuf::from("/tmp")).is_not_found());

        let git = git2::Error::new(
            git2::ErrorCode::NotFound,
            git2::ErrorClass::Reference,
            "missing",
        );
        assert!(StorageError::Git(git).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = StorageError::RepositoryClosed(PathBuf::from("/repo"));
        assert_eq!(err.to_string(), "repository handle is closed: /repo");
    }
}
