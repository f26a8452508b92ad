//! Resolution outcomes and errors.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::storage::StorageError;

/// The fixed, user-facing reasons a virtual path does not resolve.
///
/// The `Display` text of each variant is the name a not-found entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Diagnostic {
    #[error("Invalid path")]
    InvalidPath,

    #[error("The branch doesn't exist in the repository")]
    InvalidBranch,

    #[error("The tag doesn't exist in the repository")]
    InvalidTag,

    #[error("The commit doesn't exist in the repository")]
    InvalidCommit,

    #[error("The Repository doesn't exist")]
    InvalidRepository,

    #[error("The repository doesn't contain head")]
    InvalidHead,

    #[error("The command doesn't exist")]
    InvalidCommand,
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors from resolving a virtual path.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// the path does not name anything; a normal, expected outcome
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),

    /// a read stream was requested for something that isn't a file
    #[error("not a file: {path}")]
    NotAFile { path: String },

    /// the object database failed underneath us
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<git2::Error> for ResolveError {
    fn from(e: git2::Error) -> Self {
        ResolveError::Storage(StorageError::Git(e))
    }
}

impl ResolveError {
    /// The diagnostic, if this is an ordinary not-found outcome.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            ResolveError::Diagnostic(d) => Some(*d),
            _ => None,
        }
    }

    /// The diagnostic to show when the failure has to be reported as a
    /// not-found entry. Storage failures surface as `InvalidPath`.
    pub fn as_diagnostic(&self) -> Diagnostic {
        self.diagnostic().unwrap_or(Diagnostic::InvalidPath)
    }
}

/// result type alias for path resolution
pub type ResolveResult<T> = Result<T, ResolveError>;
