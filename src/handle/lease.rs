//! Scoped access to the shared repository.

use std::sync::Arc;

use git2::Repository;

use super::manager::HandleInner;
use crate::storage::StorageError;

/// One outstanding reference on a [`RepositoryHandle`](super::RepositoryHandle).
///
/// The lease gives back its reference exactly once: on an explicit
/// [`release`](HandleLease::release) or on drop, whichever comes first.
/// Releasing again is a no-op.
pub struct HandleLease {
    inner: Arc<HandleInner>,
    released: bool,
}

impl HandleLease {
    pub(super) fn new(inner: Arc<HandleInner>) -> Self {
        Self {
            inner,
            released: false,
        }
    }

    /// Borrow the open repository for the duration of `f`.
    ///
    /// Fails with [`StorageError::RepositoryClosed`] once this lease has
    /// been released, even if other leases keep the connection open.
    pub fn with_repo<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Repository) -> Result<T, E>,
        E: From<StorageError>,
    {
        if self.released {
            return Err(StorageError::RepositoryClosed(self.inner.git_dir().to_path_buf()).into());
        }
        self.inner.with_repo(f)
    }

    /// Give the reference back. Idempotent.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.inner.release();
        }
    }

    /// Whether this lease has already been given back.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for HandleLease {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for HandleLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleLease")
            .field("git_dir", &self.inner.git_dir())
            .field("released", &self.released)
            .finish()
    }
}
