//! The shared, refcounted repository connection.

use std::path::Path;
use std::sync::Arc;

use git2::Repository;
use parking_lot::Mutex;

use super::lease::HandleLease;
use crate::storage::{RepositoryLocation, StorageError, StorageResult};

/// A single shared connection to an on-disk repository.
///
/// The connection is opened when the first lease is taken and dropped when
/// the last lease is released, so it can cycle open/closed any number of
/// times over the handle's life. Clone this to share it; clones count
/// against the same refcount.
///
/// The raw `git2::Repository` is never handed out. Callers get a
/// [`HandleLease`] and borrow the repository through it for the duration of
/// a closure.
#[derive(Clone)]
pub struct RepositoryHandle {
    inner: Arc<HandleInner>,
}

pub(super) struct HandleInner {
    location: RepositoryLocation,
    state: Mutex<HandleState>,
}

/// Both fields change together under one lock: `repo` is `Some` exactly
/// when `refcount > 0`.
struct HandleState {
    refcount: usize,
    repo: Option<Repository>,
}

impl RepositoryHandle {
    /// Create a closed handle for a discovered repository.
    pub fn new(location: RepositoryLocation) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                location,
                state: Mutex::new(HandleState {
                    refcount: 0,
                    repo: None,
                }),
            }),
        }
    }

    /// Take a lease, opening the repository on the 0 → 1 transition.
    ///
    /// If opening fails the refcount is left untouched.
    pub fn acquire(&self) -> StorageResult<HandleLease> {
        let mut state = self.inner.state.lock();

        if state.refcount == 0 {
            let repo = self.inner.location.open()?;
            tracing::debug!(path = %self.inner.location.git_dir().display(), "opened repository");
            state.repo = Some(repo);
        }
        state.refcount += 1;

        Ok(HandleLease::new(Arc::clone(&self.inner)))
    }

    /// Number of outstanding leases.
    pub fn refcount(&self) -> usize {
        self.inner.state.lock().refcount
    }

    /// Whether the underlying connection is currently open.
    pub fn is_open(&self) -> bool {
        self.inner.state.lock().repo.is_some()
    }
}

impl std::fmt::Debug for RepositoryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("RepositoryHandle")
            .field("git_dir", &self.inner.location.git_dir())
            .field("refcount", &state.refcount)
            .field("open", &state.repo.is_some())
            .finish()
    }
}

impl HandleInner {
    /// Give one lease back, closing the repository on the 1 → 0 transition.
    pub(super) fn release(&self) {
        let mut state = self.state.lock();

        match state.refcount {
            0 => {
                tracing::warn!(
                    path = %self.location.git_dir().display(),
                    "release on a handle with no outstanding leases"
                );
            }
            1 => {
                state.refcount = 0;
                state.repo = None;
                tracing::debug!(path = %self.location.git_dir().display(), "closed repository");
            }
            _ => state.refcount -= 1,
        }
    }

    /// Run `f` against the open repository, holding the lock for its duration.
    pub(super) fn with_repo<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Repository) -> Result<T, E>,
        E: From<StorageError>,
    {
        // Deliberate: `Repository` is !Sync, so lookups run one at a time and
        // a release on another thread waits for the current lookup to finish.
        let state = self.state.lock();
        let repo = state
            .repo
            .as_ref()
            .ok_or_else(|| StorageError::RepositoryClosed(self.git_dir().to_path_buf()))?;
        f(repo)
    }

    pub(super) fn git_dir(&self) -> &Path {
        self.location.git_dir()
    }
}
