//! The read-only file provider over a git repository.
//!
//! ```text
//!  raw path ──▶ VirtualPath ──▶ resolve_root ──▶ walk ──▶ VirtualEntry ──▶ EntryInfo
//!                    │                                                  └─▶ DirectoryContents
//!                    └─ wildcard collection ──▶ enumerate_refs ──────────┘
//!                                                        open_read ──▶ ContentStream
//! ```
//!
//! Every call takes a lease on the shared [`RepositoryHandle`](crate::handle::RepositoryHandle)
//! for the duration of the lookup. A [`ContentStream`] keeps its own lease
//! until it is closed or dropped.

mod config;
mod entry;
mod git_provider;
mod watch;

pub use config::ProviderConfig;
pub use entry::{DirectoryContents, EntryInfo, VirtualEntry};
pub use git_provider::GitFileProvider;
pub use watch::NullChangeToken;

use crate::handle::ContentStream;
use crate::resolve::ResolveResult;

/// A read-only hierarchical file source.
///
/// `None` paths are accepted and answered with
/// [`Diagnostic::InvalidCommand`](crate::resolve::Diagnostic::InvalidCommand).
pub trait FileProvider: Send + Sync {
    /// List the entries of a virtual directory.
    fn list_directory(&self, path: Option<&str>) -> DirectoryContents;

    /// Describe a single virtual path. Never fails; misses come back as
    /// not-found entries named after their diagnostic.
    fn entry_info(&self, path: Option<&str>) -> EntryInfo;

    /// Open a file's content for reading.
    fn open_read(&self, path: &str) -> ResolveResult<ContentStream>;

    /// Watch for changes under `filter`. Nothing ever changes.
    fn watch(&self, filter: &str) -> NullChangeToken;
}
