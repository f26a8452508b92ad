//! storage layer for gitfs
//!
//! this module is the only place that talks to git2. The upper layers
//! (path resolution, the file provider) use this API to read refs, commits,
//! trees and blobs, and never touch the object database directly.
//!
//!  # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   RepositoryLocation                        │
//! │       (discovery of the .git directory, opening)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌─────────────────────┼─────────────────────┐
//!        │                     │                     │
//!        ▼                     ▼                     ▼
//!  ┌─────────────┐       ┌─────────────┐       ┌─────────────┐
//!  │    refs     │       │   commit    │       │    tree     │
//!  │(branch/tag) │       │  (history)  │       │(directories)│
//!  └─────────────┘       └─────────────┘       └─────────────┘
//!                                                     │
//!                                                     ▼
//!                                              ┌─────────────┐
//!                                              │    blob     │
//!                                              │   (files)   │
//!                                              └─────────────┘
//!  ```

mod blob;
mod commit;
mod error;
mod refs;
mod repository;
mod tree;
mod types;

// Re-export public API
pub use blob::{read_blob, BlobMetadata};
pub use commit::{find_commit_by_hex, get_tree_at_commit, history, CommitInfo};
pub use error::{StorageError, StorageResult};
pub use refs::RefManager;
pub use repository::{RepositoryLocation, GIT_DIR};
pub use tree::{TreeChild, TreeHandle};
pub use types::{BlobId, BranchRef, CommitId, EntryKind, TagRef, TreeEntryInfo, TreeId};
