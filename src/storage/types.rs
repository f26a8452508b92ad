//! core type-safe wrappers around git object ids for the storage layer.

use std::fmt;

use git2::Oid;

/// Declares a typed wrapper around an object id, so a blob id can't be
/// passed where a commit id is expected. The inner Oid stays crate-private.
macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) Oid);

        impl $name {
            pub(crate) fn new(oid: Oid) -> Self {
                Self(oid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

object_id!(
    /// Git commit identifier
    CommitId
);
object_id!(
    /// Git blob identifier
    BlobId
);
object_id!(
    /// Git tree identifier
    TreeId
);

impl CommitId {
    /// raw Oid (for internal use only)
    pub(crate) fn raw(&self) -> Oid {
        self.0
    }

    /// abbreviated form, as `git log --oneline` prints it
    pub fn short(&self) -> String {
        let full = self.0.to_string();
        full[..7.min(full.len())].to_string()
    }
}

impl BlobId {
    pub(crate) fn raw(&self) -> Oid {
        self.0
    }
}

/// A branch as seen by the virtual filesystem.
///
/// `name` is the friendly name (`main`, `origin/dev`), `tip` is `None` when
/// the reference does not peel to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub tip: Option<CommitId>,
}

/// A tag by friendly name (without the `refs/tags/` prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
}

/// kind of an entry inside a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// a sub-tree (directory)
    Tree,
    /// a blob (file) of the given byte size
    Blob { size: u64 },
    /// anything else (submodule commits)
    Other,
}

/// a named entry of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntryInfo {
    pub name: String,
    pub kind: EntryKind,
}
