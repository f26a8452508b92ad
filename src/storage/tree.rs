//!  tree reads for the virtual filesystem.
//!
//! in Git, a tree is a directory. Every virtual path below a ref selector is
//! answered by looking things up in the root tree of one commit.
//!
//! this module provides safe, read-only abstractions over git trees

use git2::{ObjectType, Repository, Tree};

use crate::storage::blob::BlobMetadata;
use crate::storage::error::StorageResult;
use crate::storage::types::{EntryKind, TreeEntryInfo, TreeId};

/// A read only handle to a git tree at a specific commit
///
/// this provides safe, immutable access to the tree structure.
/// think of it as a snapshot - it won't change even if new commits are made.
#[derive(Debug)]
pub struct TreeHandle<'repo> {
    tree: Tree<'repo>,
}

/// what a single name inside a tree points at
#[derive(Debug)]
pub enum TreeChild<'repo> {
    /// a sub-tree
    Tree(TreeHandle<'repo>),
    /// a blob, with its size
    Blob(BlobMetadata),
    /// a submodule commit or other non-file object
    Other,
    /// no entry with that name
    Missing,
}

impl<'repo> TreeHandle<'repo> {
    /// create a TreeHandle from a git2::Tree
    pub(crate) fn new(tree: Tree<'repo>) -> Self {
        Self { tree }
    }

    /// get the tree ID
    pub fn id(&self) -> TreeId {
        TreeId::new(self.tree.id())
    }

    /// number of entries directly in this tree
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// true when the tree has no entries
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// look up a direct child by exact name
    pub fn child(&self, repo: &'repo Repository, name: &str) -> StorageResult<TreeChild<'repo>> {
        let entry = match self.tree.get_name(name) {
            Some(entry) => entry,
            None => return Ok(TreeChild::Missing),
        };

        match entry.kind() {
            Some(ObjectType::Tree) => {
                let tree = repo.find_tree(entry.id())?;
                Ok(TreeChild::Tree(TreeHandle::new(tree)))
            }
            Some(ObjectType::Blob) => {
                let blob = repo.find_blob(entry.id())?;
                Ok(TreeChild::Blob(BlobMetadata::from_blob(&blob)))
            }
            _ => Ok(TreeChild::Other),
        }
    }

    /// list the direct entries of this tree, in git's tree order
    ///
    /// anything that isn't a blob is reported as a tree or `Other`
    pub fn entries(&self, repo: &Repository) -> StorageResult<Vec<TreeEntryInfo>> {
        let mut entries = Vec::with_capacity(self.tree.len());

        for entry in self.tree.iter() {
            let name = String::from_utf8_lossy(entry.name_bytes()).into_owned();
            let kind = match entry.kind() {
                Some(ObjectType::Tree) => EntryKind::Tree,
                Some(ObjectType::Blob) => {
                    let blob = repo.find_blob(entry.id())?;
                    EntryKind::Blob {
                        size: blob.size() as u64,
                    }
                }
                _ => EntryKind::Other,
            };
            entries.push(TreeEntryInfo { name, kind });
        }

        Ok(entries)
    }
}
