//! Descending a commit tree by path segments.

use git2::Repository;

use crate::storage::{BlobMetadata, StorageResult, TreeChild, TreeHandle};

/// Where a walk ended up.
#[derive(Debug)]
pub enum TreeNode<'repo> {
    /// a sub-tree; `name` is the last segment walked, empty for the root
    Directory {
        name: String,
        tree: TreeHandle<'repo>,
    },
    /// a blob
    File { name: String, blob: BlobMetadata },
    /// nothing with that path, or the path runs through a file
    Missing,
}

impl<'repo> TreeNode<'repo> {
    pub fn is_missing(&self) -> bool {
        matches!(self, TreeNode::Missing)
    }
}

/// Walk `segments` down from `root`, matching names exactly at each level.
///
/// No segments means the root itself.
pub fn walk<'repo>(
    repo: &'repo Repository,
    root: TreeHandle<'repo>,
    segments: &[&str],
) -> StorageResult<TreeNode<'repo>> {
    let mut current = root;

    for (depth, segment) in segments.iter().enumerate() {
        let is_last = depth + 1 == segments.len();

        match current.child(repo, segment)? {
            TreeChild::Tree(tree) => current = tree,
            TreeChild::Blob(blob) if is_last => {
                return Ok(TreeNode::File {
                    name: segment.to_string(),
                    blob,
                })
            }
            TreeChild::Blob(_) | TreeChild::Other | TreeChild::Missing => {
                tracing::debug!(
                    tree = %current.id(),
                    segment = %segment,
                    depth,
                    "path does not resolve"
                );
                return Ok(TreeNode::Missing);
            }
        }
    }

    Ok(TreeNode::Directory {
        name: segments.last().map(|s| s.to_string()).unwrap_or_default(),
        tree: current,
    })
}
