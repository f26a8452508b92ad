//! Selector + argument → commit tree, and ref enumeration for wildcards.

use chrono::{DateTime, Utc};
use git2::Repository;

use super::error::{Diagnostic, ResolveResult};
use crate::path::{Selector, VirtualPath};
use crate::storage::{self, CommitId, RefManager, TreeHandle};

/// How the `commits` listing names its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitNaming {
    /// the full commit message, as stored; not unique, not deduplicated
    #[default]
    Message,
    /// the full hex id, which can be fed back into `commits/<id>`
    Hash,
}

/// The tree a reference points at.
#[derive(Debug)]
pub struct ResolvedRoot<'repo> {
    /// what was resolved: `HEAD`, a branch or tag name, or a commit id
    pub reference: String,
    pub commit: CommitId,
    pub tree: TreeHandle<'repo>,
}

/// One entry of a wildcard listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub name: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Resolve the reference a path selects to its commit's root tree.
///
/// Callers handle wildcard collection paths themselves via [`enumerate_refs`];
/// a wildcard reaching this function fails like a missing name would.
pub fn resolve_root<'repo>(
    repo: &'repo Repository,
    path: &VirtualPath,
) -> ResolveResult<ResolvedRoot<'repo>> {
    let argument = path.argument().unwrap_or_default();

    let (reference, commit) = match path.selector() {
        Selector::Root | Selector::Unhandled | Selector::Head => {
            let commit = RefManager::head_commit(repo)?.ok_or(Diagnostic::InvalidHead)?;
            ("HEAD".to_string(), commit)
        }
        Selector::Branches => {
            let tip = RefManager::find_branch(repo, argument)?
                .and_then(|branch| branch.tip)
                .ok_or(Diagnostic::InvalidBranch)?;
            (argument.to_string(), tip)
        }
        Selector::Tags => {
            let commit = RefManager::tag_commit(repo, argument)?.ok_or(Diagnostic::InvalidTag)?;
            (argument.to_string(), commit)
        }
        Selector::Commits => {
            let commit =
                storage::find_commit_by_hex(repo, argument)?.ok_or(Diagnostic::InvalidCommit)?;
            (commit.to_string(), commit)
        }
    };

    tracing::debug!(
        selector = %path.selector(),
        reference = %reference,
        commit = %commit.short(),
        "resolved reference"
    );

    let tree = storage::get_tree_at_commit(repo, commit)?;
    Ok(ResolvedRoot {
        reference,
        commit,
        tree,
    })
}

/// List every ref of a collection selector.
///
/// Branches and tags are listed by friendly name. Commits are those
/// reachable from head, newest first; an unborn head lists nothing.
pub fn enumerate_refs(
    repo: &Repository,
    selector: Selector,
    naming: CommitNaming,
) -> ResolveResult<Vec<RefEntry>> {
    let entries = match selector {
        Selector::Branches => RefManager::list_branches(repo)?
            .into_iter()
            .map(|branch| RefEntry {
                name: branch.name,
                last_modified: None,
            })
            .collect(),
        Selector::Tags => RefManager::list_tags(repo)?
            .into_iter()
            .map(|tag| RefEntry {
                name: tag.name,
                last_modified: None,
            })
            .collect(),
        Selector::Commits => match RefManager::head_commit(repo)? {
            Some(head) => {
                let mut entries = Vec::new();
                for info in storage::history(repo, head)? {
                    let info = info?;
                    let name = match naming {
                        CommitNaming::Message => info.message,
                        CommitNaming::Hash => info.id.to_string(),
                    };
                    entries.push(RefEntry {
                        name,
                        last_modified: Some(info.timestamp),
                    });
                }
                entries
            }
            None => Vec::new(),
        },
        Selector::Root | Selector::Head | Selector::Unhandled => {
            return Err(Diagnostic::InvalidCommand.into())
        }
    };

    Ok(entries)
}
