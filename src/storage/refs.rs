//!  Branch, tag and HEAD resolution.
//!
//!  Git refs are pointers to commits.  This module handles:
//! - HEAD resolution
//! - branch enumeration and lookup by friendly name (local and remote-tracking)
//! - tag enumeration and peeling (lightweight and annotated)
//!
//! Lookups are by exact friendly name; nothing here normalizes or guesses.

use git2::{BranchType, Repository};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{BranchRef, CommitId, TagRef};

/// Reads Git references.
pub struct RefManager;

impl RefManager {
    /// Get the commit HEAD points at.
    ///
    /// Returns `Ok(None)` for an unborn HEAD or a HEAD that does not peel to
    /// a commit.
    pub fn head_commit(repo: &Repository) -> StorageResult<Option<CommitId>> {
        let head = match repo.head() {
            Ok(head) => head,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None)
            }
            Err(e) => return Err(StorageError::Git(e)),
        };

        Ok(head.peel_to_commit().ok().map(|c| CommitId::new(c.id())))
    }

    /// List all branches, local first, then remote-tracking.
    pub fn list_branches(repo: &Repository) -> StorageResult<Vec<BranchRef>> {
        let mut branches = Vec::new();

        for kind in [BranchType::Local, BranchType::Remote] {
            for item in repo.branches(Some(kind))? {
                let (branch, _) = item?;

                // Remote HEAD is a symbolic alias, not a branch of its own.
                if branch.get().symbolic_target().is_some() {
                    continue;
                }

                let name = match branch.name()? {
                    Some(name) => name.to_string(),
                    None => continue,
                };

                let tip = branch.get().peel_to_commit().ok().map(|c| CommitId::new(c.id()));
                branches.push(BranchRef { name, tip });
            }
        }

        Ok(branches)
    }

    /// Find a branch by exact friendly name.
    pub fn find_branch(repo: &Repository, name: &str) -> StorageResult<Option<BranchRef>> {
        Ok(Self::list_branches(repo)?
            .into_iter()
            .find(|branch| branch.name == name))
    }

    /// List all tags by friendly name.
    pub fn list_tags(repo: &Repository) -> StorageResult<Vec<TagRef>> {
        let names = repo.tag_names(None)?;
        Ok(names
            .iter()
            .flatten()
            .map(|name| TagRef {
                name: name.to_string(),
            })
            .collect())
    }

    /// Peel a tag to the commit it marks.
    ///
    /// Returns `Ok(None)` when the tag is missing or its target is not a commit.
    pub fn tag_commit(repo: &Repository, name: &str) -> StorageResult<Option<CommitId>> {
        if !Self::list_tags(repo)?.iter().any(|tag| tag.name == name) {
            return Ok(None);
        }

        let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => reference,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Git(e)),
        };

        Ok(reference.peel_to_commit().ok().map(|c| CommitId::new(c.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;

    #[test]
    fn test_head_commit() {
        let (fixture, history) = Fixture::sample_with_history();
        let head = RefManager::head_commit(&fixture.repo).unwrap();
        assert_eq!(head.map(|c| c.raw()), Some(history.second));
    }

    #[test]
    fn test_head_commit_unborn() {
        let fixture = Fixture::new();
        assert_eq!(RefManager::head_commit(&fixture.repo).unwrap(), None);
    }

    #[test]
    fn test_list_and_find_branches() {
        let (fixture, history) = Fixture::sample_with_history();

        let names: Vec<String> = RefManager::list_branches(&fixture.repo)
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["feature".to_string(), "main".to_string()]);

        let feature = RefManager::find_branch(&fixture.repo, "feature").unwrap().unwrap();
        assert_eq!(feature.tip.map(|c| c.raw()), Some(history.feature));

        assert!(RefManager::find_branch(&fixture.repo, "missing").unwrap().is_none());
        assert!(RefManager::find_branch(&fixture.repo, "Feature").unwrap().is_none());
    }

    #[test]
    fn test_tags_peel_to_commit() {
        let (fixture, history) = Fixture::sample_with_history();

        let names: Vec<String> = RefManager::list_tags(&fixture.repo)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert!(names.contains(&"v1".to_string()));
        assert!(names.contains(&"release".to_string()));

        let lightweight = RefManager::tag_commit(&fixture.repo, "v1").unwrap();
        let annotated = RefManager::tag_commit(&fixture.repo, "release").unwrap();
        assert_eq!(lightweight.map(|c| c.raw()), Some(history.first));
        assert_eq!(annotated.map(|c| c.raw()), Some(history.first));

        assert_eq!(RefManager::tag_commit(&fixture.repo, "nope").unwrap(), None);
    }

    #[test]
    fn test_tag_on_tree_does_not_peel_to_commit() {
        let (fixture, history) = Fixture::sample_with_history();
        let tree_id = fixture.repo.find_commit(history.first).unwrap().tree_id();
        let tree = fixture.repo.find_object(tree_id, None).unwrap();
        fixture.repo.tag_lightweight("tree-tag", &tree, false).unwrap();

        assert_eq!(RefManager::tag_commit(&fixture.repo, "tree-tag").unwrap(), None);
    }
}
