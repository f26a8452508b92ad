//!  Commit lookup and history traversal
//!
//! the virtual filesystem addresses commits two ways:
//! - by (possibly abbreviated) hex id under `commits/<id>`
//! - by walking history from HEAD for the `commits` listing
//!
//! this module handles both, plus getting at a commit's root tree

use chrono::{DateTime, Utc};
use git2::{Repository, Revwalk, Sort};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::tree::TreeHandle;
use crate::storage::types::CommitId;

/// shortest prefix git accepts for an abbreviated object id
const MIN_PREFIX_LEN: usize = 4;

/// What a listing needs to know about one commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: CommitId,
    /// full message, trailing newline included
    pub message: String,
    /// committer time; the epoch when git2 reports something out of range
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    pub(crate) fn from_git2(commit: &git2::Commit<'_>) -> Self {
        let timestamp =
            DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or(DateTime::UNIX_EPOCH);

        Self {
            id: CommitId::new(commit.id()),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            timestamp,
        }
    }
}

/// look a commit up by a full or abbreviated hex id
///
/// returns None for anything that isn't hex, is too short, is ambiguous or
/// doesn't name a commit
pub fn find_commit_by_hex(repo: &Repository, hex: &str) -> StorageResult<Option<CommitId>> {
    let hex = hex.trim();
    if hex.len() < MIN_PREFIX_LEN
        || hex.len() > 40
        || !hex.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Ok(None);
    }

    match repo.find_commit_by_prefix(hex) {
        Ok(commit) => Ok(Some(CommitId::new(commit.id()))),
        Err(e)
            if matches!(
                e.code(),
                git2::ErrorCode::NotFound | git2::ErrorCode::Ambiguous | git2::ErrorCode::Invalid
            ) =>
        {
            Ok(None)
        }
        // a prefix naming a blob or tree comes back as a peel error
        Err(e) if e.class() == git2::ErrorClass::Object => Ok(None),
        Err(e) => Err(StorageError::Git(e)),
    }
}

/// get the root tree of a commit
pub fn get_tree_at_commit(repo: &Repository, commit_id: CommitId) -> StorageResult<TreeHandle<'_>> {
    let commit = repo
        .find_commit(commit_id.raw())
        .map_err(|_| StorageError::CommitNotFound(commit_id.to_string()))?;

    let tree = commit.tree()?;
    Ok(TreeHandle::new(tree))
}

/// iterate over commit history starting from a commit
pub struct HistoryIterator<'repo> {
    repo: &'repo Repository,
    revwalk: Revwalk<'repo>,
}

impl<'repo> HistoryIterator<'repo> {
    /// create a new history iterator
    pub fn new(repo: &'repo Repository, start: CommitId) -> StorageResult<Self> {
        let mut revwalk = repo.revwalk()?;
        revwalk.push(start.raw())?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        Ok(Self { repo, revwalk })
    }
}

impl<'repo> Iterator for HistoryIterator<'repo> {
    type Item = StorageResult<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.revwalk.next()? {
            Ok(oid) => match self.repo.find_commit(oid) {
                Ok(commit) => Some(Ok(CommitInfo::from_git2(&commit))),
                Err(e) => Some(Err(StorageError::Git(e))),
            },
            Err(e) => Some(Err(StorageError::Git(e))),
        }
    }
}

/// get history for a commit
pub fn history(repo: &Repository, start: CommitId) -> StorageResult<HistoryIterator<'_>> {
    HistoryIterator::new(repo, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;

    #[test]
    fn test_find_commit_by_full_and_short_hex() {
        let (fixture, history) = Fixture::sample_with_history();
        let full = history.first.to_string();

        let found = find_commit_by_hex(&fixture.repo, &full).unwrap();
        assert_eq!(found, Some(CommitId::new(history.first)));

        let found = find_commit_by_hex(&fixture.repo, &full[..10]).unwrap();
        assert_eq!(found, Some(CommitId::new(history.first)));
    }

    #[test]
    fn test_find_commit_rejects_bad_ids() {
        let (fixture, history) = Fixture::sample_with_history();

        assert_eq!(find_commit_by_hex(&fixture.repo, "WrongHash").unwrap(), None);
        assert_eq!(find_commit_by_hex(&fixture.repo, "abc").unwrap(), None);
        assert_eq!(find_commit_by_hex(&fixture.repo, "").unwrap(), None);
        assert_eq!(
            find_commit_by_hex(&fixture.repo, "0000000000000000000000000000000000000000").unwrap(),
            None
        );

        // a tree id is a valid object, but not a commit
        let tree_id = fixture.repo.find_commit(history.first).unwrap().tree_id();
        assert_eq!(find_commit_by_hex(&fixture.repo, &tree_id.to_string()).unwrap(), None);
    }

    #[test]
    fn test_history_iteration() {
        let (fixture, history) = Fixture::sample_with_history();

        let commits: Vec<CommitInfo> = self::history(&fixture.repo, CommitId::new(history.second))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, CommitId::new(history.second));
        assert_eq!(commits[1].id, CommitId::new(history.first));
        assert_eq!(commits[0].message, "Add guide\n");
        assert!(commits[0].timestamp > DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_tree_at_commit() {
        let (fixture, history) = Fixture::sample_with_history();
        let tree = get_tree_at_commit(&fixture.repo, CommitId::new(history.first)).unwrap();
        let names: Vec<String> = tree.entries(&fixture.repo).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["LICENSE", "README.md", "src"]);
    }
}
