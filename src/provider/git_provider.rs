//! The git-backed file provider.

use std::path::PathBuf;

use git2::Repository;

use super::config::ProviderConfig;
use super::entry::{DirectoryContents, EntryInfo, VirtualEntry};
use super::watch::NullChangeToken;
use super::FileProvider;
use crate::handle::{ContentStream, RepositoryHandle};
use crate::path::{Selector, VirtualPath};
use crate::resolve::{
    enumerate_refs, resolve_root, walk, Diagnostic, ResolveError, ResolveResult, TreeNode,
};
use crate::storage::{read_blob, EntryKind, RepositoryLocation};

/// Serves a git repository's refs and trees as a read-only file tree.
///
/// Whether the root holds a repository is decided once, here. A provider
/// built over anything else still answers every call, always with
/// [`Diagnostic::InvalidRepository`], and never touches the disk again.
#[derive(Debug)]
pub struct GitFileProvider {
    config: ProviderConfig,
    handle: Option<RepositoryHandle>,
}

impl GitFileProvider {
    /// Serve the repository at `root` with the default configuration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(ProviderConfig::new(root))
    }

    pub fn with_config(config: ProviderConfig) -> Self {
        let handle = match RepositoryLocation::discover(&config.root) {
            Ok(location) => {
                tracing::debug!(git_dir = %location.git_dir().display(), "found repository");
                Some(RepositoryHandle::new(location))
            }
            Err(e) => {
                tracing::warn!(root = %config.root.display(), error = %e, "not a git repository");
                None
            }
        };

        Self { config, handle }
    }

    /// Whether the root held a repository at construction.
    pub fn exists(&self) -> bool {
        self.handle.is_some()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The shared handle, if the root is a repository.
    pub fn handle(&self) -> Option<&RepositoryHandle> {
        self.handle.as_ref()
    }

    fn parse(&self, raw: &str) -> VirtualPath {
        VirtualPath::parse(raw, self.config.separator)
    }

    /// Run a lookup under a short-lived lease.
    fn lookup<T, F>(&self, f: F) -> ResolveResult<T>
    where
        F: FnOnce(&Repository) -> ResolveResult<T>,
    {
        let handle = self.handle.as_ref().ok_or(Diagnostic::InvalidRepository)?;
        let lease = handle.acquire()?;
        lease.with_repo(f)
    }

    fn list_in(&self, repo: &Repository, path: &VirtualPath) -> ResolveResult<Vec<VirtualEntry>> {
        let selector = path.selector();

        if selector.is_ref_collection() && path.is_wildcard() {
            let keyword = selector.keyword().unwrap_or_default();
            let refs = enumerate_refs(repo, selector, self.config.commit_naming)?;
            return Ok(refs
                .into_iter()
                .map(|entry| VirtualEntry::Directory {
                    path: format!("{}{}{}", keyword, self.config.separator, entry.name),
                    name: entry.name,
                    last_modified: entry.last_modified,
                })
                .collect());
        }

        let root = resolve_root(repo, path)?;
        let tree = match walk(repo, root.tree, &path.relative_segments())? {
            TreeNode::Directory { tree, .. } => tree,
            TreeNode::File { .. } | TreeNode::Missing => return Err(Diagnostic::InvalidPath.into()),
        };

        let mut entries = Vec::with_capacity(tree.len());
        for child in tree.entries(repo)? {
            let child_path = path.child_path(&child.name);
            match child.kind {
                EntryKind::Tree => entries.push(VirtualEntry::Directory {
                    name: child.name,
                    path: child_path,
                    last_modified: None,
                }),
                EntryKind::Blob { size } => entries.push(VirtualEntry::File {
                    name: child.name,
                    path: child_path,
                    length: size,
                }),
                // submodules and the like can't be walked into, so they aren't listed
                EntryKind::Other => {
                    tracing::debug!(path = %child_path, "skipping non-file tree entry");
                }
            }
        }

        Ok(entries)
    }

    fn info_in(&self, repo: &Repository, path: &VirtualPath) -> ResolveResult<VirtualEntry> {
        let root = resolve_root(repo, path)?;
        let segments = path.relative_segments();
        if segments.is_empty() {
            return Err(Diagnostic::InvalidPath.into());
        }

        match walk(repo, root.tree, &segments)? {
            TreeNode::Directory { name, .. } => Ok(VirtualEntry::Directory {
                name,
                path: path.raw().to_string(),
                last_modified: None,
            }),
            TreeNode::File { name, blob } => Ok(VirtualEntry::File {
                name,
                path: path.raw().to_string(),
                length: blob.size as u64,
            }),
            TreeNode::Missing => Err(Diagnostic::InvalidPath.into()),
        }
    }

    fn read_in(&self, repo: &Repository, path: &VirtualPath) -> ResolveResult<Vec<u8>> {
        let root = resolve_root(repo, path)?;
        let segments = path.relative_segments();
        if segments.is_empty() {
            return Err(not_a_file(path));
        }

        match walk(repo, root.tree, &segments)? {
            TreeNode::File { blob, .. } => Ok(read_blob(repo, blob.id)?),
            TreeNode::Directory { .. } => Err(not_a_file(path)),
            TreeNode::Missing => Err(Diagnostic::InvalidPath.into()),
        }
    }
}

fn not_a_file(path: &VirtualPath) -> ResolveError {
    ResolveError::NotAFile {
        path: path.raw().to_string(),
    }
}

/// Log a failed lookup: storage trouble at warn, ordinary misses at debug.
fn report(operation: &str, raw: &str, error: &ResolveError) {
    match error {
        ResolveError::Storage(e) if !e.is_not_found() => {
            tracing::warn!(operation, path = %raw, error = %e, "storage error during lookup")
        }
        _ => tracing::debug!(operation, path = %raw, reason = %error, "path not found"),
    }
}

impl FileProvider for GitFileProvider {
    fn list_directory(&self, path: Option<&str>) -> DirectoryContents {
        let Some(raw) = path else {
            return DirectoryContents::NotFound {
                reason: Diagnostic::InvalidCommand,
            };
        };
        let path = self.parse(raw);

        match self.lookup(|repo| self.list_in(repo, &path)) {
            Ok(entries) => DirectoryContents::Found {
                entries: entries.iter().map(VirtualEntry::render).collect(),
            },
            Err(e) => {
                report("list_directory", raw, &e);
                DirectoryContents::NotFound {
                    reason: e.as_diagnostic(),
                }
            }
        }
    }

    fn entry_info(&self, path: Option<&str>) -> EntryInfo {
        let Some(raw) = path else {
            return VirtualEntry::not_found(Diagnostic::InvalidCommand).render();
        };
        if !self.exists() {
            return VirtualEntry::not_found(Diagnostic::InvalidRepository).render();
        }

        let path = self.parse(raw);
        let selector = path.selector();

        // only listings read an unqualified path relative to head
        if matches!(selector, Selector::Root | Selector::Unhandled) {
            return VirtualEntry::not_found(Diagnostic::InvalidCommand).render();
        }

        if selector.is_ref_collection() && path.is_wildcard() {
            let keyword = selector.keyword().unwrap_or_default();
            return VirtualEntry::RefCollection {
                selector,
                path: self.config.root.join(keyword).display().to_string(),
            }
            .render();
        }

        match self.lookup(|repo| self.info_in(repo, &path)) {
            Ok(entry) => entry.render(),
            Err(e) => {
                report("entry_info", raw, &e);
                VirtualEntry::not_found(e.as_diagnostic()).render()
            }
        }
    }

    fn open_read(&self, raw: &str) -> ResolveResult<ContentStream> {
        let handle = self.handle.as_ref().ok_or(Diagnostic::InvalidRepository)?;
        let path = self.parse(raw);

        if matches!(path.selector(), Selector::Root | Selector::Unhandled) {
            return Err(Diagnostic::InvalidCommand.into());
        }
        if path.selector().is_ref_collection() && path.is_wildcard() {
            return Err(not_a_file(&path));
        }

        let lease = handle.acquire()?;
        let content = lease
            .with_repo(|repo| self.read_in(repo, &path))
            .inspect_err(|e| report("open_read", raw, e))?;

        tracing::debug!(path = %raw, length = content.len(), "opened content stream");
        Ok(ContentStream::new(raw, content, lease))
    }

    fn watch(&self, _filter: &str) -> NullChangeToken {
        NullChangeToken
    }
}
