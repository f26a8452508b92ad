//! Entries the provider hands back: listings and entry info.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::path::Selector;
use crate::resolve::Diagnostic;

/// Metadata for one virtual path.
///
/// A missing entry has `exists == false`, the diagnostic as its `name`, no
/// physical path, and `length == -1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub exists: bool,
    pub name: String,
    /// virtual path of the entry, not a filesystem path
    ///
    /// Listing children get the listed path plus their name. Under an
    /// unqualified listing (`""`, `src`) that path has no selector, so
    /// `entry_info` and `open_read` answer `InvalidCommand` for it; prefix
    /// `head` and the separator to look it up.
    pub physical_path: Option<String>,
    /// byte length for files, `-1` otherwise
    pub length: i64,
    pub is_directory: bool,
    pub last_modified: Option<DateTime<Utc>>,
}

impl EntryInfo {
    pub fn is_file(&self) -> bool {
        self.exists && !self.is_directory
    }
}

/// What a lookup found, before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualEntry {
    File {
        name: String,
        path: String,
        length: u64,
    },
    Directory {
        name: String,
        path: String,
        last_modified: Option<DateTime<Utc>>,
    },
    /// a wildcard selector such as `branches` or `tags/*`
    ///
    /// It lists as a directory but has no entry of its own.
    RefCollection { selector: Selector, path: String },
    NotFound { reason: Diagnostic },
}

impl VirtualEntry {
    pub fn not_found(reason: Diagnostic) -> Self {
        VirtualEntry::NotFound { reason }
    }

    /// Render into the flat record callers see.
    pub fn render(&self) -> EntryInfo {
        match self {
            VirtualEntry::File { name, path, length } => EntryInfo {
                exists: true,
                name: name.clone(),
                physical_path: Some(path.clone()),
                length: i64::try_from(*length).unwrap_or(i64::MAX),
                is_directory: false,
                last_modified: None,
            },
            VirtualEntry::Directory {
                name,
                path,
                last_modified,
            } => EntryInfo {
                exists: true,
                name: name.clone(),
                physical_path: Some(path.clone()),
                length: -1,
                is_directory: true,
                last_modified: *last_modified,
            },
            VirtualEntry::RefCollection { selector, path } => EntryInfo {
                exists: false,
                name: selector.to_string(),
                physical_path: Some(path.clone()),
                length: -1,
                is_directory: true,
                last_modified: None,
            },
            VirtualEntry::NotFound { reason } => EntryInfo {
                exists: false,
                name: reason.to_string(),
                physical_path: None,
                length: -1,
                is_directory: false,
                last_modified: None,
            },
        }
    }
}

impl From<VirtualEntry> for EntryInfo {
    fn from(entry: VirtualEntry) -> Self {
        entry.render()
    }
}

/// The result of listing a virtual directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DirectoryContents {
    Found { entries: Vec<EntryInfo> },
    NotFound { reason: Diagnostic },
}

impl DirectoryContents {
    pub fn exists(&self) -> bool {
        matches!(self, DirectoryContents::Found { .. })
    }

    /// Entries in listing order; empty when not found.
    pub fn entries(&self) -> &[EntryInfo] {
        match self {
            DirectoryContents::Found { entries } => entries,
            DirectoryContents::NotFound { .. } => &[],
        }
    }

    pub fn reason(&self) -> Option<Diagnostic> {
        match self {
            DirectoryContents::Found { .. } => None,
            DirectoryContents::NotFound { reason } => Some(*reason),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryInfo> {
        self.entries().iter()
    }
}

impl<'a> IntoIterator for &'a DirectoryContents {
    type Item = &'a EntryInfo;
    type IntoIter = std::slice::Iter<'a, EntryInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
