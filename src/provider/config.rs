//! Provider configuration.

use std::path::PathBuf;

use crate::resolve::CommitNaming;

/// How a [`GitFileProvider`](super::GitFileProvider) reads its repository
/// and its paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Working-tree root, or the `.git` directory itself.
    pub root: PathBuf,
    /// Segment separator for virtual paths.
    pub separator: char,
    /// Names used for entries of the `commits` listing.
    pub commit_naming: CommitNaming,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            separator: std::path::MAIN_SEPARATOR,
            commit_naming: CommitNaming::default(),
        }
    }
}

impl ProviderConfig {
    /// Create a new configuration for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set the path separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set how commits are named in listings.
    pub fn commit_naming(mut self, naming: CommitNaming) -> Self {
        self.commit_naming = naming;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new("/srv/repo");
        assert_eq!(config.root, PathBuf::from("/srv/repo"));
        assert_eq!(config.separator, std::path::MAIN_SEPARATOR);
        assert_eq!(config.commit_naming, CommitNaming::Message);
    }

    #[test]
    fn test_builder() {
        let config = ProviderConfig::new("repo")
            .separator(':')
            .commit_naming(CommitNaming::Hash);
        assert_eq!(config.separator, ':');
        assert_eq!(config.commit_naming, CommitNaming::Hash);
    }
}
