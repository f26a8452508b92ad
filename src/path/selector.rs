//! The reference selector: the first segment of a virtual path.

use std::fmt;

use serde::Serialize;

/// What the first segment of a virtual path selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    /// empty first segment: the head tree, no explicit keyword
    Root,
    /// `branches[/<name>]`
    Branches,
    /// `tags[/<name>]`
    Tags,
    /// `commits[/<id>]`
    Commits,
    /// `head`
    Head,
    /// any other first segment; the whole path is read relative to head
    Unhandled,
}

impl Selector {
    /// Fixed keyword table. Lookup is case-sensitive.
    const KEYWORDS: &'static [(&'static str, Selector)] = &[
        ("", Selector::Root),
        ("branches", Selector::Branches),
        ("tags", Selector::Tags),
        ("commits", Selector::Commits),
        ("head", Selector::Head),
    ];

    /// Map a first path segment to its selector.
    pub fn from_keyword(segment: &str) -> Self {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == segment)
            .map(|(_, selector)| *selector)
            .unwrap_or(Selector::Unhandled)
    }

    /// The keyword spelling, `None` for `Unhandled`.
    pub fn keyword(&self) -> Option<&'static str> {
        Self::KEYWORDS
            .iter()
            .find(|(_, selector)| selector == self)
            .map(|(keyword, _)| *keyword)
    }

    /// How many leading segments name the reference.
    ///
    /// `Unhandled` consumes nothing: its first segment is already part of
    /// the in-tree path.
    pub fn consumed_segments(&self) -> usize {
        match self {
            Selector::Unhandled => 0,
            Selector::Root | Selector::Head => 1,
            Selector::Branches | Selector::Tags | Selector::Commits => 2,
        }
    }

    /// Whether this selector names a family of refs (and so can be listed
    /// as a whole).
    pub fn is_ref_collection(&self) -> bool {
        matches!(self, Selector::Branches | Selector::Tags | Selector::Commits)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some("") => write!(f, "<root>"),
            Some(keyword) => write!(f, "{}", keyword),
            None => write!(f, "<unhandled>"),
        }
    }
}
