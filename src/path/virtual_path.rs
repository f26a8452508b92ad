//! Decomposition of a raw virtual path.

use super::selector::Selector;

/// The literal segment that asks for every ref of a kind.
pub const WILDCARD: &str = "*";

/// A virtual path split into selector, segments and wildcard flag.
///
/// Parsing is pure string work; nothing here looks at the repository.
///
/// ```
/// use gitfs::path::{Selector, VirtualPath};
///
/// let path = VirtualPath::parse("branches/main/src/lib.rs", '/');
/// assert_eq!(path.selector(), Selector::Branches);
/// assert_eq!(path.argument(), Some("main"));
/// assert_eq!(path.relative_path(), "src/lib.rs");
/// assert!(!path.is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPath {
    raw: String,
    separator: char,
    segments: Vec<String>,
    selector: Selector,
    wildcard: bool,
}

impl VirtualPath {
    /// Split `raw` on `separator` and classify it.
    ///
    /// Segment 0 picks the selector. The wildcard flag is set when there is
    /// no segment 1 or segment 1 is exactly `*`.
    pub fn parse(raw: &str, separator: char) -> Self {
        let segments: Vec<String> = raw.split(separator).map(str::to_string).collect();
        let selector = Selector::from_keyword(&segments[0]);
        let wildcard = segments.get(1).map_or(true, |segment| segment == WILDCARD);

        Self {
            raw: raw.to_string(),
            separator,
            segments,
            selector,
            wildcard,
        }
    }

    /// The path exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// All segments, empty ones included.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// True when the path asks for every ref of its kind.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// The selector argument (branch name, tag name, commit id): segment 1.
    pub fn argument(&self) -> Option<&str> {
        self.segments.get(1).map(String::as_str)
    }

    /// In-tree segments after the ones the selector consumes.
    ///
    /// Empty segments are skipped, so repeated and trailing separators
    /// collapse: `head/src//lib.rs/` walks `src` then `lib.rs`.
    pub fn relative_segments(&self) -> Vec<&str> {
        self.segments
            .iter()
            .skip(self.selector.consumed_segments())
            .map(String::as_str)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// The in-tree path joined with `/`, the way git names tree paths.
    pub fn relative_path(&self) -> String {
        self.relative_segments().join("/")
    }

    /// Virtual path of a child entry named `name`.
    ///
    /// Exactly one separator goes between this path and the name; an empty
    /// path gives the bare name.
    pub fn child_path(&self, name: &str) -> String {
        if self.raw.is_empty() {
            name.to_string()
        } else if self.raw.ends_with(self.separator) {
            format!("{}{}", self.raw, name)
        } else {
            format!("{}{}{}", self.raw, self.separator, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_root_wildcard() {
        let path = VirtualPath::parse("", '/');
        assert_eq!(path.selector(), Selector::Root);
        assert!(path.is_wildcard());
        assert_eq!(path.segments(), &[String::new()]);
        assert!(path.relative_segments().is_empty());
    }

    #[test]
    fn test_wildcard_flag() {
        assert!(VirtualPath::parse("branches", '/').is_wildcard());
        assert!(VirtualPath::parse("branches/*", '/').is_wildcard());
        assert!(VirtualPath::parse("tags/*/anything", '/').is_wildcard());
        assert!(!VirtualPath::parse("branches/main", '/').is_wildcard());
        // an empty argument is not the wildcard token
        assert!(!VirtualPath::parse("branches/", '/').is_wildcard());
        // only segment 1 counts
        assert!(!VirtualPath::parse("branches/main/*", '/').is_wildcard());
    }

    #[test]
    fn test_ref_selectors_consume_two_segments() {
        let path = VirtualPath::parse("commits/abc123/docs/guide.md", '/');
        assert_eq!(path.selector(), Selector::Commits);
        assert_eq!(path.argument(), Some("abc123"));
        assert_eq!(path.relative_segments(), vec!["docs", "guide.md"]);
    }

    #[test]
    fn test_head_consumes_one_segment() {
        let path = VirtualPath::parse("head/src/lib.rs", '/');
        assert_eq!(path.selector(), Selector::Head);
        assert_eq!(path.relative_path(), "src/lib.rs");
    }

    #[test]
    fn test_unhandled_first_segment_is_not_consumed() {
        let path = VirtualPath::parse("src/lib.rs", '/');
        assert_eq!(path.selector(), Selector::Unhandled);
        assert_eq!(path.relative_path(), "src/lib.rs");

        // keywords are case-sensitive, so this is an in-tree path too
        let path = VirtualPath::parse("Head/README.md", '/');
        assert_eq!(path.selector(), Selector::Unhandled);
        assert_eq!(path.relative_path(), "Head/README.md");
    }

    #[test]
    fn test_trailing_and_repeated_separators_collapse() {
        let path = VirtualPath::parse("branches/main/", '/');
        assert_eq!(path.argument(), Some("main"));
        assert!(path.relative_segments().is_empty());

        let path = VirtualPath::parse("head//src///lib.rs/", '/');
        assert_eq!(path.relative_segments(), vec!["src", "lib.rs"]);
    }

    #[test]
    fn test_child_path_keeps_inner_separators() {
        // only a trailing separator is reused; the rest of the path is kept as supplied
        let path = VirtualPath::parse("head//docs", '/');
        assert_eq!(path.relative_segments(), vec!["docs"]);
        assert_eq!(path.child_path("guide.md"), "head//docs/guide.md");

        let path = VirtualPath::parse("head//docs//", '/');
        assert_eq!(path.child_path("guide.md"), "head//docs//guide.md");

        assert_eq!(VirtualPath::parse("head/docs", '/').child_path("guide.md"), "head/docs/guide.md");
        assert_eq!(VirtualPath::parse("", '/').child_path("README.md"), "README.md");
    }

    #[test]
    fn test_custom_separator() {
        let path = VirtualPath::parse(r"branches\origin/dev\src\lib.rs", '\\');
        assert_eq!(path.selector(), Selector::Branches);
        assert_eq!(path.argument(), Some("origin/dev"));
        assert_eq!(path.relative_path(), "src/lib.rs");
    }

    #[test]
    fn test_child_path_uses_one_separator() {
        assert_eq!(VirtualPath::parse("", '/').child_path("src"), "src");
        assert_eq!(VirtualPath::parse("head", '/').child_path("src"), "head/src");
        assert_eq!(VirtualPath::parse("head/", '/').child_path("src"), "head/src");
        assert_eq!(
            VirtualPath::parse(r"branches\main", '\\').child_path("src"),
            r"branches\main\src"
        );
    }
}
