//! Test repositories built on the fly with git2.

use std::collections::BTreeMap;
use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A throwaway repository whose HEAD points at `refs/heads/main`.
pub(crate) struct Fixture {
    dir: TempDir,
    pub repo: Repository,
}

/// Commits created by [`Fixture::sample`].
pub(crate) struct SampleHistory {
    pub first: Oid,
    pub second: Oid,
    pub feature: Oid,
}

pub(crate) const README_V1: &str = "hello\n";
pub(crate) const README_V2: &str = "hello world\n";
pub(crate) const LIB_RS: &str = "pub fn answer() -> u32 {\n    42\n}\n";
pub(crate) const LICENSE: &str = "MIT License\n";
pub(crate) const GUIDE: &str = "# Guide\n\nRead the source.\n";
pub(crate) const FEATURE_RS: &str = "pub fn feature() {}\n";

impl Fixture {
    /// An empty repository with an unborn `main` branch.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir, repo }
    }

    /// A repository with some history:
    ///
    /// ```text
    /// main:    first ("Initial commit") -- second ("Add guide")
    /// feature: first -- feature ("Feature work")
    /// tags:    v1 (lightweight) and release (annotated) on first
    /// ```
    pub fn sample() -> Self {
        Self::sample_with_history().0
    }

    pub fn sample_with_history() -> (Self, SampleHistory) {
        let fixture = Self::new();

        let first = fixture.commit(
            "refs/heads/main",
            &[
                ("README.md", README_V1),
                ("LICENSE", LICENSE),
                ("src/lib.rs", LIB_RS),
            ],
            "Initial commit\n",
        );

        let second = fixture.commit(
            "refs/heads/main",
            &[
                ("README.md", README_V2),
                ("LICENSE", LICENSE),
                ("src/lib.rs", LIB_RS),
                ("docs/guide.md", GUIDE),
            ],
            "Add guide\n",
        );

        {
            let feature_base = fixture.repo.find_commit(first).unwrap();
            fixture.repo.branch("feature", &feature_base, false).unwrap();
        }
        let feature = fixture.commit(
            "refs/heads/feature",
            &[
                ("README.md", README_V1),
                ("LICENSE", LICENSE),
                ("src/lib.rs", LIB_RS),
                ("src/feature.rs", FEATURE_RS),
            ],
            "Feature work\n",
        );

        fixture.lightweight_tag("v1", first);
        fixture.annotated_tag("release", first);

        (fixture, SampleHistory { first, second, feature })
    }

    /// the working directory (the provider root)
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit a full snapshot of `files` on top of `reference`'s current tip.
    pub fn commit(&self, reference: &str, files: &[(&str, &str)], message: &str) -> Oid {
        let tree_id = write_tree(&self.repo, files);
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = signature();

        let parent = self
            .repo
            .find_reference(reference)
            .ok()
            .and_then(|r| r.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some(reference), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn lightweight_tag(&self, name: &str, at: Oid) {
        let target = self.repo.find_object(at, None).unwrap();
        self.repo.tag_lightweight(name, &target, false).unwrap();
    }

    pub fn annotated_tag(&self, name: &str, at: Oid) {
        let target = self.repo.find_object(at, None).unwrap();
        self.repo
            .tag(name, &target, &signature(), "annotated", false)
            .unwrap();
    }
}

fn signature() -> Signature<'static> {
    Signature::now("gitfs", "gitfs@localhost").unwrap()
}

fn write_tree(repo: &Repository, files: &[(&str, &str)]) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    let mut subdirs: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();

    for (path, content) in files {
        match path.split_once('/') {
            Some((dir, rest)) => subdirs.entry(dir).or_default().push((rest, *content)),
            None => {
                let blob = repo.blob(content.as_bytes()).unwrap();
                builder.insert(path, blob, 0o100644).unwrap();
            }
        }
    }

    for (dir, children) in subdirs {
        let subtree = write_tree(repo, &children);
        builder.insert(dir, subtree, 0o040000).unwrap();
    }

    builder.write().unwrap()
}
