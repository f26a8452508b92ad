//! gitfs - a read-only file system view of a git repository
//!
//! Every branch, tag and commit of a repository is exposed as a directory
//! tree, addressed by virtual paths like `branches/main/src/lib.rs`,
//! `tags/v1.0/README.md` or `commits/3f2a9c1/Cargo.toml`. Nothing is ever
//! checked out; entries and bytes are read straight from the object database.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use gitfs::{FileProvider, GitFileProvider};
//!
//! let provider = GitFileProvider::new("./my_project");
//!
//! for entry in &provider.list_directory(Some("branches")) {
//!     println!("{}", entry.name);
//! }
//!
//! let mut readme = String::new();
//! provider.open_read("head/README.md").unwrap().read_to_string(&mut readme).unwrap();
//! ```

pub mod handle;
pub mod path;
pub mod provider;
pub mod resolve;
pub mod storage;

#[cfg(test)]
mod fixture;

pub use handle::{ContentStream, HandleLease, RepositoryHandle};
pub use path::{Selector, VirtualPath};
pub use provider::{
    DirectoryContents, EntryInfo, FileProvider, GitFileProvider, NullChangeToken, ProviderConfig,
    VirtualEntry,
};
pub use resolve::{CommitNaming, Diagnostic, ResolveError, ResolveResult};
pub use storage::StorageError;
