//! Path resolution against the repository.
//!
//! A [`VirtualPath`](crate::path::VirtualPath) is resolved in two steps:
//! [`resolve_root`] turns the selector and its argument into a commit's root
//! tree, then [`walk`] descends that tree along the relative segments.
//! Wildcard collection paths skip both and go through [`enumerate_refs`].
//!
//! Everything here runs inside a lease's `with_repo` closure and borrows
//! from the repository; nothing outlives the call.

mod error;
mod reference;
mod walker;

pub use error::{Diagnostic, ResolveError, ResolveResult};
pub use reference::{enumerate_refs, resolve_root, CommitNaming, RefEntry, ResolvedRoot};
pub use walker::{walk, TreeNode};
