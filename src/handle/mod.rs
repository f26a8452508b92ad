//! Repository handle lifetime management.
//!
//! One [`RepositoryHandle`] is shared by everything a provider does. Every
//! consumer holds a [`HandleLease`]; the repository is open while at least
//! one lease is outstanding and closed when the last one is given back.
//! [`ContentStream`] owns a lease, so an open read stream keeps the
//! repository open until it is closed or dropped.
//!
//! ```text
//!   acquire()          acquire()          drop(lease)        drop(lease)
//!  0 ────────▶ 1 (open) ────────▶ 2 ──────────────▶ 1 ──────────────▶ 0 (closed)
//! ```

mod lease;
mod manager;
mod stream;

pub use lease::HandleLease;
pub use manager::RepositoryHandle;
pub use stream::ContentStream;
