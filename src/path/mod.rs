//! Virtual path grammar.
//!
//! ```text
//! <empty>                           head tree root (listing only)
//! head[/<path>]                     head tree
//! branches[/*]                      every branch
//! branches/<name>[/<path>]          one branch's tip tree
//! tags[/*]                          every tag
//! tags/<name>[/<path>]              the commit a tag marks
//! commits[/*]                       every commit reachable from head
//! commits/<id>[/<path>]             one commit's tree
//! <anything else>[/<path>]          listed relative to head, first segment included
//! ```

mod selector;
mod virtual_path;

pub use selector::Selector;
pub use virtual_path::{VirtualPath, WILDCARD};
