//! Change notification. A commit never changes, so nothing ever fires.

/// A change token that never reports a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullChangeToken;

impl NullChangeToken {
    pub const fn has_changed(&self) -> bool {
        false
    }

    /// Whether registered callbacks will be invoked. Never.
    pub const fn active_change_callbacks(&self) -> bool {
        false
    }

    /// Accept a callback and drop it without calling it.
    pub fn register_change_callback<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(callback);
    }
}
