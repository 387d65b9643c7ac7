//! Session storage trait.

/// Session-scoped key/value storage.
///
/// Abstracts the browser-local storage the workflow uses for analytics
/// timestamps. Writes are fire-and-forget.
pub trait SessionStorage: Send + Sync {
    /// Store a value under a key, replacing any existing value.
    fn set_item(&self, key: &str, value: &str);

    /// Read the value stored under a key.
    fn get_item(&self, key: &str) -> Option<String>;
}
