//! Session credential newtype

use common::Secret;

/// Opaque session key for one upstream account.
///
/// Immutable once loaded. The key is redacted in `Debug` output so a pool or
/// config snapshot can be logged without leaking it.
#[derive(Debug, Clone)]
pub struct SessionCredential(Secret<String>);

impl SessionCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Secret::new(key.into()))
    }

    /// The raw session key, for building the upstream request.
    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

impl PartialEq for SessionCredential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionCredential {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_key() {
        let cred = SessionCredential::new("sk-session-42");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("sk-session-42"), "got: {debug}");
    }

    #[test]
    fn equality_compares_keys() {
        assert_eq!(SessionCredential::new("a"), SessionCredential::new("a"));
        assert_ne!(SessionCredential::new("a"), SessionCredential::new("b"));
    }
}
