//! Inbound API key checking.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Set of accepted inbound API keys, held as SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    key_hashes: HashSet<String>,
}

impl ApiKeyGuard {
    /// Creates a guard accepting the given raw keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            key_hashes: keys
                .into_iter()
                .map(|k| Self::hash_key(k.as_ref()))
                .collect(),
        }
    }

    /// Hash an API key.
    fn hash_key(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Whether any key is configured. An empty guard admits every request.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.key_hashes.is_empty()
    }

    /// Checks a presented key.
    ///
    /// Always true when the guard is disabled.
    #[must_use]
    pub fn is_allowed(&self, presented: Option<&str>) -> bool {
        if !self.is_enabled() {
            return true;
        }
        presented.is_some_and(|key| self.key_hashes.contains(&Self::hash_key(key)))
    }

    /// Get the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key_hashes.len()
    }

    /// Check if the guard holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_guard_allows_everything() {
        let guard = ApiKeyGuard::default();
        assert!(!guard.is_enabled());
        assert!(guard.is_allowed(None));
        assert!(guard.is_allowed(Some("anything")));
    }

    #[test]
    fn test_enabled_guard_checks_key() {
        let guard = ApiKeyGuard::new(["alpha", "beta"]);
        assert!(guard.is_enabled());
        assert_eq!(guard.len(), 2);
        assert!(guard.is_allowed(Some("alpha")));
        assert!(guard.is_allowed(Some("beta")));
        assert!(!guard.is_allowed(Some("gamma")));
        assert!(!guard.is_allowed(Some("")));
        assert!(!guard.is_allowed(None));
    }

    #[test]
    fn test_keys_are_stored_hashed() {
        let guard = ApiKeyGuard::new(vec!["plain-secret".to_string()]);
        assert!(!guard.key_hashes.contains("plain-secret"));
        assert!(guard.key_hashes.iter().all(|h| h.len() == 64));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let guard = ApiKeyGuard::new(["same", "same"]);
        assert_eq!(guard.len(), 1);
    }
}
