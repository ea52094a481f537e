// registry.rs - Digest registry for managing available digest backends

use super::traits::SequenceDigest;
use super::{Md5Digest, Sha256Digest};
use std::collections::HashMap;

/// Registry for available digest backends
pub struct DigestRegistry {
    digests: HashMap<String, Box<dyn SequenceDigest>>,
}

impl DigestRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            digests: HashMap::new(),
        };

        // Register built-in digests
        registry.register("md5", Box::new(Md5Digest));
        registry.register("sha256", Box::new(Sha256Digest));

        registry
    }

    /// Register a new digest backend
    pub fn register(&mut self, name: &str, digest: Box<dyn SequenceDigest>) {
        self.digests.insert(name.to_string(), digest);
    }

    /// Get a digest by name
    pub fn get(&self, name: &str) -> Option<&dyn SequenceDigest> {
        self.digests.get(name).map(|d| d.as_ref())
    }

    /// Check if a digest exists
    pub fn has(&self, name: &str) -> bool {
        self.digests.contains_key(name)
    }

    /// List all available digests
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.digests
            .values()
            .map(|d| (d.name(), d.description()))
            .collect()
    }

    /// Get all registered digest names
    pub fn names(&self) -> Vec<&str> {
        self.digests.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for DigestRegistry {
    fn default() -> Self {
        Self::new()
    }
}
