// traits.rs - Core trait for the content digest system

use std::fmt::Debug;

/// Trait for content-addressing strategies - pluggable digest backends
///
/// Segment identifiers embed the digest as a lowercase hex string, so every
/// backend must produce a stable hex rendering of its output.
pub trait SequenceDigest: Send + Sync + Debug {
    /// Compute the lowercase hex digest of a byte sequence
    fn hex_digest(&self, data: &[u8]) -> String;

    /// Get a human-readable name for this digest
    fn name(&self) -> &'static str;

    /// Get a description of this digest
    fn description(&self) -> &'static str;

    /// Length of the hex rendering in characters
    fn hex_len(&self) -> usize;

    /// Validate that a string looks like one of this digest's hex outputs
    fn validate_hex(&self, hex: &str) -> bool {
        hex.len() == self.hex_len() && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}
