// sha256.rs - SHA256 digest implementation

use super::traits::SequenceDigest;

/// SHA256 digest - cryptographically secure alternative
///
/// Identifiers built with this backend are not interchangeable with MD5-based
/// tile libraries; the whole cohort must use one digest end to end.
#[derive(Debug, Clone)]
pub struct Sha256Digest;

impl SequenceDigest for Sha256Digest {
    fn hex_digest(&self, data: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn name(&self) -> &'static str {
        "SHA256"
    }

    fn description(&self) -> &'static str {
        "SHA256 digest for cryptographically secure segment identification"
    }

    fn hex_len(&self) -> usize {
        64
    }
}
