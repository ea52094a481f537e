// md5.rs - MD5 digest implementation

use super::traits::SequenceDigest;

/// MD5 digest - matches the identifiers of existing tile libraries
#[derive(Debug, Clone)]
pub struct Md5Digest;

impl SequenceDigest for Md5Digest {
    fn hex_digest(&self, data: &[u8]) -> String {
        let digest = md5::compute(data);
        format!("{:x}", digest)
    }

    fn name(&self) -> &'static str {
        "MD5"
    }

    fn description(&self) -> &'static str {
        "MD5 digest, compatible with existing tile library identifiers"
    }

    fn hex_len(&self) -> usize {
        32
    }
}
