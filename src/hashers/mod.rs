// mod.rs - Hashers module root

pub mod md5;
pub mod registry;
pub mod sha256;
pub mod traits;

// Re-export main types for convenience
pub use md5::Md5Digest;
pub use registry::DigestRegistry;
pub use sha256::Sha256Digest;
pub use traits::SequenceDigest;
