// library.rs - Tile library builder

use crate::core::segment::MIN_TILE_LEN;
use crate::data::{FastjReader, PositionKey, TileRecord};
use crate::error::{Result, TileGraphError};
use crate::hashers::SequenceDigest;
use std::collections::BTreeMap;
use std::path::Path;

/// One distinct sequence observed at a position key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileVariant {
    pub content_hash: String,
    pub key: PositionKey,
    pub seed_len: u64,
    pub freq: u64,
    pub rank: Option<u32>,
}

/// In-memory tile library: all distinct tile variants observed across the
/// cohort, grouped by position key and deduplicated by content hash.
///
/// One builder instance owns the whole repository and is threaded by
/// reference through ingestion, ranking and emission.
#[derive(Debug, Default)]
pub struct TileLibrary {
    // Position key -> content hash -> variant. BTreeMaps keep every
    // iteration over the library in a stable order.
    variants: BTreeMap<PositionKey, BTreeMap<String, TileVariant>>,
    // Content hash -> one retained copy of the full tile sequence
    sequences: BTreeMap<String, String>,
    observations: u64,
}

impl TileLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest every record of one FastJ file
    pub fn ingest_file(
        &mut self,
        path: impl AsRef<Path>,
        digest: &dyn SequenceDigest,
    ) -> Result<u64> {
        let mut count = 0;
        for record in FastjReader::from_path(path)? {
            self.ingest_record(record?, digest)?;
            count += 1;
        }
        Ok(count)
    }

    /// Ingest a single tile record: verify its declared content hash, then
    /// either create a variant with frequency 1 or bump the existing one.
    pub fn ingest_record(
        &mut self,
        record: TileRecord,
        digest: &dyn SequenceDigest,
    ) -> Result<()> {
        if record.sequence.len() < MIN_TILE_LEN {
            return Err(TileGraphError::TileTooShort {
                context: record.context(),
                len: record.sequence.len(),
                min: MIN_TILE_LEN,
            });
        }

        let computed = digest.hex_digest(record.sequence.as_bytes());
        if computed != record.declared_hash {
            return Err(TileGraphError::HashMismatch {
                context: record.context(),
                declared: record.declared_hash,
                computed,
            });
        }

        self.observations += 1;

        let group = self.variants.entry(record.key).or_default();
        match group.get_mut(&computed) {
            Some(variant) => variant.freq += 1,
            None => {
                group.insert(
                    computed.clone(),
                    TileVariant {
                        content_hash: computed.clone(),
                        key: record.key,
                        seed_len: record.seed_len,
                        freq: 1,
                        rank: None,
                    },
                );
            }
        }

        self.sequences.entry(computed).or_insert(record.sequence);
        Ok(())
    }

    /// Variant groups in position-key order
    pub fn groups(&self) -> impl Iterator<Item = (&PositionKey, &BTreeMap<String, TileVariant>)> {
        self.variants.iter()
    }

    /// Mutable access for the ranking pass
    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut BTreeMap<String, TileVariant>> {
        self.variants.values_mut()
    }

    /// Retained tile sequence for a content hash
    pub fn sequence(&self, content_hash: &str) -> Option<&str> {
        self.sequences.get(content_hash).map(|s| s.as_str())
    }

    /// Observed (position key, content hash, frequency) triples, the
    /// auxiliary raw-dump view of the library
    pub fn observed_triples(&self) -> impl Iterator<Item = (&PositionKey, &str, u64)> {
        self.variants.iter().flat_map(|(key, group)| {
            group
                .values()
                .map(move |v| (key, v.content_hash.as_str(), v.freq))
        })
    }

    pub fn num_position_keys(&self) -> usize {
        self.variants.len()
    }

    pub fn num_variants(&self) -> usize {
        self.variants.values().map(|g| g.len()).sum()
    }

    pub fn num_observations(&self) -> u64 {
        self.observations
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashers::Md5Digest;

    fn record(key: PositionKey, seed_len: u64, sequence: &str) -> TileRecord {
        let digest = Md5Digest;
        TileRecord {
            key,
            allele: 0,
            declared_hash: digest.hex_digest(sequence.as_bytes()),
            seed_len,
            sequence: sequence.to_string(),
        }
    }

    fn tile(body: &str) -> String {
        format!("{}{}{}", "a".repeat(24), body, "t".repeat(24))
    }

    #[test]
    fn test_ingest_deduplicates_by_hash() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let key = PositionKey::new(1, 2);
        let seq = tile("cccc");

        lib.ingest_record(record(key, 1, &seq), &digest).unwrap();
        lib.ingest_record(record(key, 1, &seq), &digest).unwrap();

        assert_eq!(lib.num_position_keys(), 1);
        assert_eq!(lib.num_variants(), 1);
        assert_eq!(lib.num_observations(), 2);

        let (_, group) = lib.groups().next().unwrap();
        let variant = group.values().next().unwrap();
        assert_eq!(variant.freq, 2);
        assert_eq!(variant.rank, None);
    }

    #[test]
    fn test_ingest_distinct_variants_same_key() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let key = PositionKey::new(1, 2);

        lib.ingest_record(record(key, 1, &tile("cccc")), &digest)
            .unwrap();
        lib.ingest_record(record(key, 1, &tile("gggg")), &digest)
            .unwrap();

        assert_eq!(lib.num_position_keys(), 1);
        assert_eq!(lib.num_variants(), 2);
    }

    #[test]
    fn test_ingest_rejects_hash_mismatch() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let mut rec = record(PositionKey::new(1, 2), 1, &tile("cccc"));
        rec.declared_hash = "0".repeat(32);

        let err = lib.ingest_record(rec, &digest).unwrap_err();
        assert!(matches!(err, TileGraphError::HashMismatch { .. }));
        assert!(lib.is_empty());
    }

    #[test]
    fn test_ingest_rejects_short_tile() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let rec = record(PositionKey::new(1, 2), 1, "acgt");

        let err = lib.ingest_record(rec, &digest).unwrap_err();
        assert!(matches!(err, TileGraphError::TileTooShort { .. }));
    }

    #[test]
    fn test_sequence_retained_once() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let seq = tile("cccc");
        let hash = digest.hex_digest(seq.as_bytes());

        // Same content at two position keys is still stored once
        lib.ingest_record(record(PositionKey::new(1, 2), 1, &seq), &digest)
            .unwrap();
        lib.ingest_record(record(PositionKey::new(1, 3), 1, &seq), &digest)
            .unwrap();

        assert_eq!(lib.sequence(&hash), Some(seq.as_str()));
        assert_eq!(lib.num_variants(), 2);
    }

    #[test]
    fn test_observed_triples() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let key = PositionKey::new(1, 2);
        let seq = tile("cccc");
        lib.ingest_record(record(key, 1, &seq), &digest).unwrap();
        lib.ingest_record(record(key, 1, &seq), &digest).unwrap();

        let triples: Vec<_> = lib.observed_triples().collect();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].0, &key);
        assert_eq!(triples[0].2, 2);
    }
}
