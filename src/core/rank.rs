// rank.rs - Frequency ranking of tile variants

use crate::core::library::{TileLibrary, TileVariant};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Assign a dense rank to every variant of every position key: 0 for the
/// most frequent, ties broken by ascending content hash.
///
/// Position keys are independent, so the pass runs per key in parallel.
/// Must complete before body identifiers are derived - they embed the rank.
pub fn rank_library(library: &mut TileLibrary) {
    let mut groups: Vec<&mut BTreeMap<String, TileVariant>> = library.groups_mut().collect();
    groups.par_iter_mut().for_each(|group| rank_group(group));
}

fn rank_group(group: &mut BTreeMap<String, TileVariant>) {
    let mut order: Vec<(u64, String)> = group
        .values()
        .map(|v| (v.freq, v.content_hash.clone()))
        .collect();
    order.sort_by(|a, b| match b.0.cmp(&a.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });

    for (rank, (_, hash)) in order.into_iter().enumerate() {
        if let Some(variant) = group.get_mut(&hash) {
            variant.rank = Some(rank as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PositionKey, TileRecord};
    use crate::hashers::{Md5Digest, SequenceDigest};

    fn ingest(lib: &mut TileLibrary, key: PositionKey, body: &str, times: u64) {
        let digest = Md5Digest;
        let sequence = format!("{}{}{}", "a".repeat(24), body, "t".repeat(24));
        for _ in 0..times {
            lib.ingest_record(
                TileRecord {
                    key,
                    allele: 0,
                    declared_hash: digest.hex_digest(sequence.as_bytes()),
                    seed_len: 1,
                    sequence: sequence.clone(),
                },
                &digest,
            )
            .unwrap();
        }
    }

    fn ranks_by_freq(lib: &TileLibrary, key: PositionKey) -> Vec<(u64, u32, String)> {
        let (_, group) = lib.groups().find(|(k, _)| **k == key).unwrap();
        let mut out: Vec<_> = group
            .values()
            .map(|v| (v.freq, v.rank.unwrap(), v.content_hash.clone()))
            .collect();
        out.sort_by_key(|(_, rank, _)| *rank);
        out
    }

    #[test]
    fn test_rank_by_descending_frequency() {
        let mut lib = TileLibrary::new();
        let key = PositionKey::new(1, 0);
        ingest(&mut lib, key, "aaaa", 1);
        ingest(&mut lib, key, "cccc", 3);
        ingest(&mut lib, key, "gggg", 2);

        rank_library(&mut lib);

        let ranked = ranks_by_freq(&lib, key);
        assert_eq!(ranked[0].0, 3);
        assert_eq!(ranked[1].0, 2);
        assert_eq!(ranked[2].0, 1);
        assert_eq!(
            ranked.iter().map(|r| r.1).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_rank_ties_break_by_hash() {
        // Frequencies [5, 5, 3]: the two fives take ranks 0 and 1 in
        // ascending content-hash order, the three takes rank 2
        let mut lib = TileLibrary::new();
        let key = PositionKey::new(1, 0);
        ingest(&mut lib, key, "aaaa", 5);
        ingest(&mut lib, key, "cccc", 5);
        ingest(&mut lib, key, "gggg", 3);

        rank_library(&mut lib);

        let ranked = ranks_by_freq(&lib, key);
        assert_eq!(ranked[0].0, 5);
        assert_eq!(ranked[1].0, 5);
        assert_eq!(ranked[2].0, 3);
        assert!(ranked[0].2 < ranked[1].2, "tie must order by hash");
        assert_eq!(ranked[2].1, 2);
    }

    #[test]
    fn test_rank_is_per_position_key() {
        let mut lib = TileLibrary::new();
        ingest(&mut lib, PositionKey::new(1, 0), "aaaa", 1);
        ingest(&mut lib, PositionKey::new(1, 1), "cccc", 1);

        rank_library(&mut lib);

        for (_, group) in lib.groups() {
            for variant in group.values() {
                assert_eq!(variant.rank, Some(0));
            }
        }
    }
}
