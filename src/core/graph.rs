// graph.rs - Sequence table assignment and graph join construction

use crate::core::library::TileLibrary;
use crate::core::segment::{anchor_id, body_id, split_tile, ANCHOR_LEN};
use crate::error::{Result, TileGraphError};
use crate::hashers::SequenceDigest;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Starting identifiers and cohort tagging for one emission run.
///
/// Offsets let multiple runs append into a shared accumulating dataset.
#[derive(Debug, Clone)]
pub struct GraphParams {
    pub start_sequence_id: u64,
    pub start_graphjoin_id: u64,
    pub fasta_id: u64,
    pub variantset_id: i64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            start_sequence_id: 1,
            start_graphjoin_id: 1,
            fasta_id: 1,
            variantset_id: 0,
        }
    }
}

/// One distinct segment with its assigned sequence identifier.
///
/// The raw subsequence is retained for FASTA emission.
#[derive(Debug, Clone)]
pub struct SegmentEntry {
    pub id: u64,
    pub fasta_id: u64,
    pub name: String,
    pub content_hash: String,
    pub length: usize,
    pub sequence: String,
}

/// One side of a graph join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinEndpoint {
    pub sequence_id: u64,
    pub offset: i64,
    pub flipped: bool,
}

/// Undirected anchor-body adjacency, at most one per unordered pair of
/// sequence identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphJoinRow {
    pub id: u64,
    pub a: JoinEndpoint,
    pub b: JoinEndpoint,
}

/// The frozen emission product: every distinct segment with its dense
/// sequence identifier, and the deduplicated join set.
#[derive(Debug)]
pub struct GraphTables {
    /// Segments in canonical-identifier order; ids ascend in this order
    pub segments: Vec<SegmentEntry>,
    pub joins: Vec<GraphJoinRow>,
    pub variantset_id: i64,
}

struct VariantSegments {
    leading_id: String,
    body_id: String,
    trailing_id: String,
    body_len: usize,
}

struct PendingSegment {
    content_hash: String,
    sequence: String,
}

impl GraphTables {
    /// Derive the Sequence and GraphJoin tables from a ranked library.
    ///
    /// Sequence identifiers are assigned in lexicographic order of the
    /// canonical segment identifiers, and joins visit variants in
    /// (position key, content hash) order, so repeated runs over identical
    /// input produce identical tables.
    pub fn build(
        library: &TileLibrary,
        digest: &dyn SequenceDigest,
        params: &GraphParams,
    ) -> Result<Self> {
        // Gather every distinct segment and the per-variant identifier trios
        let mut pending: BTreeMap<String, PendingSegment> = BTreeMap::new();
        let mut trios: Vec<VariantSegments> = Vec::new();

        for (key, group) in library.groups() {
            for variant in group.values() {
                let sequence = library.sequence(&variant.content_hash).ok_or_else(|| {
                    TileGraphError::Internal(format!(
                        "no retained sequence for content hash {}",
                        variant.content_hash
                    ))
                })?;
                let context = format!("{}", key);
                let parts = split_tile(sequence, &context)?;
                let rank = variant.rank.ok_or_else(|| {
                    TileGraphError::Internal(format!("variant {} at {} is unranked", variant.content_hash, key))
                })?;

                let leading_id = anchor_id(digest, *key, parts.leading);
                let trailing_id =
                    anchor_id(digest, key.successor(variant.seed_len), parts.trailing);
                let body_name = body_id(digest, *key, rank, variant.seed_len, parts.body);

                for (name, subseq) in [
                    (&leading_id, parts.leading),
                    (&trailing_id, parts.trailing),
                    (&body_name, parts.body),
                ] {
                    pending.entry(name.clone()).or_insert_with(|| PendingSegment {
                        content_hash: digest.hex_digest(subseq.as_bytes()),
                        sequence: subseq.to_string(),
                    });
                }

                trios.push(VariantSegments {
                    leading_id,
                    body_id: body_name,
                    trailing_id,
                    body_len: parts.body.len(),
                });
            }
        }

        // Assign dense sequence identifiers in identifier order
        let mut segments = Vec::with_capacity(pending.len());
        let mut id_of: HashMap<String, u64> = HashMap::with_capacity(pending.len());
        for (i, (name, seg)) in pending.into_iter().enumerate() {
            let id = params.start_sequence_id + i as u64;
            id_of.insert(name.clone(), id);
            segments.push(SegmentEntry {
                id,
                fasta_id: params.fasta_id,
                length: seg.sequence.len(),
                content_hash: seg.content_hash,
                sequence: seg.sequence,
                name,
            });
        }

        // Derive joins, deduplicated by unordered endpoint pair
        let mut joins = Vec::new();
        let mut seen: HashSet<(u64, u64)> = HashSet::new();
        let mut next_id = params.start_graphjoin_id;

        for trio in &trios {
            let leading = id_of[&trio.leading_id];
            let body = id_of[&trio.body_id];
            let trailing = id_of[&trio.trailing_id];

            // Leading anchor into body: the anchor's last base meets the
            // body's first
            let candidates = [
                (
                    (trio.leading_id.as_str(), leading, ANCHOR_LEN as i64 - 1),
                    (trio.body_id.as_str(), body, 0),
                ),
                // Body into trailing anchor
                (
                    (trio.body_id.as_str(), body, trio.body_len as i64 - 1),
                    (trio.trailing_id.as_str(), trailing, 0),
                ),
            ];

            for (upstream, downstream) in candidates {
                let pair = ordered_pair(upstream.1, downstream.1);
                if !seen.insert(pair) {
                    continue;
                }
                joins.push(make_join(next_id, upstream, downstream));
                next_id += 1;
            }
        }

        Ok(Self {
            segments,
            joins,
            variantset_id: params.variantset_id,
        })
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn num_joins(&self) -> usize {
        self.joins.len()
    }
}

fn ordered_pair(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Lay out one join row. The upstream endpoint keeps its flag unset and the
/// downstream endpoint set; endpoint A is whichever canonical identifier
/// sorts first.
fn make_join(
    id: u64,
    upstream: (&str, u64, i64),
    downstream: (&str, u64, i64),
) -> GraphJoinRow {
    let up = JoinEndpoint {
        sequence_id: upstream.1,
        offset: upstream.2,
        flipped: false,
    };
    let down = JoinEndpoint {
        sequence_id: downstream.1,
        offset: downstream.2,
        flipped: true,
    };
    if upstream.0 < downstream.0 {
        GraphJoinRow { id, a: up, b: down }
    } else {
        GraphJoinRow { id, a: down, b: up }
    }
}
