// segment.rs - Segment identifier scheme

use crate::data::PositionKey;
use crate::error::{Result, TileGraphError};
use crate::hashers::SequenceDigest;

/// Fixed anchor length at each tile boundary, in bases
pub const ANCHOR_LEN: usize = 24;

/// Shortest admissible tile: two anchors with an empty body
pub const MIN_TILE_LEN: usize = 2 * ANCHOR_LEN;

/// Borrowed view of one tile split into its three segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileParts<'a> {
    pub leading: &'a str,
    pub body: &'a str,
    pub trailing: &'a str,
}

/// Split a tile sequence into leading anchor, interior body and trailing
/// anchor. The two anchors overlap when the tile is shorter than 48 bases,
/// so such tiles are rejected.
pub fn split_tile<'a>(sequence: &'a str, context: &str) -> Result<TileParts<'a>> {
    if sequence.len() < MIN_TILE_LEN {
        return Err(TileGraphError::TileTooShort {
            context: context.to_string(),
            len: sequence.len(),
            min: MIN_TILE_LEN,
        });
    }
    Ok(TileParts {
        leading: &sequence[..ANCHOR_LEN],
        body: &sequence[ANCHOR_LEN..sequence.len() - ANCHOR_LEN],
        trailing: &sequence[sequence.len() - ANCHOR_LEN..],
    })
}

/// 24-bit no-call mask over an anchor: bit `i` is set when the base at
/// offset `23 - i` (counting from the anchor's end) is 'n' or 'N'.
pub fn no_call_bitmap(anchor: &str) -> u32 {
    let bytes = anchor.as_bytes();
    let mut mask = 0u32;
    for i in 0..ANCHOR_LEN {
        let base = bytes[ANCHOR_LEN - 1 - i];
        if base == b'n' || base == b'N' {
            mask |= 1 << i;
        }
    }
    mask
}

/// Canonical identifier of an anchor segment in its positional context.
///
/// A trailing anchor must be identified with the successor position key
/// (`key.successor(seed_len)`), which makes it collide with the next tile's
/// leading anchor whenever their content matches.
pub fn anchor_id(digest: &dyn SequenceDigest, context: PositionKey, anchor: &str) -> String {
    format!(
        "{}.{}.t{:06x}",
        digest.hex_digest(anchor.as_bytes()),
        context,
        no_call_bitmap(anchor)
    )
}

/// Canonical identifier of a tile body. Rank and seed length are rendered in
/// bare lowercase hex with no padding.
pub fn body_id(
    digest: &dyn SequenceDigest,
    key: PositionKey,
    rank: u32,
    seed_len: u64,
    body: &str,
) -> String {
    format!(
        "{}.{}.r{:x}+{:x}",
        digest.hex_digest(body.as_bytes()),
        key,
        rank,
        seed_len
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashers::Md5Digest;

    const TAG_A: &str = "acgtacgtacgtacgtacgtacgt";

    fn tile(body_len: usize) -> String {
        let mut s = String::from(TAG_A);
        s.push_str(&"c".repeat(body_len));
        s.push_str(&"t".repeat(ANCHOR_LEN));
        s
    }

    #[test]
    fn test_split_tile() {
        let seq = tile(10);
        let parts = split_tile(&seq, "t").unwrap();
        assert_eq!(parts.leading, TAG_A);
        assert_eq!(parts.body, "cccccccccc");
        assert_eq!(parts.trailing, "t".repeat(24));
    }

    #[test]
    fn test_split_tile_empty_body() {
        let seq = tile(0);
        let parts = split_tile(&seq, "t").unwrap();
        assert_eq!(parts.body, "");
    }

    #[test]
    fn test_split_tile_too_short() {
        let seq = "acgt".repeat(11); // 44 bases
        let err = split_tile(&seq, "t").unwrap_err();
        assert!(matches!(err, TileGraphError::TileTooShort { len: 44, .. }));
    }

    #[test]
    fn test_no_call_bitmap_clean() {
        assert_eq!(no_call_bitmap(TAG_A), 0);
    }

    #[test]
    fn test_no_call_bitmap_positions() {
        // Last base no-called -> bit 0
        let mut tag = TAG_A.to_string();
        tag.replace_range(23..24, "n");
        assert_eq!(no_call_bitmap(&tag), 1);

        // First base no-called -> bit 23, uppercase also counts
        let mut tag = TAG_A.to_string();
        tag.replace_range(0..1, "N");
        assert_eq!(no_call_bitmap(&tag), 1 << 23);
    }

    #[test]
    fn test_anchor_id_format() {
        let digest = Md5Digest;
        let key = PositionKey::new(0x247, 0x10a);
        let id = anchor_id(&digest, key, TAG_A);
        let want_hash = digest.hex_digest(TAG_A.as_bytes());
        assert_eq!(id, format!("{}.247.010a.t000000", want_hash));
    }

    #[test]
    fn test_anchor_id_embeds_no_call_mask() {
        let digest = Md5Digest;
        let key = PositionKey::new(1, 2);
        let mut tag = TAG_A.to_string();
        tag.replace_range(23..24, "N");
        let id = anchor_id(&digest, key, &tag);
        assert!(id.ends_with(".001.0002.t000001"), "{}", id);
    }

    #[test]
    fn test_body_id_format() {
        let digest = Md5Digest;
        let key = PositionKey::new(0x247, 0x10a);
        let id = body_id(&digest, key, 0x1f, 2, "cccc");
        let want_hash = digest.hex_digest(b"cccc");
        assert_eq!(id, format!("{}.247.010a.r1f+2", want_hash));
    }

    #[test]
    fn test_adjacent_anchor_ids_match() {
        // Trailing anchor of a tile spanning 3 steps == leading anchor of the
        // tile 3 steps later, given identical content
        let digest = Md5Digest;
        let key = PositionKey::new(0x247, 0x10a);
        let trailing = anchor_id(&digest, key.successor(3), TAG_A);
        let leading = anchor_id(&digest, PositionKey::new(0x247, 0x10d), TAG_A);
        assert_eq!(trailing, leading);
    }
}
