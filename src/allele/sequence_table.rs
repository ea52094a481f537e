// sequence_table.rs - Sequence table import for path reconstruction

use crate::error::{Result, TileGraphError};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Content-hash to SequenceID mapping loaded from a previously emitted
/// Sequence table (`id,fastaFileId,name,contentHash,length`, no header).
///
/// Several identifiers can carry the same content hash (the same anchor
/// content in different positional contexts); the last row wins, matching
/// the table's own import semantics.
#[derive(Debug, Default)]
pub struct SequenceIdMap {
    by_hash: HashMap<String, u64>,
}

impl SequenceIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a Sequence table CSV
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut map = Self::new();
        for (i, row) in reader.records().enumerate() {
            let line = i + 1;
            let record = row.map_err(|e| {
                TileGraphError::malformed(path.display().to_string(), line, e.to_string())
            })?;
            if record.len() < 5 {
                return Err(TileGraphError::malformed(
                    path.display().to_string(),
                    line,
                    format!("expected 5 fields, found {}", record.len()),
                ));
            }

            let id: u64 = record[0].parse().map_err(|_| {
                TileGraphError::malformed(
                    path.display().to_string(),
                    line,
                    format!("bad sequence id '{}'", &record[0]),
                )
            })?;
            let _length: u64 = record[4].parse().map_err(|_| {
                TileGraphError::malformed(
                    path.display().to_string(),
                    line,
                    format!("bad length '{}'", &record[4]),
                )
            })?;

            map.insert(record[3].to_string(), id);
        }

        Ok(map)
    }

    pub fn insert(&mut self, content_hash: String, sequence_id: u64) {
        self.by_hash.insert(content_hash, sequence_id);
    }

    pub fn get(&self, content_hash: &str) -> Option<u64> {
        self.by_hash.get(content_hash).copied()
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.sequence");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "1,1,aaaa.001.0000.t000000,deadbeef,24").unwrap();
        writeln!(f, "2,1,bbbb.001.0000.r0+1,cafef00d,16").unwrap();
        drop(f);

        let map = SequenceIdMap::load(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("deadbeef"), Some(1));
        assert_eq!(map.get("cafef00d"), Some(2));
        assert_eq!(map.get("feedface"), None);
    }

    #[test]
    fn test_load_duplicate_hash_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.sequence");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "1,1,aaaa.001.0000.t000000,deadbeef,24").unwrap();
        writeln!(f, "7,1,aaaa.001.0003.t000000,deadbeef,24").unwrap();
        drop(f);

        let map = SequenceIdMap::load(&path).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("deadbeef"), Some(7));
    }

    #[test]
    fn test_load_rejects_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.sequence");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "x,1,name,hash,24").unwrap();
        drop(f);

        assert!(matches!(
            SequenceIdMap::load(&path).unwrap_err(),
            TileGraphError::MalformedInput { line: 1, .. }
        ));

        let short = dir.path().join("short.sequence");
        let mut f = File::create(&short).unwrap();
        writeln!(f, "1,2,3").unwrap();
        drop(f);
        assert!(SequenceIdMap::load(&short).is_err());
    }
}
