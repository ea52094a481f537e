// fasta.rs - FASTA emission of distinct segment sequences

use crate::core::graph::GraphTables;
use crate::error::Result;
use crate::output::stage::OutputStage;
use std::io::Write;
use std::path::Path;

/// Line width for folded sequence output
pub const FOLD_WIDTH: usize = 50;

/// Write one FASTA record per distinct segment, in the same identifier order
/// as the Sequence table: `>` + canonical identifier, the sequence folded at
/// 50 characters, and a blank separator line after each record.
pub fn write_fasta(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    tables: &GraphTables,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for seg in &tables.segments {
        writeln!(writer, ">{}", seg.name)?;
        write_folded(&mut writer, &seg.sequence)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_folded<W: Write>(writer: &mut W, sequence: &str) -> std::io::Result<()> {
    if sequence.is_empty() {
        // An empty body still occupies one sequence line
        return writeln!(writer);
    }
    for chunk in sequence.as_bytes().chunks(FOLD_WIDTH) {
        writer.write_all(chunk)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{GraphParams, GraphTables};
    use crate::core::rank::rank_library;
    use crate::core::library::TileLibrary;
    use crate::data::{PositionKey, TileRecord};
    use crate::hashers::{Md5Digest, SequenceDigest};

    fn fold_to_string(sequence: &str) -> String {
        let mut buf = Vec::new();
        write_folded(&mut buf, sequence).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fold_short() {
        assert_eq!(fold_to_string("acgt"), "acgt\n");
    }

    #[test]
    fn test_fold_exact_width() {
        let seq = "a".repeat(50);
        assert_eq!(fold_to_string(&seq), format!("{}\n", seq));
    }

    #[test]
    fn test_fold_multiple_lines() {
        let seq = format!("{}{}", "a".repeat(50), "c".repeat(10));
        assert_eq!(
            fold_to_string(&seq),
            format!("{}\n{}\n", "a".repeat(50), "c".repeat(10))
        );
    }

    #[test]
    fn test_fold_empty() {
        assert_eq!(fold_to_string(""), "\n");
    }

    #[test]
    fn test_fasta_records() {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let sequence = format!("{}{}{}", "a".repeat(24), "c".repeat(60), "t".repeat(24));
        lib.ingest_record(
            TileRecord {
                key: PositionKey::new(1, 0),
                allele: 0,
                declared_hash: digest.hex_digest(sequence.as_bytes()),
                seed_len: 1,
                sequence,
            },
            &digest,
        )
        .unwrap();
        rank_library(&mut lib);
        let tables = GraphTables::build(&lib, &digest, &GraphParams::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fa");
        let mut stage = OutputStage::new();
        write_fasta(&mut stage, &path, &tables).unwrap();
        stage.commit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(headers.len(), 3);

        // Headers follow the Sequence table order
        let names: Vec<String> = tables.segments.iter().map(|s| format!(">{}", s.name)).collect();
        assert_eq!(headers, names.iter().map(|s| s.as_str()).collect::<Vec<_>>());

        // The 60-base body folds into a 50-char and a 10-char line
        assert!(text.contains(&format!("{}\n{}\n", "c".repeat(50), "c".repeat(10))));

        // Records are separated by blank lines and the file ends with one
        assert!(text.ends_with("\n\n"));
    }
}
