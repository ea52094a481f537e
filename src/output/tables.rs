// tables.rs - CSV row writers for the relational graph tables

use crate::core::graph::GraphTables;
use crate::core::library::TileLibrary;
use crate::error::Result;
use crate::output::stage::OutputStage;
use std::io::Write;
use std::path::Path;

/// Quoted boolean tokens used by the graph-join and allele-path tables
pub fn sql_bool(value: bool) -> &'static str {
    if value {
        "'TRUE'"
    } else {
        "'FALSE'"
    }
}

/// Write the Sequence table: `id,fastaFileId,name,contentHash,length`,
/// no header, one row per distinct segment
pub fn write_sequence_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    tables: &GraphTables,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for seg in &tables.segments {
        writeln!(
            writer,
            "{},{},{},{},{}",
            seg.id, seg.fasta_id, seg.name, seg.content_hash, seg.length
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the GraphJoin table:
/// `id,sequenceIdA,offsetA,flippedA,sequenceIdB,offsetB,flippedB`
pub fn write_graphjoin_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    tables: &GraphTables,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for join in &tables.joins {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            join.id,
            join.a.sequence_id,
            join.a.offset,
            sql_bool(join.a.flipped),
            join.b.sequence_id,
            join.b.offset,
            sql_bool(join.b.flipped)
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the GraphJoin/VariantSet association: `joinId,variantSetId`,
/// one row per emitted join
pub fn write_graphjoin_variantset(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    tables: &GraphTables,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for join in &tables.joins {
        writeln!(writer, "{},{}", join.id, tables.variantset_id)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the single-row FASTA file table: `fastaFileId,fastaPath`
pub fn write_fasta_csv(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    fasta_id: u64,
    fasta_path: &str,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    writeln!(writer, "{},{}", fasta_id, fasta_path)?;
    writer.flush()?;
    Ok(())
}

/// Write the auxiliary raw observation dump:
/// `positionKey,contentHash,frequency`
pub fn write_raw_dump(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    library: &TileLibrary,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for (key, hash, freq) in library.observed_triples() {
        writeln!(writer, "{},{},{}", key, hash, freq)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{GraphParams, GraphTables};
    use crate::core::rank::rank_library;
    use crate::data::{PositionKey, TileRecord};
    use crate::hashers::{Md5Digest, SequenceDigest};

    fn sample_tables() -> (TileLibrary, GraphTables) {
        let digest = Md5Digest;
        let mut lib = TileLibrary::new();
        let sequence = format!("{}{}{}", "a".repeat(24), "ccccgggg", "t".repeat(24));
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
        (lib, tables)
    }

    #[test]
    fn test_sql_bool_tokens() {
        assert_eq!(sql_bool(true), "'TRUE'");
        assert_eq!(sql_bool(false), "'FALSE'");
    }

    #[test]
    fn test_sequence_table_layout() {
        let (_, tables) = sample_tables();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sequence");

        let mut stage = OutputStage::new();
        write_sequence_table(&mut stage, &path, &tables).unwrap();
        stage.commit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 5);
            fields[0].parse::<u64>().unwrap();
            assert_eq!(fields[1], "1");
        }
    }

    #[test]
    fn test_graphjoin_table_layout() {
        let (_, tables) = sample_tables();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.graphjoin");

        let mut stage = OutputStage::new();
        write_graphjoin_table(&mut stage, &path, &tables).unwrap();
        stage.commit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        for line in text.lines() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 7);
            assert!(fields[3] == "'TRUE'" || fields[3] == "'FALSE'");
            assert!(fields[6] == "'TRUE'" || fields[6] == "'FALSE'");
        }
    }

    #[test]
    fn test_variantset_association_rows() {
        let (_, tables) = sample_tables();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.graphjoin-variantset");

        let mut stage = OutputStage::new();
        write_graphjoin_variantset(&mut stage, &path, &tables).unwrap();
        stage.commit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), tables.num_joins());
        assert!(lines.iter().all(|l| l.ends_with(",0")));
    }

    #[test]
    fn test_fasta_csv_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FASTA.csv");

        let mut stage = OutputStage::new();
        write_fasta_csv(&mut stage, &path, 3, "out.fa").unwrap();
        stage.commit().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3,out.fa\n");
    }

    #[test]
    fn test_raw_dump_rows() {
        let (lib, _) = sample_tables();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");

        let mut stage = OutputStage::new();
        write_raw_dump(&mut stage, &path, &lib).unwrap();
        stage.commit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("001.0000,"));
        assert!(lines[0].ends_with(",1"));
    }
}
