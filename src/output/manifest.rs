// manifest.rs - Versioned run manifest for the cross-run contract

use crate::error::{Result, TileGraphError};
use crate::output::stage::OutputStage;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Manifest format understood by this version of the tools
pub const FORMAT_VERSION: u32 = 1;

/// Metadata published next to the Sequence table.
///
/// The allele-path reconstructor can only replay a tile stream against a
/// Sequence table produced with the same digest and table format; the
/// manifest makes that contract explicit instead of leaving it to
/// operational discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub format_version: u32,
    pub digest: String,
    pub fasta_id: u64,
    pub start_sequence_id: u64,
    pub start_graphjoin_id: u64,
    pub variantset_id: i64,
    pub sequence_rows: u64,
    pub graphjoin_rows: u64,
    pub created: String,
}

impl RunManifest {
    /// Manifest path for a given Sequence table path
    pub fn path_for(sequence_path: impl AsRef<Path>) -> PathBuf {
        let mut name = sequence_path.as_ref().as_os_str().to_os_string();
        name.push(".manifest.json");
        PathBuf::from(name)
    }

    /// Timestamped manifest for the current run
    pub fn now(
        digest: &str,
        fasta_id: u64,
        start_sequence_id: u64,
        start_graphjoin_id: u64,
        variantset_id: i64,
        sequence_rows: u64,
        graphjoin_rows: u64,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            digest: digest.to_string(),
            fasta_id,
            start_sequence_id,
            start_graphjoin_id,
            variantset_id,
            sequence_rows,
            graphjoin_rows,
            created: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    /// Stage the manifest for publication alongside the tables
    pub fn write(&self, stage: &mut OutputStage, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = stage.create(path)?;
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| TileGraphError::Internal(format!("manifest serialization: {}", e)))?;
        writer.write_all(text.as_bytes())?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a manifest from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            TileGraphError::IncompatibleRun(format!(
                "unreadable manifest {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Refuse replay against a table from a different format or digest
    pub fn check_compatible(&self, digest: &str) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(TileGraphError::IncompatibleRun(format!(
                "manifest format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        if self.digest != digest {
            return Err(TileGraphError::IncompatibleRun(format!(
                "sequence table was built with digest '{}', replaying with '{}'",
                self.digest, digest
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> RunManifest {
        RunManifest::now("md5", 1, 1, 1, 0, 3, 2)
    }

    #[test]
    fn test_path_for() {
        assert_eq!(
            RunManifest::path_for("out.sequence"),
            PathBuf::from("out.sequence.manifest.json")
        );
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sequence.manifest.json");

        let mut stage = OutputStage::new();
        manifest().write(&mut stage, &path).unwrap();
        stage.commit().unwrap();

        let loaded = RunManifest::load(&path).unwrap();
        assert_eq!(loaded.format_version, FORMAT_VERSION);
        assert_eq!(loaded.digest, "md5");
        assert_eq!(loaded.sequence_rows, 3);
    }

    #[test]
    fn test_compatibility() {
        let m = manifest();
        assert!(m.check_compatible("md5").is_ok());
        assert!(matches!(
            m.check_compatible("sha256").unwrap_err(),
            TileGraphError::IncompatibleRun(_)
        ));

        let mut old = manifest();
        old.format_version = 99;
        assert!(old.check_compatible("md5").is_err());
    }
}
