// config.rs - Configuration file support

use crate::error::{Result, TileGraphError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// TOML configuration mirror of the builder's command line
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BuildConfig {
    // Input/Output
    pub input: Option<Vec<String>>,
    pub fasta: Option<String>,
    pub fasta_csv: Option<String>,
    pub sequence: Option<String>,
    pub graphjoin: Option<String>,
    pub graphjoin_variantset: Option<String>,
    pub raw_dump: Option<String>,

    // Row identifiers
    pub fasta_id: Option<u64>,
    pub start_sequence_id: Option<u64>,
    pub start_graphjoin_id: Option<u64>,
    pub variantset_id: Option<i64>,

    // Core settings
    pub digest: Option<String>,
    pub threads: Option<usize>,

    // Flags
    pub progress: Option<bool>,
    pub verbose: Option<bool>,
}

/// TOML configuration mirror of the reconstructor's command line
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AlleleConfig {
    // Input/Output
    pub input: Option<Vec<String>>,
    pub sequence: Option<String>,
    pub callset: Option<String>,
    pub allele: Option<String>,
    pub allele_path: Option<String>,
    pub allele_call: Option<String>,
    pub manifest: Option<String>,

    // Row identifiers
    pub start_allele_id: Option<u64>,
    pub start_callset_id: Option<u64>,
    pub variantset_id: Option<i64>,

    // Core settings
    pub digest: Option<String>,

    // Flags
    pub progress: Option<bool>,
    pub verbose: Option<bool>,
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        TileGraphError::config(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    toml::from_str(&content).map_err(|e| {
        TileGraphError::config(format!(
            "failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

impl BuildConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = read_toml(path)?;
        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# tilegraph.toml - Configuration file for tilegraph
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Input FastJ files, each as "PATH" or "NAME,PATH"
input = ["hu001,hu001.fj", "hu002,hu002.fj"]

# FASTA output file
fasta = "out.fa"

# FASTA SQL CSV output file
fasta_csv = "FASTA.csv"

# Sequence table output file
sequence = "out.sequence"

# GraphJoin table output file
graphjoin = "out.graphjoin"

# GraphJoin/VariantSet association output file
graphjoin_variantset = "out.graphjoin-variantset"

# Auxiliary raw observation dump (positionKey,contentHash,frequency)
# raw_dump = "out.rawdump"

# =============================================================================
# ROW IDENTIFIERS
# =============================================================================

# Offsets let several runs append into one accumulating dataset
fasta_id = 1
start_sequence_id = 1
start_graphjoin_id = 1
variantset_id = 0

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Content digest: md5, sha256
digest = "md5"

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

progress = false
verbose = false
"#
        .to_string()
    }
}

impl AlleleConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = read_toml(path)?;
        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# allelepaths.toml - Configuration file for allelepaths
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Input FastJ files, each as "PATH" or "NAME,PATH"
input = ["hu001,hu001.fj"]

# Sequence table produced by a compatible tilegraph run
sequence = "out.sequence"

# Run manifest of that table; replay refuses incompatible runs
# manifest = "out.sequence.manifest.json"

# Output tables
callset = "out.callset"
allele = "out.allele"
allele_path = "out.allelepath"
allele_call = "out.allelecall"

# =============================================================================
# ROW IDENTIFIERS
# =============================================================================

start_allele_id = 1
start_callset_id = 1
variantset_id = -1

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Content digest: md5, sha256 (must match the Sequence table's run)
digest = "md5"

# =============================================================================
# FLAGS
# =============================================================================

progress = false
verbose = false
"#
        .to_string()
    }
}
