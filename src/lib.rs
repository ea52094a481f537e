// lib.rs - tilegraph library root

//! # tilegraph - Content-addressed tile-graph builder for graph-genome schemas
//!
//! This library converts per-sample genome tile records (FastJ) into a
//! deduplicated, content-addressed graph representation ready for loading
//! into a relational graph-genome schema, and reconstructs per-allele walks
//! over that graph.
//!
//! ## Features
//!
//! - **Content-addressed deduplication**: identical tile sequences collapse
//!   into one variant per position key, with observation frequencies
//! - **Anchor/body segmentation**: each tile splits into two 24-base boundary
//!   anchors and an interior body, so adjacent tiles share graph nodes
//! - **Deterministic output**: sequence identifiers are assigned in sorted
//!   identifier order; repeated runs produce byte-identical tables
//! - **Atomic publication**: all tables are staged and renamed into place
//!   together, so a failed run never leaves a partial table set
//! - **Plugin digests**: MD5 (library-compatible) and SHA256 backends
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use tilegraph::prelude::*;
//!
//! # fn main() -> tilegraph::error::Result<()> {
//! let digest = Md5Digest;
//!
//! // Ingest FastJ tile files into an in-memory library
//! let mut library = TileLibrary::new();
//! library.ingest_file("hu001.fj", &digest)?;
//!
//! // Rank variants by observed frequency, then derive the graph tables
//! rank_library(&mut library);
//! let tables = GraphTables::build(&library, &digest, &GraphParams::default())?;
//!
//! // Stage and publish the output tables together
//! let mut stage = OutputStage::new();
//! write_sequence_table(&mut stage, "out.sequence", &tables)?;
//! write_graphjoin_table(&mut stage, "out.graphjoin", &tables)?;
//! write_fasta(&mut stage, "out.fa", &tables)?;
//! stage.commit()?;
//! # Ok(())
//! # }
//! ```

// Re-export all main modules
pub mod allele;
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod hashers;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::allele::{AlleleWalks, SequenceIdMap};
    pub use crate::cli::{validate_allele_args, validate_build_args, AlleleArgs, BuildArgs};
    pub use crate::core::{rank_library, GraphParams, GraphTables, TileLibrary};
    pub use crate::data::{FastjReader, PositionKey, TileRecord};
    pub use crate::error::{Result, TileGraphError};
    pub use crate::hashers::{DigestRegistry, Md5Digest, SequenceDigest, Sha256Digest};
    pub use crate::output::{
        write_fasta, write_fasta_csv, write_graphjoin_table, write_graphjoin_variantset,
        write_sequence_table, OutputStage, RunManifest,
    };
}

// Re-export main types at the root level for convenience
pub use crate::allele::{AlleleWalks, SequenceIdMap};
pub use crate::core::{GraphParams, GraphTables, TileLibrary};
pub use crate::data::{PositionKey, TileRecord};
pub use crate::error::{Result, TileGraphError};
pub use crate::hashers::{DigestRegistry, SequenceDigest};
pub use crate::output::{OutputStage, RunManifest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "tilegraph v{} - Content-addressed tile-graph builder",
        VERSION
    )
}
