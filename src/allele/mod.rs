// mod.rs - Allele path reconstruction module

pub mod paths;
pub mod sequence_table;

// Re-export main types
pub use paths::{
    write_allele_call_table, write_allele_path_table, write_allele_table, write_callset_table,
    Allele, AlleleCall, AllelePathItem, AlleleWalks, CallSet,
};
pub use sequence_table::SequenceIdMap;
