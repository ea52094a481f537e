// mod.rs - Core engine module

pub mod graph;
pub mod library;
pub mod rank;
pub mod segment;

// Re-export main types
pub use graph::{GraphJoinRow, GraphParams, GraphTables, JoinEndpoint, SegmentEntry};
pub use library::{TileLibrary, TileVariant};
pub use rank::rank_library;
pub use segment::{anchor_id, body_id, no_call_bitmap, split_tile, TileParts, ANCHOR_LEN, MIN_TILE_LEN};
