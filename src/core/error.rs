//! Engine error taxonomy.
//!
//! Out-of-bounds access is deliberately NOT an error: materials probe their
//! neighbors speculatively every tick, so the grid accessors treat an
//! out-of-range coordinate as "no such cell" and writes/swaps no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog lookup by id failed. Fatal to that single operation only.
    #[error("unknown material id: {id}")]
    UnknownMaterial { id: String },

    /// Snapshot carries a version tag this build does not understand.
    #[error("unsupported snapshot version: {found}")]
    VersionMismatch { found: String },

    /// Snapshot was taken from a grid of different dimensions.
    #[error("snapshot is {found_width}x{found_height} but grid is {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    /// Snapshot JSON could not be parsed at all.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}
