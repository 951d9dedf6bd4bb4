use thiserror::Error;

use super::remote_errors::RemoteError;

/// a whole tile fetch failed. Per-record problems never end up here, they're dropped where they happen
#[derive(Error, PartialEq, Debug, Clone)]
pub enum TileResolutionError {
    /// the ordered query against the tile collection failed
    #[error("Failed to fetch tiles: {0}")]
    Query(RemoteError),
    /// the collection was empty and writing the sample tiles failed
    #[error("Failed to insert sample tiles: {0}")]
    Seed(RemoteError),
}
