//! State for whatever renders the tiles and files. Each board publishes a complete snapshot per
//! change through a [`watch`](rocket::tokio::sync::watch) channel.
//!
//! Overlapping refreshes aren't coordinated: whichever finishes last wins.

pub mod file_board;
pub mod tile_board;

pub use file_board::FileBoard;
pub use tile_board::TileBoard;

#[cfg(test)]
mod tests;
