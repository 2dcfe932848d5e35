//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Grid storage with bounds-checked access and occupancy bookkeeping
//! - Tile handles and the tile factory boundary

/// Grid storage and cell access
pub mod grid;
/// Tile handles, the factory trait and a pooled factory
pub mod tiles;

pub use grid::{Cell, CellPos, Grid};
pub use tiles::{PooledTileFactory, Tile, TileColor, TileFactory, TileId};
