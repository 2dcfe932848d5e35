//! Logic core of a tile-blast puzzle
//!
//! A rectangular grid holds colored tiles. Selecting a tile removes its
//! orthogonally connected same-color region when the region is large enough,
//! tiles above fall into the gaps, new tiles are spawned from a factory, and
//! the board is reshuffled whenever no legal move remains.

#![forbid(unsafe_code)]

/// Region detection, gravity, deadlock detection, shuffling and orchestration
pub mod algorithm;
/// Configuration, errors, command-line driver and board export
pub mod io;
/// Grid storage and tile handles
pub mod spatial;

pub use algorithm::engine::{BoardEvent, Engine, EngineConfig, EngineState};
pub use io::error::{BoardError, Result};
pub use spatial::{CellPos, Grid, PooledTileFactory, Tile, TileColor, TileFactory, TileId};
