/// Whole-board move detection and region census
pub mod deadlock;
/// Gameplay orchestration and lifecycle events
pub mod engine;
/// Column collapse and refill
pub mod gravity;
/// Connected-region search
pub mod region;
/// Color-preserving board redistribution
pub mod shuffle;
/// Reusable visited marks for grid searches
pub mod visited;
