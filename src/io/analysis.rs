//! Session statistics aggregated from engine lifecycle events

use crate::algorithm::engine::BoardEvent;
use std::fmt;

/// Running totals for one play session
///
/// Feed every [`BoardEvent`] to [`SessionStats::record`]; selection counts
/// are reported separately by whoever drives the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Selections that cleared a region
    pub selections_accepted: usize,
    /// Selections the engine rejected
    pub selections_rejected: usize,
    /// Regions removed
    pub regions_cleared: usize,
    /// Tiles removed across all regions
    pub tiles_cleared: usize,
    /// Size of the largest region removed
    pub largest_region: usize,
    /// Tiles created by refills (including the initial fill)
    pub tiles_spawned: usize,
    /// Existing tiles moved down by gravity
    pub tiles_dropped: usize,
    /// Successful shuffles
    pub shuffles: usize,
    /// Tiles relocated by shuffles
    pub tiles_shuffled: usize,
    /// Shuffles that found no solvable layout
    pub shuffle_failures: usize,
}

impl SessionStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one engine event into the totals
    pub fn record(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::BoardInitialized { .. } => {}
            BoardEvent::RegionCleared { cells, .. } => {
                self.regions_cleared += 1;
                self.tiles_cleared += cells.len();
                self.largest_region = self.largest_region.max(cells.len());
            }
            BoardEvent::GravityResolved { moves } => {
                let spawned = moves.iter().filter(|entry| entry.is_spawn()).count();
                self.tiles_spawned += spawned;
                self.tiles_dropped += moves.len() - spawned;
            }
            BoardEvent::Shuffled { moves } => {
                self.shuffles += 1;
                self.tiles_shuffled += moves.len();
            }
            BoardEvent::ShuffleFailed { .. } => {
                self.shuffle_failures += 1;
            }
        }
    }

    /// Record the outcome of one selection attempt
    pub fn record_selection(&mut self, accepted: bool) {
        if accepted {
            self.selections_accepted += 1;
        } else {
            self.selections_rejected += 1;
        }
    }

    /// Mean tiles per cleared region
    pub fn mean_region_size(&self) -> f64 {
        if self.regions_cleared == 0 {
            0.0
        } else {
            self.tiles_cleared as f64 / self.regions_cleared as f64
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} regions ({} tiles, largest {}), {} shuffles, {} failed",
            self.regions_cleared,
            self.tiles_cleared,
            self.largest_region,
            self.shuffles,
            self.shuffle_failures
        )
    }
}
