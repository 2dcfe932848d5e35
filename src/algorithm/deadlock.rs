use ndarray::Array2;
use std::ops::ControlFlow;

use crate::algorithm::region::{RegionDetector, same_color_as};
use crate::algorithm::visited::VisitedSet;
use crate::spatial::grid::{CellPos, Grid};

/// Whole-board move detection built on [`RegionDetector`]
///
/// A scan-wide visited set ensures each cell joins at most one flood fill,
/// so a full scan costs O(rows x columns).
#[derive(Debug, Default)]
pub struct DeadlockChecker {
    detector: RegionDetector,
    scanned: VisitedSet,
}

impl DeadlockChecker {
    /// Create a checker; buffers are sized on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some same-color region holds at least `min_group_size` tiles
    pub fn has_any_move(&mut self, grid: &Grid, min_group_size: usize) -> bool {
        let found = self.for_each_region(grid, |region| {
            if region.len() >= min_group_size {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        found.is_break()
    }

    /// Size of the same-color region each cell belongs to (0 for empty cells)
    pub fn group_sizes(&mut self, grid: &Grid) -> Array2<usize> {
        let mut sizes = Array2::zeros(grid.dimensions());
        let _ = self.for_each_region(grid, |region| {
            for pos in region {
                if let Some(size) = sizes.get_mut([pos.row, pos.col]) {
                    *size = region.len();
                }
            }
            ControlFlow::<()>::Continue(())
        });
        sizes
    }

    /// One seed cell for every region large enough to clear
    ///
    /// Seeds are the first cell of each region in row-major scan order.
    pub fn playable_cells(&mut self, grid: &Grid, min_group_size: usize) -> Vec<CellPos> {
        let mut seeds = Vec::new();
        let _ = self.for_each_region(grid, |region| {
            if region.len() >= min_group_size {
                if let Some(&seed) = region.first() {
                    seeds.push(seed);
                }
            }
            ControlFlow::<()>::Continue(())
        });
        seeds
    }

    /// Visit every maximal same-color region once, in row-major seed order
    fn for_each_region<B, V>(&mut self, grid: &Grid, mut visit: V) -> ControlFlow<B>
    where
        V: FnMut(&[CellPos]) -> ControlFlow<B>,
    {
        self.scanned.fit(grid.len());
        let columns = grid.columns();

        let mut outcome = ControlFlow::Continue(());
        for pos in grid.positions() {
            if self.scanned.contains(pos.index(columns)) {
                continue;
            }
            let Some(tile) = grid.tile_at(pos) else {
                continue;
            };

            let region =
                self.detector
                    .find_region(grid, pos.row, pos.col, same_color_as(tile.color));
            for member in &region {
                self.scanned.insert(member.index(columns));
            }

            outcome = visit(&region);
            if outcome.is_break() {
                break;
            }
        }

        self.scanned.reset();
        outcome
    }
}
