use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::{BTreeMap, HashMap};

use crate::algorithm::deadlock::DeadlockChecker;
use crate::algorithm::gravity::{Move, MoveOrigin};
use crate::io::error::Result;
use crate::spatial::grid::{CellPos, Grid};
use crate::spatial::tiles::{Tile, TileColor};

/// Order in which free cells are handed to a color's tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOrder {
    /// Row 0 first, left to right within a row
    RowMajor,
    /// Column 0 first, floor to top within a column
    ColumnMajor,
    /// Uniformly random permutation of the free cells
    Random,
}

impl FillOrder {
    /// Every available fill order
    pub const ALL: [Self; 3] = [Self::RowMajor, Self::ColumnMajor, Self::Random];
}

/// Outcome of a shuffle request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleResult {
    /// Whether the final layout has at least one legal move
    pub success: bool,
    /// Redistribution attempts performed
    pub attempts: usize,
    /// Relocations from the previous layout (empty on failure)
    pub moves: Vec<Move>,
}

/// Color-preserving board redistribution
///
/// Each attempt lifts every tile off the board, buckets them by color and
/// lays the buckets back down one color at a time, each color using a fill
/// order drawn at random. Placing a color's tiles consecutively in one order
/// keeps them clustered, which makes a legal move likely on the first try.
#[derive(Debug)]
pub struct Shuffler {
    rng: StdRng,
    fill_orders: Vec<FillOrder>,
    checker: DeadlockChecker,
}

impl Shuffler {
    /// Create a shuffler drawing from every fill order
    pub fn new(seed: u64) -> Self {
        Self::with_fill_orders(seed, &FillOrder::ALL)
    }

    /// Create a shuffler restricted to the given fill orders
    ///
    /// An empty list falls back to [`FillOrder::Random`].
    pub fn with_fill_orders(seed: u64, fill_orders: &[FillOrder]) -> Self {
        let fill_orders = if fill_orders.is_empty() {
            vec![FillOrder::Random]
        } else {
            fill_orders.to_vec()
        };

        Self {
            rng: StdRng::seed_from_u64(seed),
            fill_orders,
            checker: DeadlockChecker::new(),
        }
    }

    /// Redistribute tiles until a region of `min_group_size` exists
    ///
    /// Gives up after `max_attempts` redistributions and restores the layout
    /// the grid had on entry. The multiset of colors on the board is the same
    /// before and after in every case.
    ///
    /// # Errors
    ///
    /// Returns an error only if a grid write is rejected, which indicates a bug
    pub fn shuffle(
        &mut self,
        grid: &mut Grid,
        max_attempts: usize,
        min_group_size: usize,
    ) -> Result<ShuffleResult> {
        let entry_layout: Vec<(CellPos, Tile)> = grid.tiles().collect();
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            self.redistribute(grid)?;

            if self.checker.has_any_move(grid, min_group_size) {
                let previous: HashMap<_, _> =
                    entry_layout.iter().map(|(pos, tile)| (tile.id, *pos)).collect();
                let moves = grid
                    .tiles()
                    .filter_map(|(to, tile)| {
                        let from = previous.get(&tile.id).copied()?;
                        (from != to).then_some(Move {
                            tile,
                            from: MoveOrigin::Cell(from),
                            to,
                        })
                    })
                    .collect();

                return Ok(ShuffleResult {
                    success: true,
                    attempts,
                    moves,
                });
            }
        }

        if attempts > 0 {
            grid.clear();
            for &(pos, tile) in &entry_layout {
                grid.set_tile(pos, Some(tile))?;
            }
        }

        Ok(ShuffleResult {
            success: false,
            attempts,
            moves: Vec::new(),
        })
    }

    /// Lift every tile and lay the color buckets back down
    fn redistribute(&mut self, grid: &mut Grid) -> Result<()> {
        let mut buckets: BTreeMap<TileColor, Vec<Tile>> = BTreeMap::new();
        for (_, tile) in grid.clear() {
            buckets.entry(tile.color).or_default().push(tile);
        }

        let (rows, columns) = grid.dimensions();
        let mut free_cells: Vec<CellPos> = grid.positions().collect();

        for tiles in buckets.values() {
            let order = self.pick_fill_order();
            self.arrange(&mut free_cells, order, rows, columns);

            let take = tiles.len().min(free_cells.len());
            for (tile, pos) in tiles.iter().zip(free_cells.drain(..take)) {
                grid.set_tile(pos, Some(*tile))?;
            }
        }

        Ok(())
    }

    fn pick_fill_order(&mut self) -> FillOrder {
        let index = self.rng.random_range(0..self.fill_orders.len());
        self.fill_orders
            .get(index)
            .copied()
            .unwrap_or(FillOrder::Random)
    }

    fn arrange(&mut self, cells: &mut [CellPos], order: FillOrder, rows: usize, columns: usize) {
        match order {
            FillOrder::RowMajor => cells.sort_unstable_by_key(|pos| pos.index(columns)),
            FillOrder::ColumnMajor => cells.sort_unstable_by_key(|pos| pos.col * rows + pos.row),
            FillOrder::Random => cells.shuffle(&mut self.rng),
        }
    }
}
