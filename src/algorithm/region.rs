use crate::algorithm::visited::VisitedSet;
use crate::spatial::grid::{Cell, CellPos, Grid};
use crate::spatial::tiles::TileColor;

/// Membership predicate matching occupied cells of one color
pub fn same_color_as(color: TileColor) -> impl Fn(&Cell) -> bool + Copy {
    move |cell: &Cell| cell.tile.is_some_and(|tile| tile.color == color)
}

/// Connected-region search over a grid
///
/// Iterative 4-directional flood fill driven by an explicit work stack, so
/// memory stays bounded by the board size and call depth stays constant.
/// The visited marks and the stack are kept between calls and sized to the
/// grid on each search.
#[derive(Debug, Default)]
pub struct RegionDetector {
    visited: VisitedSet,
    stack: Vec<usize>,
}

impl RegionDetector {
    /// Create a detector; buffers are sized on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with buffers sized for a `rows` x `columns` grid
    pub fn with_dimensions(rows: usize, columns: usize) -> Self {
        Self {
            visited: VisitedSet::new(rows * columns),
            stack: Vec::with_capacity(rows * columns),
        }
    }

    /// Collect the region containing `(row, col)` under `predicate`
    ///
    /// Every returned cell satisfies the predicate and is 4-connected to the
    /// seed through other returned cells. Neighbors are pushed in the fixed
    /// order up, down, left, right. The result is empty when the seed is out
    /// of range or fails the predicate.
    pub fn find_region<P>(
        &mut self,
        grid: &Grid,
        row: usize,
        col: usize,
        mut predicate: P,
    ) -> Vec<CellPos>
    where
        P: FnMut(&Cell) -> bool,
    {
        let mut region = Vec::new();
        let Some(seed) = grid.cell_at(row, col) else {
            return region;
        };

        let columns = grid.columns();
        if self.visited.capacity() != grid.len() {
            self.visited.fit(grid.len());
        }

        self.stack.clear();
        self.stack.push(seed.pos.index(columns));

        while let Some(index) = self.stack.pop() {
            if self.visited.contains(index) {
                continue;
            }

            let Some(cell) = grid.cell(CellPos::from_index(index, columns)) else {
                continue;
            };
            if !predicate(&cell) {
                continue;
            }

            self.visited.insert(index);
            region.push(cell.pos);

            for neighbor in grid.neighbors(cell.pos) {
                let neighbor_index = neighbor.index(columns);
                if !self.visited.contains(neighbor_index) {
                    self.stack.push(neighbor_index);
                }
            }
        }

        self.visited.reset();
        region
    }

    /// Collect the same-color region containing `(row, col)`
    ///
    /// Empty when the seed cell is empty or out of range.
    pub fn find_same_color(&mut self, grid: &Grid, row: usize, col: usize) -> Vec<CellPos> {
        match grid.cell_at(row, col).and_then(|cell| cell.color()) {
            Some(color) => self.find_region(grid, row, col, same_color_as(color)),
            None => Vec::new(),
        }
    }
}
