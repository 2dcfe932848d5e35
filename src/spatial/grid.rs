//! Fixed-size board of cells and their tile occupancy
//!
//! Row 0 is the floor: "below" means a lower row index and gravity pulls
//! tiles toward row 0. Every occupancy change goes through
//! [`Grid::set_tile`], which keeps the cell array (forward reference) and the
//! tile placement table (back reference) in agreement.

use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::io::error::{BoardError, Result, invalid_parameter, out_of_bounds};
use crate::spatial::tiles::{Tile, TileColor, TileId};

/// Fixed coordinate of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Row index, 0 is the floor
    pub row: usize,
    /// Column index, 0 is the leftmost column
    pub col: usize,
}

impl CellPos {
    /// Create a coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major flat index for a grid with `columns` columns
    pub const fn index(self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    /// Inverse of [`CellPos::index`]
    pub const fn from_index(index: usize, columns: usize) -> Self {
        Self {
            row: index / columns,
            col: index % columns,
        }
    }

    const fn as_index(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Snapshot of one cell: its coordinate and current occupant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Coordinate of the cell
    pub pos: CellPos,
    /// Tile occupying the cell, if any
    pub tile: Option<Tile>,
}

impl Cell {
    /// Whether a tile occupies the cell
    pub const fn is_occupied(&self) -> bool {
        self.tile.is_some()
    }

    /// Color of the occupant, if any
    pub fn color(&self) -> Option<TileColor> {
        self.tile.map(|tile| tile.color)
    }
}

/// Rectangular board of cells created once and never resized
#[derive(Debug, Clone)]
pub struct Grid {
    /// Occupant of each cell, indexed by (`row`, `col`)
    cells: Array2<Option<Tile>>,
    /// Cell currently holding each placed tile
    placements: HashMap<TileId, CellPos>,
    /// Grid dimensions (rows, columns)
    dimensions: (usize, usize),
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, columns), None),
            placements: HashMap::with_capacity(rows * columns),
            dimensions: (rows, columns),
        }
    }

    /// Build a grid from a text layout
    ///
    /// Lines are listed top row first, so the last line is row 0. Uppercase
    /// letters are colors (`A` is color 0) and `.` marks an empty cell.
    /// `make_tile` supplies the handle for each occupied cell, visited in
    /// row-major order from row 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines have different lengths, contain a
    /// character other than an uppercase letter or `.`, or `make_tile` hands
    /// out the same tile id twice
    pub fn from_layout<F>(layout: &[&str], mut make_tile: F) -> Result<Self>
    where
        F: FnMut(TileColor) -> Tile,
    {
        let rows = layout.len();
        let columns = layout.first().map_or(0, |line| line.chars().count());
        let mut grid = Self::new(rows, columns);

        for (row, line) in layout.iter().rev().enumerate() {
            if line.chars().count() != columns {
                return Err(invalid_parameter(
                    "layout",
                    line,
                    &format!("expected {columns} cells per line"),
                ));
            }

            for (col, symbol) in line.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let color = TileColor::from_label(symbol).ok_or_else(|| {
                    invalid_parameter("layout", &symbol, &"expected an uppercase letter or '.'")
                })?;
                grid.place_new(CellPos::new(row, col), make_tile(color))?;
            }
        }

        Ok(grid)
    }

    /// Get the number of rows in the grid
    pub const fn rows(&self) -> usize {
        self.dimensions.0
    }

    /// Get the number of columns in the grid
    pub const fn columns(&self) -> usize {
        self.dimensions.1
    }

    /// Grid dimensions (rows, columns)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.dimensions.0 * self.dimensions.1
    }

    /// Whether the grid has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the coordinate names a cell of this grid
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.dimensions.0 && pos.col < self.dimensions.1
    }

    /// Bounds-checked cell lookup
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.cell(CellPos::new(row, col))
    }

    /// Bounds-checked cell lookup by coordinate
    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.cells
            .get(pos.as_index())
            .map(|&tile| Cell { pos, tile })
    }

    /// Occupant of a cell (`None` for empty or out-of-range cells)
    pub fn tile_at(&self, pos: CellPos) -> Option<Tile> {
        self.cells.get(pos.as_index()).copied().flatten()
    }

    /// Cell currently holding the tile, if it is placed
    pub fn cell_of(&self, id: TileId) -> Option<CellPos> {
        self.placements.get(&id).copied()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.placements.len()
    }

    /// Set or clear the occupant of a cell
    ///
    /// Updates the cell and the tile's back reference together. A tile that
    /// is already placed elsewhere is detached from its previous cell first.
    /// Returns the tile displaced from `pos`, if a different one was there.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the grid
    pub fn set_tile(&mut self, pos: CellPos, tile: Option<Tile>) -> Result<Option<Tile>> {
        if !self.contains(pos) {
            return Err(out_of_bounds(pos.row, pos.col, self.dimensions));
        }

        if let Some(incoming) = tile {
            if let Some(previous) = self.placements.get(&incoming.id).copied() {
                if previous != pos {
                    if let Some(slot) = self.cells.get_mut(previous.as_index()) {
                        *slot = None;
                    }
                }
            }
        }

        let displaced = self
            .cells
            .get_mut(pos.as_index())
            .and_then(|slot| std::mem::replace(slot, tile))
            .filter(|old| tile.is_none_or(|incoming| incoming.id != old.id));

        if let Some(old) = displaced {
            self.placements.remove(&old.id);
        }
        if let Some(incoming) = tile {
            self.placements.insert(incoming.id, pos);
        }

        self.debug_check_cell(pos);
        Ok(displaced)
    }

    /// Place a tile that is not on the board yet
    ///
    /// Unlike [`Grid::set_tile`], which treats a placed tile as a move, this
    /// rejects a handle whose id already occupies a cell. Returns the tile
    /// displaced from `pos`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the grid or the tile id is
    /// already placed
    pub fn place_new(&mut self, pos: CellPos, tile: Tile) -> Result<Option<Tile>> {
        if let Some(at) = self.cell_of(tile.id) {
            return Err(BoardError::DuplicateTile { id: tile.id, at });
        }
        self.set_tile(pos, Some(tile))
    }

    /// Remove and return the occupant of a cell
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the grid
    pub fn take_tile(&mut self, pos: CellPos) -> Result<Option<Tile>> {
        self.set_tile(pos, None)
    }

    /// Remove every tile, returning them with their former cells in row-major order
    pub fn clear(&mut self) -> Vec<(CellPos, Tile)> {
        let removed: Vec<(CellPos, Tile)> = self.tiles().collect();
        self.cells.fill(None);
        self.placements.clear();
        removed
    }

    /// Placed tiles with their cells in row-major order (row 0 first)
    pub fn tiles(&self) -> impl Iterator<Item = (CellPos, Tile)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), slot)| slot.map(|tile| (CellPos::new(row, col), tile)))
    }

    /// Every cell coordinate in row-major order
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + use<> {
        let (rows, columns) = self.dimensions;
        (0..rows).flat_map(move |row| (0..columns).map(move |col| CellPos::new(row, col)))
    }

    /// Number of placed tiles per color
    pub fn color_counts(&self) -> BTreeMap<TileColor, usize> {
        let mut counts = BTreeMap::new();
        for (_, tile) in self.tiles() {
            *counts.entry(tile.color).or_insert(0) += 1;
        }
        counts
    }

    /// Cell one row up, toward the top of the board
    pub const fn above(&self, pos: CellPos) -> Option<CellPos> {
        if pos.row + 1 < self.dimensions.0 {
            Some(CellPos::new(pos.row + 1, pos.col))
        } else {
            None
        }
    }

    /// Cell one row down, toward the floor
    pub const fn below(&self, pos: CellPos) -> Option<CellPos> {
        if pos.row > 0 && pos.row <= self.dimensions.0 {
            Some(CellPos::new(pos.row - 1, pos.col))
        } else {
            None
        }
    }

    /// Cell one column to the left
    pub const fn left(&self, pos: CellPos) -> Option<CellPos> {
        if pos.col > 0 && pos.col <= self.dimensions.1 {
            Some(CellPos::new(pos.row, pos.col - 1))
        } else {
            None
        }
    }

    /// Cell one column to the right
    pub const fn right(&self, pos: CellPos) -> Option<CellPos> {
        if pos.col + 1 < self.dimensions.1 {
            Some(CellPos::new(pos.row, pos.col + 1))
        } else {
            None
        }
    }

    /// In-range 4-neighbors in the fixed order up, down, left, right
    pub fn neighbors(&self, pos: CellPos) -> impl Iterator<Item = CellPos> + use<> {
        [
            self.above(pos),
            self.below(pos),
            self.left(pos),
            self.right(pos),
        ]
        .into_iter()
        .flatten()
    }

    /// Check the occupancy invariant for one cell in debug builds
    fn debug_check_cell(&self, pos: CellPos) {
        if let Some(tile) = self.tile_at(pos) {
            debug_assert_eq!(
                self.placements.get(&tile.id),
                Some(&pos),
                "tile {:?} back reference disagrees with cell {pos}",
                tile.id
            );
        }
    }
}

impl fmt::Display for Grid {
    /// Renders the top row first, using color letters and `.` for empty cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows()).rev() {
            for col in 0..self.columns() {
                let symbol = self
                    .tile_at(CellPos::new(row, col))
                    .map_or('.', |tile| tile.color.label());
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
