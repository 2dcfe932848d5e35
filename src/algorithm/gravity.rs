use crate::io::error::Result;
use crate::spatial::grid::{CellPos, Grid};
use crate::spatial::tiles::{Tile, TileFactory};

/// Where a moved tile came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOrigin {
    /// The tile was already on the board at this cell
    Cell(CellPos),
    /// The tile was created by the factory for this refill
    Spawn {
        /// Index among the tiles spawned into the same column in one pass
        slot: usize,
    },
}

/// One tile relocation for the presentation layer to animate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The tile that moved
    pub tile: Tile,
    /// Previous cell, or spawn
    pub from: MoveOrigin,
    /// Cell the tile now rests in
    pub to: CellPos,
}

impl Move {
    /// Whether the tile entered the board during this move
    pub const fn is_spawn(&self) -> bool {
        matches!(self.from, MoveOrigin::Spawn { .. })
    }
}

/// Collapse every column toward the floor and refill from the factory
///
/// Columns are processed left to right and each one is finished before the
/// next starts. Within a column the scan runs from row 0 upward: an empty
/// cell takes the nearest tile above it, or a new tile from the factory when
/// nothing is left above. The grid is in its final resting state when this
/// returns; the moves only describe how it got there.
///
/// # Errors
///
/// Returns an error if the factory hands out a tile that is still on the
/// board; the grid is left partially resolved in that case
pub fn resolve_gravity<F>(grid: &mut Grid, factory: &mut F) -> Result<Vec<Move>>
where
    F: TileFactory + ?Sized,
{
    let mut moves = Vec::new();
    for col in 0..grid.columns() {
        collapse_column(grid, factory, col, &mut moves)?;
    }
    Ok(moves)
}

/// Resolve a single column, appending its moves
fn collapse_column<F>(
    grid: &mut Grid,
    factory: &mut F,
    col: usize,
    moves: &mut Vec<Move>,
) -> Result<()>
where
    F: TileFactory + ?Sized,
{
    let rows = grid.rows();
    let mut spawn_slot = 0;
    // Rows below the probe hold no tiles that can still fall
    let mut probe = 0;

    for row in 0..rows {
        let target = CellPos::new(row, col);
        if grid.tile_at(target).is_some() {
            continue;
        }

        probe = probe.max(row + 1);
        while probe < rows && grid.tile_at(CellPos::new(probe, col)).is_none() {
            probe += 1;
        }

        if probe < rows {
            let source = CellPos::new(probe, col);
            if let Some(tile) = grid.take_tile(source)? {
                grid.set_tile(target, Some(tile))?;
                moves.push(Move {
                    tile,
                    from: MoveOrigin::Cell(source),
                    to: target,
                });
            }
        } else {
            let tile = factory.create_tile(col, spawn_slot);
            spawn_slot += 1;
            grid.place_new(target, tile)?;
            moves.push(Move {
                tile,
                from: MoveOrigin::Spawn { slot: spawn_slot - 1 },
                to: target,
            });
        }
    }

    Ok(())
}

/// Whether no empty cell has an occupied cell above it in the same column
pub fn is_settled(grid: &Grid) -> bool {
    (0..grid.columns()).all(|col| {
        let mut seen_gap = false;
        (0..grid.rows()).all(|row| {
            let occupied = grid.tile_at(CellPos::new(row, col)).is_some();
            if occupied && seen_gap {
                return false;
            }
            seen_gap |= !occupied;
            true
        })
    })
}
