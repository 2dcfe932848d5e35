//! Tile handles and the factory boundary that creates and recycles them
//!
//! The engine never owns tile resources. It asks a [`TileFactory`] for a new
//! tile whenever gravity leaves a cell empty and hands every cleared tile back.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;

/// Identity of a tile handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// Color category of a tile (0-based index into the active color set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileColor(pub u8);

impl TileColor {
    /// Palette index for this color
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Single letter label (`A` for color 0, `B` for color 1, ...)
    pub const fn label(self) -> char {
        (b'A' + self.0 % 26) as char
    }

    /// Parse a label produced by [`TileColor::label`]
    pub const fn from_label(label: char) -> Option<Self> {
        if label.is_ascii_uppercase() {
            Some(Self(label as u8 - b'A'))
        } else {
            None
        }
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Opaque tile handle: an identity plus an immutable color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Handle identity, unique among live tiles
    pub id: TileId,
    /// Color category
    pub color: TileColor,
}

impl Tile {
    /// Create a tile handle
    pub const fn new(id: TileId, color: TileColor) -> Self {
        Self { id, color }
    }
}

/// Source and sink of tile handles
///
/// Called exactly once per spawned tile and once per cleared tile. A handle
/// passed to [`TileFactory::release_tile`] is never used again by the engine.
pub trait TileFactory {
    /// Produce a tile for `column`
    ///
    /// `spawn_slot` counts tiles already spawned into the same column during
    /// the current refill pass, so the presentation can stack entry positions.
    fn create_tile(&mut self, column: usize, spawn_slot: usize) -> Tile;

    /// Produce a tile of a given color for a prepared layout
    fn create_colored(&mut self, color: TileColor) -> Tile;

    /// Take back a tile that left the board
    fn release_tile(&mut self, tile: Tile);
}

/// Free-list tile allocator keyed by color with seeded color selection
///
/// Released handles are recycled for later tiles of the same color. Colors
/// are drawn uniformly from `0..color_count`.
#[derive(Debug, Clone)]
pub struct PooledTileFactory {
    rng: StdRng,
    color_count: u8,
    free_lists: Vec<Vec<TileId>>,
    next_id: u32,
    live: usize,
    duplicate_releases: usize,
}

impl PooledTileFactory {
    /// Create a factory producing `color_count` colors (clamped to at least one)
    pub fn new(seed: u64, color_count: usize) -> Self {
        let color_count = color_count.clamp(1, usize::from(u8::MAX)) as u8;
        Self {
            rng: StdRng::seed_from_u64(seed),
            color_count,
            free_lists: vec![Vec::new(); usize::from(color_count)],
            next_id: 0,
            live: 0,
            duplicate_releases: 0,
        }
    }

    /// Number of colors this factory draws from
    pub fn color_count(&self) -> usize {
        usize::from(self.color_count)
    }

    /// Hand out a tile of a specific color
    ///
    /// Reuses a pooled handle of that color when one is available.
    pub fn create_colored(&mut self, color: TileColor) -> Tile {
        let recycled = self
            .free_lists
            .get_mut(color.index())
            .and_then(Vec::pop);

        let id = recycled.unwrap_or_else(|| {
            let id = TileId(self.next_id);
            self.next_id += 1;
            id
        });

        self.live += 1;
        Tile::new(id, color)
    }

    /// Tiles handed out and not yet released
    pub const fn live_count(&self) -> usize {
        self.live
    }

    /// Handles waiting in the free lists
    pub fn pooled_count(&self) -> usize {
        self.free_lists.iter().map(Vec::len).sum()
    }

    /// Pooled handles available for one color
    pub fn pooled_for(&self, color: TileColor) -> usize {
        self.free_lists.get(color.index()).map_or(0, Vec::len)
    }

    /// Releases ignored because the handle was already pooled
    pub const fn duplicate_releases(&self) -> usize {
        self.duplicate_releases
    }
}

impl TileFactory for PooledTileFactory {
    fn create_tile(&mut self, _column: usize, _spawn_slot: usize) -> Tile {
        let color = TileColor(self.rng.random_range(0..self.color_count));
        self.create_colored(color)
    }

    fn create_colored(&mut self, color: TileColor) -> Tile {
        Self::create_colored(self, color)
    }

    fn release_tile(&mut self, tile: Tile) {
        // Colors outside the palette come from callers that built tiles
        // themselves; they are dropped rather than pooled
        let Some(free_list) = self.free_lists.get_mut(tile.color.index()) else {
            self.live = self.live.saturating_sub(1);
            return;
        };

        if free_list.contains(&tile.id) {
            self.duplicate_releases += 1;
            return;
        }

        free_list.push(tile.id);
        self.live = self.live.saturating_sub(1);
    }
}
