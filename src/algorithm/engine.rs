//! Gameplay orchestration: selection, clear, refill, deadlock check and shuffle
//!
//! The engine owns the grid and sequences one player action at a time. Every
//! phase runs synchronously; presentation code learns about each phase
//! through [`BoardEvent`] callbacks delivered in registration order.

use ndarray::Array2;

use crate::algorithm::deadlock::DeadlockChecker;
use crate::algorithm::gravity::{Move, resolve_gravity};
use crate::algorithm::region::RegionDetector;
use crate::algorithm::shuffle::Shuffler;
use crate::io::configuration::{
    DEFAULT_COLORS, DEFAULT_COLUMNS, DEFAULT_MIN_GROUP_SIZE, DEFAULT_ROWS, DEFAULT_SEED,
    DEFAULT_SHUFFLE_ATTEMPTS, MAX_COLORS, MAX_GRID_DIMENSION, SHUFFLE_SEED_SALT,
};
use crate::io::error::{BoardError, Result, invalid_parameter};
use crate::spatial::grid::{CellPos, Grid};
use crate::spatial::tiles::{PooledTileFactory, TileColor, TileFactory};

/// Board and rule parameters fixed for the lifetime of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Number of tile colors in play
    pub color_count: usize,
    /// Smallest region a selection may clear
    pub min_group_size: usize,
    /// Redistribution attempts before a shuffle gives up
    pub max_shuffle_attempts: usize,
    /// Seed for the shuffler and the default tile factory
    pub seed: u64,
    /// Keep the interaction lock after each cycle until [`Engine::release`]
    pub hold_until_released: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            color_count: DEFAULT_COLORS,
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            max_shuffle_attempts: DEFAULT_SHUFFLE_ATTEMPTS,
            seed: DEFAULT_SEED,
            hold_until_released: false,
        }
    }
}

impl EngineConfig {
    /// Check every parameter against its allowed range
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or above `MAX_GRID_DIMENSION`,
    /// the color count is outside `1..=MAX_COLORS`, or the minimum group size
    /// is zero
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("rows", self.rows), ("columns", self.columns)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.color_count == 0 || self.color_count > MAX_COLORS {
            return Err(invalid_parameter(
                "color_count",
                &self.color_count,
                &format!("must be between 1 and {MAX_COLORS}"),
            ));
        }

        if self.min_group_size == 0 {
            return Err(invalid_parameter(
                "min_group_size",
                &self.min_group_size,
                &"must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Interaction lock state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Board not built yet; gameplay calls are faults
    Uninitialized,
    /// Accepting a player selection
    Idle,
    /// A cycle is running or awaiting [`Engine::release`]
    Resolving,
}

/// Lifecycle notification delivered to subscribers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// The cell array exists; fired once before the first refill
    BoardInitialized {
        /// Number of rows
        rows: usize,
        /// Number of columns
        columns: usize,
    },
    /// A selected region was removed and its tiles released
    RegionCleared {
        /// Cells emptied by the selection
        cells: Vec<CellPos>,
        /// Color of the cleared region
        color: TileColor,
    },
    /// Columns collapsed and empty cells were refilled
    GravityResolved {
        /// Tile relocations and spawns in resolution order
        moves: Vec<Move>,
    },
    /// A deadlocked board was redistributed into a solvable layout
    Shuffled {
        /// Tile relocations from the deadlocked layout
        moves: Vec<Move>,
    },
    /// No solvable layout was found; the board is left as it was
    ShuffleFailed {
        /// Redistribution attempts performed
        attempts: usize,
    },
}

type Listener = Box<dyn FnMut(&BoardEvent)>;

/// Tile-blast gameplay core
///
/// Sequences selection, region clear, gravity refill, deadlock detection and
/// shuffling. Only [`EngineState::Idle`] accepts a selection; anything
/// received while resolving is rejected, not queued.
pub struct Engine<F: TileFactory = PooledTileFactory> {
    config: EngineConfig,
    grid: Grid,
    factory: F,
    detector: RegionDetector,
    checker: DeadlockChecker,
    shuffler: Shuffler,
    listeners: Vec<Listener>,
    state: EngineState,
    stuck: bool,
}

impl Engine<PooledTileFactory> {
    /// Create an engine whose tiles come from a seeded [`PooledTileFactory`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_pooled_factory(config: EngineConfig) -> Result<Self> {
        let factory = PooledTileFactory::new(config.seed, config.color_count);
        Self::new(config, factory)
    }
}

impl<F: TileFactory> Engine<F> {
    /// Create an engine with an empty board
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: EngineConfig, factory: F) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grid: Grid::new(config.rows, config.columns),
            factory,
            detector: RegionDetector::with_dimensions(config.rows, config.columns),
            checker: DeadlockChecker::new(),
            shuffler: Shuffler::new(config.seed ^ SHUFFLE_SEED_SALT),
            listeners: Vec::new(),
            state: EngineState::Uninitialized,
            stuck: false,
            config,
        })
    }

    /// Register a callback for every subsequent [`BoardEvent`]
    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: FnMut(&BoardEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Fill the empty board from the factory and make sure a move exists
    ///
    /// On failure the board is emptied and the engine stays uninitialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the board was already initialized or the factory
    /// hands out a tile that is already placed
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(BoardError::AlreadyInitialized);
        }

        self.state = EngineState::Resolving;
        self.emit(&BoardEvent::BoardInitialized {
            rows: self.config.rows,
            columns: self.config.columns,
        });

        let outcome = self.finish_cycle(|engine| engine.settle());
        if outcome.is_err() {
            self.grid = Grid::new(self.config.rows, self.config.columns);
            self.state = EngineState::Uninitialized;
        }
        outcome
    }

    /// Start from a text layout whose tiles come from this engine's factory
    ///
    /// Uses the format of [`Grid::from_layout`]. Gaps are filled by a normal
    /// refill pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the board was already initialized, the layout is
    /// malformed, or its dimensions differ from the configuration
    pub fn initialize_with_layout(&mut self, layout: &[&str]) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(BoardError::AlreadyInitialized);
        }

        let factory = &mut self.factory;
        let mut grid = Grid::from_layout(layout, |color| factory.create_colored(color))?;
        if let Err(error) = self.check_dimensions(&grid) {
            for (_, tile) in grid.clear() {
                self.factory.release_tile(tile);
            }
            return Err(error);
        }
        self.initialize_with(grid)
    }

    /// Start from a prepared board instead of an empty one
    ///
    /// Every tile on `grid` must have been created by this engine's factory
    /// (see [`Engine::factory_mut`] and [`Engine::initialize_with_layout`]),
    /// otherwise a refill may hand out an id that is already on the board.
    /// Gaps are filled by a normal refill pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the board was already initialized, the grid
    /// dimensions differ from the configuration, or the refill produces a
    /// tile that is already placed
    pub fn initialize_with(&mut self, grid: Grid) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(BoardError::AlreadyInitialized);
        }
        self.check_dimensions(&grid)?;

        self.grid = grid;
        self.initialize()
    }

    /// Handle a player selection at `(row, col)`
    ///
    /// Returns `Ok(false)` when the selection is rejected: the engine is
    /// resolving, the coordinate is out of range, the cell is empty, or its
    /// region is smaller than the minimum group size. Returns `Ok(true)` once
    /// the region is cleared and the board has settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has not been initialized
    pub fn try_select(&mut self, row: usize, col: usize) -> Result<bool> {
        match self.state {
            EngineState::Uninitialized => {
                return Err(BoardError::NotInitialized {
                    operation: "select a tile",
                });
            }
            EngineState::Resolving => return Ok(false),
            EngineState::Idle => {}
        }

        let Some(color) = self.grid.cell_at(row, col).and_then(|cell| cell.color()) else {
            return Ok(false);
        };

        let region = self.detector.find_same_color(&self.grid, row, col);
        if region.len() < self.config.min_group_size {
            return Ok(false);
        }

        self.state = EngineState::Resolving;
        self.finish_cycle(|engine| {
            engine.clear_region(&region)?;
            engine.emit(&BoardEvent::RegionCleared {
                cells: region,
                color,
            });
            engine.settle()
        })?;
        Ok(true)
    }

    /// Lift the interaction lock held after a cycle
    ///
    /// Returns `true` if the engine was resolving.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has not been initialized
    pub fn release(&mut self) -> Result<bool> {
        match self.state {
            EngineState::Uninitialized => Err(BoardError::NotInitialized {
                operation: "release the interaction lock",
            }),
            EngineState::Resolving => {
                self.state = EngineState::Idle;
                Ok(true)
            }
            EngineState::Idle => Ok(false),
        }
    }

    /// Current board
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile factory
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Tile factory, for building prepared layouts before initialization
    pub const fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current interaction lock state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the last deadlock could not be shuffled away
    ///
    /// A stuck board has no legal move; callers may widen the color variety
    /// or enlarge the board.
    pub const fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Size of the same-color region each cell belongs to
    pub fn group_sizes(&mut self) -> Array2<usize> {
        self.checker.group_sizes(&self.grid)
    }

    /// One seed cell for every region that a selection would clear
    pub fn playable_cells(&mut self) -> Vec<CellPos> {
        self.checker
            .playable_cells(&self.grid, self.config.min_group_size)
    }

    /// Run a cycle body and release or hold the lock afterwards
    fn finish_cycle<B>(&mut self, body: B) -> Result<()>
    where
        B: FnOnce(&mut Self) -> Result<()>,
    {
        let outcome = body(self);
        if outcome.is_err() || !self.config.hold_until_released {
            self.state = EngineState::Idle;
        }
        outcome
    }

    fn check_dimensions(&self, grid: &Grid) -> Result<()> {
        if grid.dimensions() == (self.config.rows, self.config.columns) {
            return Ok(());
        }
        let (rows, columns) = grid.dimensions();
        Err(invalid_parameter(
            "grid",
            &format!("{rows}x{columns}"),
            &format!(
                "expected {}x{} to match the configuration",
                self.config.rows, self.config.columns
            ),
        ))
    }

    fn clear_region(&mut self, region: &[CellPos]) -> Result<()> {
        for &pos in region {
            if let Some(tile) = self.grid.take_tile(pos)? {
                self.factory.release_tile(tile);
            }
        }
        Ok(())
    }

    /// Refill the board, then shuffle if no move remains
    fn settle(&mut self) -> Result<()> {
        let moves = resolve_gravity(&mut self.grid, &mut self.factory)?;
        self.emit(&BoardEvent::GravityResolved { moves });

        if self
            .checker
            .has_any_move(&self.grid, self.config.min_group_size)
        {
            self.stuck = false;
            return Ok(());
        }

        let result = self.shuffler.shuffle(
            &mut self.grid,
            self.config.max_shuffle_attempts,
            self.config.min_group_size,
        )?;
        self.stuck = !result.success;

        if result.success {
            self.emit(&BoardEvent::Shuffled {
                moves: result.moves,
            });
        } else {
            self.emit(&BoardEvent::ShuffleFailed {
                attempts: result.attempts,
            });
        }
        Ok(())
    }

    fn emit(&mut self, event: &BoardEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
