//! Board constants and runtime configuration defaults

// Board limits
/// Maximum allowed grid dimension (rows or columns)
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Maximum number of distinct tile colors
pub const MAX_COLORS: usize = 6;

// Default values for configurable parameters
/// Default number of rows
pub const DEFAULT_ROWS: usize = 8;

/// Default number of columns
pub const DEFAULT_COLUMNS: usize = 8;

/// Default number of tile colors in play
pub const DEFAULT_COLORS: usize = 4;

/// Smallest region that may be cleared by a selection
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;

/// Redistribution attempts before a shuffle reports failure
pub const DEFAULT_SHUFFLE_ATTEMPTS: usize = 32;

/// Fixed seed for reproducible sessions
pub const DEFAULT_SEED: u64 = 42;

/// Default number of automatic selections per session
pub const DEFAULT_TURNS: usize = 200;

/// Default number of sessions per run
pub const DEFAULT_SESSIONS: usize = 1;

// Keeps the shuffle stream independent of the spawn color stream
/// Value mixed into the engine seed for the shuffler
pub const SHUFFLE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Value mixed into the session seed for the automatic player
pub const PLAYER_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Prefix of exported board image filenames
pub const OUTPUT_PREFIX: &str = "board_";

/// Edge length in pixels of one exported cell
pub const PNG_CELL_SIZE: u32 = 16;

/// RGBA swatch for each tile color (indexed by color)
pub const DEFAULT_PALETTE: [[u8; 4]; MAX_COLORS] = [
    [220, 60, 60, 255],
    [60, 140, 220, 255],
    [80, 190, 90, 255],
    [240, 200, 60, 255],
    [160, 90, 200, 255],
    [240, 140, 50, 255],
];
