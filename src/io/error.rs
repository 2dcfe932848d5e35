//! Error types for board operations, configuration and export

use crate::spatial::grid::CellPos;
use crate::spatial::tiles::TileId;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all board operations
#[derive(Debug)]
pub enum BoardError {
    /// A write targeted a coordinate outside the grid
    ///
    /// Reads never produce this error; they return `None` instead.
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid dimensions (rows, columns)
        dimensions: (usize, usize),
    },

    /// A gameplay operation was invoked before the board was initialized
    NotInitialized {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Board initialization was requested a second time
    AlreadyInitialized,

    /// A tile handed out as new is already placed on the board
    ///
    /// Raised when a factory reuses a live handle or a prepared layout was
    /// built by a different factory than the one refilling it.
    DuplicateTile {
        /// The repeated tile id
        id: TileId,
        /// Cell the tile already occupies
        at: CellPos,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile color has no entry in the export palette
    InvalidColor {
        /// The offending color index
        color: usize,
        /// Number of palette entries available
        palette_size: usize,
    },

    /// Failed to save an exported board image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({row}, {col}) is outside the {}x{} grid",
                    dimensions.0, dimensions.1
                )
            }
            Self::NotInitialized { operation } => {
                write!(
                    f,
                    "Cannot {operation}: the board has not been initialized"
                )
            }
            Self::AlreadyInitialized => write!(f, "The board has already been initialized"),
            Self::DuplicateTile { id, at } => {
                write!(f, "Tile {} is already placed at {at}", id.0)
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidColor {
                color,
                palette_size,
            } => {
                write!(
                    f,
                    "Tile color {color} has no palette entry (palette size: {palette_size})"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a grid of the given dimensions
pub const fn out_of_bounds(row: usize, col: usize, dimensions: (usize, usize)) -> BoardError {
    BoardError::OutOfBounds {
        row,
        col,
        dimensions,
    }
}
