//! PNG export of a board with one swatch per cell

use crate::io::error::{BoardError, Result};
use crate::spatial::grid::{CellPos, Grid};
use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Pixel dimensions (width, height) of an exported board
pub const fn image_dimensions(grid: &Grid, cell_size: u32) -> (u32, u32) {
    (
        grid.columns() as u32 * cell_size,
        grid.rows() as u32 * cell_size,
    )
}

/// Render the board into an RGBA buffer
///
/// Row 0 is drawn at the bottom of the image. Empty cells are transparent.
///
/// # Errors
///
/// Returns an error if a tile color has no palette entry or the grid has no
/// cells
pub fn render_grid(
    grid: &Grid,
    palette: &[[u8; 4]],
    cell_size: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if grid.is_empty() || cell_size == 0 {
        return Err(BoardError::InvalidParameter {
            parameter: "grid",
            value: format!("{}x{} @ {cell_size}px", grid.rows(), grid.columns()),
            reason: "nothing to render".to_string(),
        });
    }

    let (width, height) = image_dimensions(grid, cell_size);
    let mut img = ImageBuffer::new(width, height);
    let top_row = grid.rows() - 1;

    for pos in grid.positions() {
        let color = match grid.tile_at(pos) {
            Some(tile) => {
                let rgba =
                    palette
                        .get(tile.color.index())
                        .ok_or(BoardError::InvalidColor {
                            color: tile.color.index(),
                            palette_size: palette.len(),
                        })?;
                Rgba(*rgba)
            }
            None => Rgba([0, 0, 0, 0]),
        };

        paint_cell(&mut img, pos, top_row, cell_size, color);
    }

    Ok(img)
}

fn paint_cell(
    img: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    pos: CellPos,
    top_row: usize,
    cell_size: u32,
    color: Rgba<u8>,
) {
    let origin_x = pos.col as u32 * cell_size;
    let origin_y = (top_row - pos.row) as u32 * cell_size;

    for dy in 0..cell_size {
        for dx in 0..cell_size {
            if let Some(pixel) = img.get_pixel_mut_checked(origin_x + dx, origin_y + dy) {
                *pixel = color;
            }
        }
    }
}

/// Export the board as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - A tile color has no palette entry
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    palette: &[[u8; 4]],
    cell_size: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, palette, cell_size)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| BoardError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
