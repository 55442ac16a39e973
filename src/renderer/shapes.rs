//! Draw primitives for the grid, basket, eggs and HUD

use glam::IVec2;

use super::raster::Rgba;
use crate::settings::GridConfig;

/// Text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Baseline-left at the given point
    Left,
    /// Centered on the given point
    Center,
}

/// One entry of a frame's display list, in pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        pos: IVec2,
        size: IVec2,
        color: Rgba,
    },
    Line {
        from: IVec2,
        to: IVec2,
        color: Rgba,
    },
    Text {
        pos: IVec2,
        text: String,
        size: u32,
        color: Rgba,
        align: TextAlign,
    },
}

/// Filled rectangle
pub fn rect(pos: IVec2, size: IVec2, color: Rgba) -> DrawCommand {
    DrawCommand::FillRect { pos, size, color }
}

/// Solid fill of one grid cell
pub fn cell(cell: IVec2, cell_size: u32, color: Rgba) -> DrawCommand {
    let size = cell_size as i32;
    rect(cell * size, IVec2::splat(size), color)
}

/// Grid lines on every cell boundary, edges included
pub fn grid_lines(grid: &GridConfig, color: Rgba) -> Vec<DrawCommand> {
    let step = grid.cell_size as i32;
    let extent = grid.field_size as i32;
    let mut commands = Vec::with_capacity((grid.cols + grid.rows + 2) as usize);

    for i in 0..=grid.cols as i32 {
        commands.push(DrawCommand::Line {
            from: IVec2::new(i * step, 0),
            to: IVec2::new(i * step, extent),
            color,
        });
    }
    for j in 0..=grid.rows as i32 {
        commands.push(DrawCommand::Line {
            from: IVec2::new(0, j * step),
            to: IVec2::new(extent, j * step),
            color,
        });
    }
    commands
}

/// Side of the coarse blocks an egg is built from
pub fn egg_block_size(cell_size: u32) -> u32 {
    (cell_size / 5).max(1)
}

/// A retro egg: a slightly tall ellipse built from coarse square blocks,
/// drawn inside the cell whose top-left pixel is `origin`.
///
/// A block is kept when its center satisfies `dx²/a² + dy²/b² <= 1`, with
/// `a` half the cell and `b` 0.6 of it.
pub fn egg_blob(origin: IVec2, cell_size: u32, color: Rgba) -> Vec<DrawCommand> {
    let block = egg_block_size(cell_size);
    let center = cell_size as f32 / 2.0;
    let a = cell_size as f32 * 0.5;
    let b = cell_size as f32 * 0.6;
    let (a2, b2) = (a * a, b * b);
    let half = block as f32 / 2.0;

    let mut commands = Vec::new();
    for x in (0..cell_size).step_by(block as usize) {
        for y in (0..cell_size).step_by(block as usize) {
            let dx = x as f32 + half - center;
            let dy = y as f32 + half - center;
            if dx * dx / a2 + dy * dy / b2 <= 1.0 {
                commands.push(rect(
                    origin + IVec2::new(x as i32, y as i32),
                    IVec2::splat(block as i32),
                    color,
                ));
            }
        }
    }
    commands
}

pub fn text(
    pos: IVec2,
    text: impl Into<String>,
    size: u32,
    color: Rgba,
    align: TextAlign,
) -> DrawCommand {
    DrawCommand::Text {
        pos,
        text: text.into(),
        size,
        color,
        align,
    }
}
