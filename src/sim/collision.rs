//! Basket footprint and egg overlap tests
//!
//! The basket is a blocky 5-3-1 funnel of grid cells. Each cell is tested as
//! a slightly enlarged axis-aligned box so eggs clipping a corner still count.

use glam::{IVec2, Vec2};

use super::state::Egg;
use crate::consts::CATCH_TOLERANCE;
use crate::settings::GridConfig;

/// Basket cell offsets from the rounded basket position
///
/// ```text
/// row 0:  X X X X X
/// row 1:    X X X
/// row 2:      X
/// ```
pub const BASKET_PATTERN: [IVec2; 9] = [
    IVec2::new(-2, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(2, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
    IVec2::new(0, 2),
];

/// Axis-aligned box in grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl CellBox {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// The 1x1 box an egg occupies
    pub fn for_egg(egg: &Egg) -> Self {
        Self::new(egg.pos, Vec2::ONE)
    }

    /// A grid cell grown by the catch tolerance on every side
    pub fn for_basket_cell(cell: IVec2) -> Self {
        let origin = cell.as_vec2() - Vec2::splat(CATCH_TOLERANCE);
        Self::new(origin, Vec2::splat(1.0 + 2.0 * CATCH_TOLERANCE))
    }

    /// Overlap with non-zero area; touching edges do not count
    pub fn intersects(&self, other: &CellBox) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Grid cells covered by a basket at `pos`, clamped into the grid
pub fn basket_cells(pos: Vec2, grid: &GridConfig) -> [IVec2; 9] {
    let origin = IVec2::new(pos.x.round() as i32, pos.y.round() as i32);
    let max = IVec2::new(grid.cols as i32 - 1, grid.rows as i32 - 1);
    BASKET_PATTERN.map(|offset| (origin + offset).clamp(IVec2::ZERO, max))
}

/// Catch boxes for a basket at `pos`
pub fn basket_boxes(pos: Vec2, grid: &GridConfig) -> [CellBox; 9] {
    basket_cells(pos, grid).map(CellBox::for_basket_cell)
}

/// Whether an egg overlaps any basket box
pub fn egg_hits_basket(egg: &Egg, boxes: &[CellBox]) -> bool {
    let egg_box = CellBox::for_egg(egg);
    boxes.iter().any(|b| egg_box.intersects(b))
}
