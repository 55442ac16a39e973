//! Frame rendering module
//!
//! Builds a display list for each frame from the game state. Positions are
//! extrapolated by the accumulator's leftover fraction so motion stays smooth
//! between fixed steps. Rendering never mutates game state.

pub mod raster;
pub mod shapes;

use glam::IVec2;

pub use raster::{PixelBuffer, Rgba};
pub use shapes::{DrawCommand, TextAlign};

use crate::consts::SIM_DT;
use crate::settings::GridConfig;
use crate::sim::{EggKind, GamePhase, GameState, basket_cells};

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(0, 0, 0);
    pub const GRID: Rgba = Rgba::rgb(128, 128, 128);
    pub const BASKET: Rgba = Rgba::rgb(139, 69, 19);
    pub const GOOD_EGG: Rgba = Rgba::rgb(255, 255, 255);
    pub const BAD_EGG: Rgba = Rgba::rgb(128, 0, 32);
    pub const HUD: Rgba = Rgba::rgb(255, 255, 255);
    pub const TITLE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GAME_OVER: Rgba = Rgba::rgb(255, 0, 0);
}

const HUD_POS: IVec2 = IVec2::new(10, 20);
const HUD_TEXT_SIZE: u32 = 10;
const TITLE_TEXT_SIZE: u32 = 20;
const GAME_OVER_TEXT_SIZE: u32 = 24;

/// One complete frame for the render sink
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Rasterize the frame (text excluded)
    pub fn rasterize(&self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width, self.height, colors::BACKGROUND);
        buffer.draw(&self.commands);
        buffer
    }

    /// Text entries of the display list
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Builds frames for a fixed grid
#[derive(Debug, Clone)]
pub struct Renderer {
    grid: GridConfig,
    background: Vec<DrawCommand>,
}

impl Renderer {
    pub fn new(grid: GridConfig) -> Self {
        let size = IVec2::splat(grid.field_size as i32);
        let mut background = vec![shapes::rect(IVec2::ZERO, size, colors::BACKGROUND)];
        background.extend(shapes::grid_lines(&grid, colors::GRID));
        Self { grid, background }
    }

    /// Frame for the current phase
    pub fn draw(&self, state: &GameState, alpha: f32) -> Frame {
        match state.phase {
            GamePhase::NotStarted => self.draw_start_screen(),
            GamePhase::Running => self.draw_game(state, alpha),
            GamePhase::GameOver => self.draw_game_over(),
        }
    }

    fn frame(&self, commands: Vec<DrawCommand>) -> Frame {
        Frame {
            width: self.grid.field_size,
            height: self.grid.field_size,
            commands,
        }
    }

    fn center(&self) -> IVec2 {
        IVec2::splat(self.grid.field_size as i32 / 2)
    }

    pub fn draw_start_screen(&self) -> Frame {
        let mut commands = self.background.clone();
        commands.push(shapes::text(
            self.center(),
            "EGG CATCHER\n\nPress ENTER to Start",
            TITLE_TEXT_SIZE,
            colors::TITLE,
            TextAlign::Center,
        ));
        self.frame(commands)
    }

    pub fn draw_game_over(&self) -> Frame {
        let mut commands = self.background.clone();
        commands.push(shapes::text(
            self.center(),
            "GAME OVER\nPress R to Restart",
            GAME_OVER_TEXT_SIZE,
            colors::GAME_OVER,
            TextAlign::Center,
        ));
        self.frame(commands)
    }

    /// Running frame: basket, eggs and HUD, extrapolated by `alpha` steps
    pub fn draw_game(&self, state: &GameState, alpha: f32) -> Frame {
        let cell_size = self.grid.cell_size;
        let lead = alpha * SIM_DT;
        let mut commands = self.background.clone();

        let mut basket_pos = state.basket.pos;
        basket_pos.x += state.basket.vel * lead;
        for cell in basket_cells(basket_pos, &self.grid) {
            commands.push(shapes::cell(cell, cell_size, colors::BASKET));
        }

        let fall = state.fall_speed();
        let snap = |coord: f32| coord.round() as i32 * cell_size as i32;
        for egg in &state.eggs {
            let origin = IVec2::new(snap(egg.pos.x), snap(egg.pos.y + fall * lead));
            let color = match egg.kind {
                EggKind::Good => colors::GOOD_EGG,
                EggKind::Bad => colors::BAD_EGG,
            };
            commands.extend(shapes::egg_blob(origin, cell_size, color));
        }

        commands.push(shapes::text(
            HUD_POS,
            hud_text(state.score, state.lives),
            HUD_TEXT_SIZE,
            colors::HUD,
            TextAlign::Left,
        ));
        self.frame(commands)
    }
}

/// HUD line shown while running
pub fn hud_text(score: u32, lives: u8) -> String {
    format!("Score: {}  Lives: {}", score, lives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Egg;
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(GridConfig::new(20, 600).unwrap());
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_start_and_game_over_screens() {
        let renderer = Renderer::new(GridConfig::new(20, 600).unwrap());
        let mut state = running();
        state.phase = GamePhase::NotStarted;
        let frame = renderer.draw(&state, 0.0);
        assert!(frame.texts().any(|t| t.contains("Press ENTER to Start")));

        state.phase = GamePhase::GameOver;
        let frame = renderer.draw(&state, 0.0);
        assert!(frame.texts().any(|t| t.contains("Press R to Restart")));
    }

    #[test]
    fn test_game_frame_pixels() {
        let mut state = running();
        state.score = 3;
        state.lives = 4;
        state.eggs.push(Egg {
            pos: Vec2::new(5.0, 2.0),
            kind: EggKind::Bad,
        });
        let renderer = Renderer::new(state.grid);
        let frame = renderer.draw(&state, 0.0);
        assert!(frame.texts().any(|t| t == "Score: 3  Lives: 4"));

        let pixels = frame.rasterize();
        assert_eq!(pixels.width, 600);
        // Basket cell (15, 27) interior is brown
        assert_eq!(pixels.get(15 * 20 + 10, 27 * 20 + 10), Some(colors::BASKET));
        // Egg center is burgundy, its corner block is background
        assert_eq!(pixels.get(5 * 20 + 10, 2 * 20 + 10), Some(colors::BAD_EGG));
        assert_eq!(pixels.get(5 * 20 + 2, 2 * 20 + 2), Some(colors::BACKGROUND));
        // Grid line
        assert_eq!(pixels.get(0, 5), Some(colors::GRID));
    }

    #[test]
    fn test_eggs_extrapolate_with_alpha() {
        let mut state = running();
        // 0.49 rows above a snap boundary; one step of lead at 3 cells/s is 0.025
        state.eggs.push(Egg {
            pos: Vec2::new(5.0, 2.49),
            kind: EggKind::Good,
        });
        let renderer = Renderer::new(state.grid);
        let before = renderer.draw(&state, 0.0);
        let after = renderer.draw(&state, 0.9);
        assert_ne!(before, after);
        let pixels = after.rasterize();
        assert_eq!(pixels.get(5 * 20 + 10, 3 * 20 + 10), Some(colors::GOOD_EGG));
    }

    #[test]
    fn test_basket_extrapolates_with_velocity() {
        let mut state = running();
        state.basket.pos.x = 15.45;
        state.basket.vel = 12.0;
        let renderer = Renderer::new(state.grid);
        let pixels = renderer.draw(&state, 0.9).rasterize();
        // 15.45 + 12 * 0.9/120 = 15.54, rounds to 16: right edge cell is 18
        assert_eq!(pixels.get(18 * 20 + 10, 27 * 20 + 10), Some(colors::BASKET));
    }

    #[test]
    fn test_render_is_pure() {
        let mut state = running();
        state.eggs.push(Egg::at_column(10, EggKind::Good));
        let copy = state.clone();
        let _ = Renderer::new(state.grid).draw(&state, 0.5);
        assert_eq!(state, copy);
    }
}
