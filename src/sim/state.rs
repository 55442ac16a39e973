//! Game state and core simulation types
//!
//! Everything the renderer needs to draw a frame lives in [`GameState`].
//! Spawn timers are kept separately in the spawner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::GridConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for Confirm
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives exhausted, waiting for Restart
    GameOver,
}

/// Egg types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggKind {
    /// Catch for a point, miss for a life
    Good,
    /// Catching costs a point, missing is free
    Bad,
}

/// A falling egg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    /// x is a whole column, y a fractional row
    pub pos: Vec2,
    pub kind: EggKind,
}

impl Egg {
    /// A fresh egg at the top of the given column
    pub fn at_column(column: i32, kind: EggKind) -> Self {
        Self {
            pos: Vec2::new(column as f32, 0.0),
            kind,
        }
    }

    /// Integer column the egg occupies
    #[inline]
    pub fn column(&self) -> i32 {
        self.pos.x as i32
    }
}

/// The player's basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// x fractional column, y fixed row
    pub pos: Vec2,
    /// Horizontal velocity (cells/s)
    pub vel: f32,
    /// Velocity the basket is easing toward
    pub target_vel: f32,
}

impl Basket {
    /// Basket centered on the grid, three rows above the bottom edge
    pub fn centered(grid: &GridConfig) -> Self {
        Self {
            pos: Vec2::new(
                grid.cols as f32 / 2.0,
                (grid.rows - BASKET_ROWS_FROM_BOTTOM) as f32,
            ),
            vel: 0.0,
            target_vel: 0.0,
        }
    }

    /// Rightmost legal x
    #[inline]
    pub fn max_x(grid: &GridConfig) -> f32 {
        (grid.cols - 1) as f32
    }

    /// Ease velocity toward the target and integrate position
    pub fn step(&mut self, target_vel: f32, dt: f32, grid: &GridConfig) {
        self.target_vel = target_vel;
        let blend = 1.0 - (-BASKET_ACCEL * dt).exp();
        self.vel += (self.target_vel - self.vel) * blend;
        self.pos.x = (self.pos.x + self.vel * dt).clamp(0.0, Self::max_x(grid));
    }
}

/// Something that happened during a fixed step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session left the start screen
    Started,
    /// Session was reset from game over
    Restarted,
    /// New egg at the top of a lane
    Spawned { column: i32, kind: EggKind },
    /// Egg landed in the basket
    Caught { kind: EggKind },
    /// Egg fell past the bottom row
    Missed { kind: EggKind },
    /// Lives ran out
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Grid geometry (fixed for the session)
    pub grid: GridConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Score, never below zero
    pub score: u32,
    /// Player lives
    pub lives: u8,
    /// Simulated seconds since the session started
    pub elapsed: f32,
    /// Player basket
    pub basket: Basket,
    /// Falling eggs, in spawn order
    pub eggs: Vec<Egg>,
}

impl GameState {
    /// Create a new session on the start screen
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            phase: GamePhase::NotStarted,
            score: 0,
            lives: STARTING_LIVES,
            elapsed: 0.0,
            basket: Basket::centered(&grid),
            eggs: Vec::new(),
        }
    }

    /// Put everything back to its starting values; phase is left to the caller
    pub fn reset(&mut self) {
        let phase = self.phase;
        *self = Self::new(self.grid);
        self.phase = phase;
    }

    /// Shared fall speed for this score
    #[inline]
    pub fn fall_speed(&self) -> f32 {
        crate::fall_speed(self.score)
    }

    /// Lose a point, never dropping below zero
    #[inline]
    pub fn deduct_point(&mut self) {
        self.score = self.score.saturating_sub(1);
    }

    /// Whether any live egg sits in the given column
    pub fn column_has_egg(&self, column: i32) -> bool {
        self.eggs.iter().any(|e| e.column() == column)
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}
