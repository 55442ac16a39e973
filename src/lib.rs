//! Egg Catcher - A grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, spawning, physics, game state)
//! - `renderer`: Display-list generation and software rasterization
//! - `platform`: Host boundary (render, audio and input collaborators)
//! - `settings`: Startup configuration
//! - `game`: State machine driving the simulation from host ticks

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AudioError, ConfigError};
pub use game::Game;
pub use settings::{GridConfig, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Same step in f64, used by the accumulator
    pub const SIM_DT_F64: f64 = 1.0 / 120.0;

    /// Basket smoothing factor (1/s)
    pub const BASKET_ACCEL: f32 = 20.0;
    /// Basket top speed (cells/s)
    pub const BASKET_MAX_VEL: f32 = 12.0;
    /// Basket row, counted up from the bottom row
    pub const BASKET_ROWS_FROM_BOTTOM: u32 = 3;

    /// Egg fall speed: base + per point of score, capped
    pub const FALL_SPEED_BASE: f32 = 3.0;
    pub const FALL_SPEED_PER_POINT: f32 = 0.15;
    pub const FALL_SPEED_MAX: f32 = 25.0;

    pub const STARTING_LIVES: u8 = 5;

    /// Round-robin spawn: first interval, then re-rolled in [min, max)
    pub const FIRST_SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_INTERVAL_MIN: f32 = 2.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 3.0;

    /// Per-column retry delays: initial range, then re-rolled range
    pub const COLUMN_DELAY_INITIAL_MIN: f32 = 6.0;
    pub const COLUMN_DELAY_INITIAL_MAX: f32 = 8.0;
    pub const COLUMN_DELAY_MIN: f32 = 3.0;
    pub const COLUMN_DELAY_MAX: f32 = 5.0;

    /// Edge lane cooldown: max(floor, base - per_point * score)
    pub const EDGE_COOLDOWN_BASE: f32 = 4.0;
    pub const EDGE_COOLDOWN_PER_POINT: f32 = 0.03;
    pub const EDGE_COOLDOWN_MIN: f32 = 1.0;
    /// "Never spawned" sentinel for the edge timestamp
    pub const EDGE_SPAWN_NEVER: f32 = -100.0;

    /// Offsets of the drop lanes from the middle column
    pub const DROP_COLUMN_OFFSETS: [i32; 4] = [-10, -5, 5, 10];

    /// Basket cells grow by this much on every side for catch tests
    pub const CATCH_TOLERANCE: f32 = 0.1;

    /// Cue volumes (fraction of full scale)
    pub const CATCH_VOLUME: f32 = 0.8;
    pub const LOSE_VOLUME: f32 = 0.9;
}

/// Egg fall speed for a given score (cells/s)
#[inline]
pub fn fall_speed(score: u32) -> f32 {
    use consts::*;
    (FALL_SPEED_BASE + FALL_SPEED_PER_POINT * score as f32).min(FALL_SPEED_MAX)
}

/// Cooldown between two edge-lane spawns for a given score (seconds)
#[inline]
pub fn edge_cooldown(score: u32) -> f32 {
    use consts::*;
    (EDGE_COOLDOWN_BASE - EDGE_COOLDOWN_PER_POINT * score as f32).max(EDGE_COOLDOWN_MIN)
}
