//! Idle/demo mode: a simple AI that steers the basket

use super::state::{EggKind, GameState};
use super::tick::TickInput;

/// How close (in columns) the basket must be before it stops steering
const DEADBAND: f32 = 0.3;
/// Bad eggs this many rows above the basket are worth dodging
const DANGER_ROWS: f32 = 4.0;
/// Half-width of the basket mouth in columns
const MOUTH_HALF_WIDTH: f32 = 2.5;

/// Steers toward the lowest good egg and sidesteps bad eggs about to land
#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Column the basket should head for
    pub fn target_column(&self, state: &GameState) -> f32 {
        let basket = state.basket.pos;

        // Most urgent good egg: the one lowest on screen that is still catchable
        let target = state
            .eggs
            .iter()
            .filter(|e| e.kind == EggKind::Good && e.pos.y < basket.y + 1.0)
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos.x)
            .unwrap_or(state.grid.cols as f32 / 2.0);

        // A bad egg about to land on that spot pushes the target aside
        let threat = state.eggs.iter().find(|e| {
            e.kind == EggKind::Bad
                && e.pos.y > basket.y - DANGER_ROWS
                && e.pos.y < basket.y + 1.0
                && (e.pos.x - target).abs() <= MOUTH_HALF_WIDTH
        });

        match threat {
            Some(bad) => {
                let away = if target >= bad.pos.x { 1.0 } else { -1.0 };
                let dodged = bad.pos.x + away * (MOUTH_HALF_WIDTH + 1.0);
                dodged.clamp(0.0, (state.grid.cols - 1) as f32)
            }
            None => target,
        }
    }

    /// Held keys for this tick
    pub fn decide(&self, state: &GameState) -> TickInput {
        let offset = self.target_column(state) - state.basket.pos.x;
        TickInput {
            move_left: offset < -DEADBAND,
            move_right: offset > DEADBAND,
        }
    }
}
