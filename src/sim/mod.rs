//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Eggs resolved in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use clock::{Accumulator, FrameClock};
pub use collision::{BASKET_PATTERN, CellBox, basket_boxes, basket_cells, egg_hits_basket};
pub use spawner::{DropColumns, LaneTimer, Spawner};
pub use state::{Basket, Egg, EggKind, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, step_physics, tick};
