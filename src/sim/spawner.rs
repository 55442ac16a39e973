//! Egg spawning
//!
//! Two schedules run side by side, both in fixed-step time:
//! - a round-robin timer that walks the drop lanes in order, with a
//!   score-scaled cooldown on the two edge lanes
//! - a per-lane retry timer that only runs while its lane is empty
//!
//! Nothing stops both schedules from firing on the same lane in quick
//! succession; the retry only checks occupancy once per step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Egg, EggKind, GameEvent, GameState};
use crate::consts::*;
use crate::edge_cooldown;
use crate::settings::GridConfig;

/// Sorted set of lanes eggs may drop into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropColumns {
    columns: Vec<i32>,
}

impl DropColumns {
    /// Build from arbitrary columns; they are sorted ascending
    pub fn new(mut columns: Vec<i32>) -> Self {
        columns.sort_unstable();
        Self { columns }
    }

    /// Standard lanes around the middle of the grid
    pub fn for_grid(grid: &GridConfig) -> Self {
        let mid = grid.mid_col();
        Self::new(DROP_COLUMN_OFFSETS.iter().map(|o| mid + o).collect())
    }

    fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.columns.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().copied()
    }

    /// First or last lane in sorted order
    pub fn is_edge(&self, column: i32) -> bool {
        self.columns.first() == Some(&column) || self.columns.last() == Some(&column)
    }
}

/// Good or bad with equal odds
pub fn random_kind(rng: &mut impl Rng) -> EggKind {
    if rng.random_bool(0.5) {
        EggKind::Good
    } else {
        EggKind::Bad
    }
}

/// Timers for one lane's retry schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTimer {
    pub elapsed: f32,
    pub delay: f32,
}

/// Both spawn schedules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub columns: DropColumns,
    /// Lane the round-robin visits next
    pub current_index: usize,
    /// Time since the last round-robin fire
    pub global_timer: f32,
    /// Time the round-robin waits before firing
    pub interval: f32,
    /// Simulated time of the last edge-lane spawn
    pub last_edge_spawn: f32,
    /// One retry timer per lane, same order as `columns`
    pub lanes: Vec<LaneTimer>,
}

impl Spawner {
    pub fn new(columns: DropColumns, rng: &mut impl Rng) -> Self {
        let lanes = columns.iter().map(|_| initial_lane(rng)).collect();
        Self {
            columns,
            current_index: 0,
            global_timer: 0.0,
            interval: FIRST_SPAWN_INTERVAL,
            last_edge_spawn: EDGE_SPAWN_NEVER,
            lanes,
        }
    }

    pub fn for_grid(grid: &GridConfig, rng: &mut impl Rng) -> Self {
        Self::new(DropColumns::for_grid(grid), rng)
    }

    /// Restart both schedules from scratch
    pub fn reset(&mut self, rng: &mut impl Rng) {
        let columns = std::mem::replace(&mut self.columns, DropColumns::new(Vec::new()));
        *self = Self::new(columns, rng);
    }

    /// Run both schedules for one fixed step. `state.elapsed` must already
    /// include this step.
    pub fn update(
        &mut self,
        state: &mut GameState,
        rng: &mut impl Rng,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        self.global_timer += dt;
        if self.global_timer >= self.interval {
            self.fire_round_robin(state, rng, events);
        }
        self.update_lanes(state, rng, dt, events);
    }

    /// Visit the current lane, spawning unless the edge cooldown blocks it.
    /// The index advances and the timer resets either way.
    pub fn fire_round_robin(
        &mut self,
        state: &mut GameState,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(column) = self.columns.get(self.current_index) {
            let is_edge = self.columns.is_edge(column);
            let cooling = state.elapsed - self.last_edge_spawn < edge_cooldown(state.score);

            if is_edge && cooling {
                log::debug!("Edge lane {} skipped (cooldown)", column);
            } else {
                spawn(state, column, random_kind(rng), events);
                if is_edge {
                    self.last_edge_spawn = state.elapsed;
                }
            }
            self.current_index = (self.current_index + 1) % self.columns.len();
        }

        self.global_timer = 0.0;
        self.interval = rng.random_range(SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX);
    }

    /// Tick every empty lane's retry timer and spawn where it runs out
    fn update_lanes(
        &mut self,
        state: &mut GameState,
        rng: &mut impl Rng,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        for (column, lane) in self.columns.iter().zip(self.lanes.iter_mut()) {
            if state.column_has_egg(column) {
                continue;
            }
            lane.elapsed += dt;
            if lane.elapsed >= lane.delay {
                spawn(state, column, random_kind(rng), events);
                lane.elapsed = 0.0;
                lane.delay = rng.random_range(COLUMN_DELAY_MIN..COLUMN_DELAY_MAX);
            }
        }
    }
}

fn initial_lane(rng: &mut impl Rng) -> LaneTimer {
    LaneTimer {
        elapsed: 0.0,
        delay: rng.random_range(COLUMN_DELAY_INITIAL_MIN..COLUMN_DELAY_INITIAL_MAX),
    }
}

fn spawn(state: &mut GameState, column: i32, kind: EggKind, events: &mut Vec<GameEvent>) {
    log::debug!("Spawn {:?} egg in column {}", kind, column);
    state.eggs.push(Egg::at_column(column, kind));
    events.push(GameEvent::Spawned { column, kind });
}
