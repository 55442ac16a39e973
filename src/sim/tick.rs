//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly `dt`: spawn, move the basket,
//! drop the eggs, then resolve misses and catches.

use rand::Rng;

use super::collision::{basket_boxes, egg_hits_basket};
use super::spawner::Spawner;
use super::state::{EggKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Held movement keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

impl TickInput {
    /// Basket target velocity; opposing keys cancel out
    pub fn target_velocity(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -BASKET_MAX_VEL,
            (false, true) => BASKET_MAX_VEL,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    spawner: &mut Spawner,
    input: &TickInput,
    rng: &mut impl Rng,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.elapsed += dt;
    spawner.update(state, rng, dt, events);
    step_physics(state, input, dt, events);
}

/// Move the basket and eggs, then resolve every egg against the bottom row
/// and the basket. Misses are checked first so an egg past the bottom is
/// never also caught.
pub fn step_physics(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let grid = state.grid;

    state.basket.step(input.target_velocity(), dt, &grid);

    let speed = state.fall_speed();
    for egg in &mut state.eggs {
        egg.pos.y += speed * dt;
    }

    let boxes = basket_boxes(state.basket.pos, &grid);
    let bottom = (grid.rows - 1) as f32;
    let eggs = std::mem::take(&mut state.eggs);

    for egg in eggs {
        if egg.pos.y >= bottom {
            if egg.kind == EggKind::Good {
                state.deduct_point();
                state.lives = state.lives.saturating_sub(1);
                log::debug!("Missed good egg, lives left: {}", state.lives);
            }
            events.push(GameEvent::Missed { kind: egg.kind });
            continue;
        }

        if egg_hits_basket(&egg, &boxes) {
            match egg.kind {
                EggKind::Good => state.score += 1,
                EggKind::Bad => state.deduct_point(),
            }
            log::debug!("Caught {:?} egg, score: {}", egg.kind, state.score);
            events.push(GameEvent::Caught { kind: egg.kind });
            continue;
        }

        state.eggs.push(egg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GridConfig;
    use crate::sim::state::Egg;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> GameState {
        let mut state = GameState::new(GridConfig::new(20, 600).unwrap());
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_good_egg_falls_into_basket() {
        let mut state = running_state();
        let mid = state.grid.cols as i32 / 2;
        state.eggs.push(Egg::at_column(mid, EggKind::Good));
        assert_eq!(state.fall_speed(), 3.0);

        let mut events = Vec::new();
        // 27 rows at 3 cells/s is 9 seconds; give it ten
        for _ in 0..1200 {
            step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
            if state.eggs.is_empty() {
                break;
            }
        }

        assert_eq!(state.score, 1);
        assert_eq!(state.lives, 5);
        assert!(state.eggs.is_empty());
        assert_eq!(events, vec![GameEvent::Caught { kind: EggKind::Good }]);
    }

    #[test]
    fn test_bad_egg_caught_costs_point_not_life() {
        let mut state = running_state();
        state.score = 3;
        state.eggs.push(Egg {
            pos: Vec2::new(15.0, 26.5),
            kind: EggKind::Bad,
        });
        let mut events = Vec::new();
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.score, 2);
        assert_eq!(state.lives, 5);
        assert!(state.eggs.is_empty());

        // Floored at zero
        state.score = 0;
        state.eggs.push(Egg {
            pos: Vec2::new(15.0, 26.5),
            kind: EggKind::Bad,
        });
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_missed_good_egg_costs_life_and_point() {
        let mut state = running_state();
        state.score = 2;
        state.eggs.push(Egg {
            pos: Vec2::new(2.0, 28.99),
            kind: EggKind::Good,
        });
        let mut events = Vec::new();
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, 4);
        assert!(state.eggs.is_empty());
        assert_eq!(events, vec![GameEvent::Missed { kind: EggKind::Good }]);
    }

    #[test]
    fn test_missed_bad_egg_is_free() {
        let mut state = running_state();
        state.score = 2;
        state.eggs.push(Egg {
            pos: Vec2::new(2.0, 29.5),
            kind: EggKind::Bad,
        });
        let mut events = Vec::new();
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.score, 2);
        assert_eq!(state.lives, 5);
        assert!(state.eggs.is_empty());
    }

    #[test]
    fn test_miss_wins_over_catch() {
        // Basket sits on the last rows so the bottom egg overlaps it too
        let mut state = running_state();
        state.eggs.push(Egg {
            pos: Vec2::new(15.0, 29.0),
            kind: EggKind::Good,
        });
        let mut events = Vec::new();
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_uncaught_egg_keeps_falling() {
        let mut state = running_state();
        state.eggs.push(Egg::at_column(5, EggKind::Good));
        let mut events = Vec::new();
        step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);
        assert_eq!(state.eggs.len(), 1);
        assert!((state.eggs[0].pos.y - 3.0 * SIM_DT).abs() < 1e-6);
        assert!(events.is_empty());
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let both = TickInput {
            move_left: true,
            move_right: true,
        };
        assert_eq!(both.target_velocity(), 0.0);
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        assert_eq!(left.target_velocity(), -BASKET_MAX_VEL);
    }

    #[test]
    fn test_tick_skips_when_not_running() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(GridConfig::new(20, 600).unwrap());
        let mut spawner = Spawner::for_grid(&state.grid, &mut rng);
        let mut events = Vec::new();
        for _ in 0..1000 {
            tick(&mut state, &mut spawner, &TickInput::default(), &mut rng, SIM_DT, &mut events);
        }
        assert_eq!(state.elapsed, 0.0);
        assert!(state.eggs.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs end up identical
        let run = || {
            let mut rng = Pcg32::seed_from_u64(99999);
            let mut state = running_state();
            let mut spawner = Spawner::for_grid(&state.grid, &mut rng);
            let mut events = Vec::new();
            for i in 0..6000 {
                let input = TickInput {
                    move_left: (i / 200) % 3 == 0,
                    move_right: (i / 200) % 3 == 1,
                };
                tick(&mut state, &mut spawner, &input, &mut rng, SIM_DT, &mut events);
            }
            (state, events)
        };
        let (s1, e1) = run();
        let (s2, e2) = run();
        assert_eq!(s1, s2);
        assert_eq!(e1, e2);
        assert!(e1.iter().any(|e| matches!(e, GameEvent::Spawned { .. })));
    }

    fn arb_egg() -> impl Strategy<Value = Egg> {
        (0i32..30, 0.0f32..30.0, any::<bool>()).prop_map(|(x, y, good)| Egg {
            pos: Vec2::new(x as f32, y),
            kind: if good { EggKind::Good } else { EggKind::Bad },
        })
    }

    proptest! {
        #[test]
        fn prop_basket_stays_in_bounds(
            keys in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.5), 1..300),
        ) {
            let mut state = running_state();
            let mut events = Vec::new();
            for (move_left, move_right, dt) in keys {
                let input = TickInput { move_left, move_right };
                step_physics(&mut state, &input, dt, &mut events);
                prop_assert!(state.basket.pos.x >= 0.0);
                prop_assert!(state.basket.pos.x <= 29.0);
            }
        }

        #[test]
        fn prop_score_and_lives_rules(
            batches in prop::collection::vec(prop::collection::vec(arb_egg(), 0..6), 1..40),
            start_score in 0u32..3,
        ) {
            let mut state = running_state();
            state.score = start_score;
            let mut events = Vec::new();
            for batch in batches {
                state.eggs.extend(batch);
                let lives_before = state.lives;
                events.clear();
                step_physics(&mut state, &TickInput::default(), SIM_DT, &mut events);

                let good_misses = events
                    .iter()
                    .filter(|e| **e == GameEvent::Missed { kind: EggKind::Good })
                    .count() as u8;
                prop_assert_eq!(state.lives, lives_before.saturating_sub(good_misses));
                // Nothing left at or past the bottom row
                prop_assert!(state.eggs.iter().all(|e| e.pos.y < 29.0));
            }
        }
    }
}
