//! Game state machine and host tick driver
//!
//! `NotStarted -> Running -> GameOver -> Running`. The host calls
//! [`Game::run_tick`] periodically; physics only runs while `Running`, in
//! fixed steps fed by the accumulator.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::consts::SIM_DT;
use crate::error::ConfigError;
use crate::input::{InputLatch, Key, KeyEvent};
use crate::platform::{AudioSink, InputSource, RenderSink};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{
    Accumulator, Autopilot, FrameClock, GameEvent, GamePhase, GameState, Spawner, tick,
};

/// Game instance holding all session state
pub struct Game<R = Pcg32> {
    state: GameState,
    spawner: Spawner,
    rng: R,
    clock: FrameClock,
    accumulator: Accumulator,
    latch: InputLatch,
    autopilot: Option<Autopilot>,
    renderer: Renderer,
    audio: AudioManager,
    /// Events produced since the start of the current host tick
    events: Vec<GameEvent>,
    key_buffer: Vec<KeyEvent>,
}

impl Game<Pcg32> {
    /// New session seeded from the settings (or the wall clock)
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let seed = settings.resolve_seed();
        let game = Self::with_rng(settings, Pcg32::seed_from_u64(seed))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(game)
    }
}

impl<R: Rng> Game<R> {
    /// New session drawing all randomness from `rng`
    pub fn with_rng(settings: &Settings, mut rng: R) -> Result<Self, ConfigError> {
        let grid = settings.grid()?;
        let spawner = Spawner::for_grid(&grid, &mut rng);
        Ok(Self {
            state: GameState::new(grid),
            spawner,
            rng,
            clock: FrameClock::new(),
            accumulator: Accumulator::new(settings.max_steps_per_tick),
            latch: InputLatch::new(),
            autopilot: None,
            renderer: Renderer::new(grid),
            audio: AudioManager::from_settings(settings),
            events: Vec::new(),
            key_buffer: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Events produced during the most recent host tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events produced so far
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Let the demo AI drive the basket instead of held keys
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled.then(Autopilot::new);
        log::info!("Autopilot: {}", enabled);
    }

    /// Interpolation fraction left over from the last advance
    pub fn alpha(&self) -> f32 {
        self.accumulator.alpha()
    }

    /// React to one key transition
    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.repeat {
            return;
        }

        if event.pressed {
            match (event.key, self.state.phase) {
                (Key::Restart, GamePhase::GameOver) => {
                    self.restart();
                    return;
                }
                (Key::Confirm, GamePhase::NotStarted) => {
                    self.start();
                    return;
                }
                _ => {}
            }
        }

        if self.state.phase == GamePhase::Running {
            self.latch.apply(&event);
        }
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::NotStarted {
            return;
        }
        self.state.phase = GamePhase::Running;
        self.clock.restart();
        self.accumulator.reset();
        self.events.push(GameEvent::Started);
        log::info!("Game started");
    }

    /// Fresh session after game over; the RNG stream carries on
    pub fn restart(&mut self) {
        if self.state.phase != GamePhase::GameOver {
            return;
        }
        self.state.phase = GamePhase::Running;
        self.state.reset();
        self.spawner.reset(&mut self.rng);
        self.latch.clear();
        self.clock.restart();
        self.accumulator.reset();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// Feed a frame delta through the accumulator and run the fixed steps
    /// that fall due. Game over is checked once, after all steps.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if self.state.phase != GamePhase::Running {
            return 0;
        }

        let steps = self.accumulator.advance(dt);
        for _ in 0..steps {
            let input = match &self.autopilot {
                Some(pilot) => pilot.decide(&self.state),
                None => self.latch.tick_input(),
            };
            tick(
                &mut self.state,
                &mut self.spawner,
                &input,
                &mut self.rng,
                SIM_DT,
                &mut self.events,
            );
        }

        if self.state.is_out_of_lives() {
            self.state.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
            });
            log::info!(
                "Game over: score {} after {:.1}s",
                self.state.score,
                self.state.elapsed
            );
        }

        steps
    }

    /// Frame for the current state
    pub fn render(&self) -> Frame {
        self.renderer.draw(&self.state, self.alpha())
    }

    /// One host tick: input, simulation, cues, then a frame.
    /// `now` is the host clock in seconds.
    pub fn run_tick(
        &mut self,
        now: f64,
        input: &mut dyn InputSource,
        render: &mut dyn RenderSink,
        audio: &mut dyn AudioSink,
    ) {
        self.events.clear();

        let mut keys = std::mem::take(&mut self.key_buffer);
        input.poll(&mut keys);
        for event in keys.drain(..) {
            self.handle_key(event);
        }
        self.key_buffer = keys;

        let dt = self.clock.delta(now);
        self.advance(dt);

        self.audio.play_events(audio, &self.events);
        render.present(&self.render());
    }
}
