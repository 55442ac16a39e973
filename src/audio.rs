//! Sound cues
//!
//! The game only ever asks for two fire-and-forget cues. Playback itself is
//! the host's job; this module picks cues for events, applies volumes and
//! makes sure a failing sink never reaches gameplay.

use crate::consts::{CATCH_VOLUME, LOSE_VOLUME};
use crate::platform::AudioSink;
use crate::settings::Settings;
use crate::sim::{EggKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Good egg caught
    Catch,
    /// Bad egg caught or good egg missed
    Lose,
}

impl SoundEffect {
    /// Preset volume for this cue
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Catch => CATCH_VOLUME,
            SoundEffect::Lose => LOSE_VOLUME,
        }
    }

    /// Cue to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Caught {
                kind: EggKind::Good,
            } => Some(SoundEffect::Catch),
            GameEvent::Caught { kind: EggKind::Bad }
            | GameEvent::Missed {
                kind: EggKind::Good,
            } => Some(SoundEffect::Lose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Catch => "catch",
            SoundEffect::Lose => "lose",
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final volume a cue is played at
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * effect.base_volume()
        }
    }

    /// Play a sound effect. Failures are logged and dropped.
    pub fn play(&self, sink: &mut dyn AudioSink, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = sink.play(effect, vol) {
            log::warn!("Failed to play '{}' cue: {}", effect.as_str(), e);
        }
    }

    /// Play the cues for a batch of events, in order
    pub fn play_events(&self, sink: &mut dyn AudioSink, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(sink, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Unavailable);
            }
            self.played.push((effect, volume));
            Ok(())
        }
    }

    #[test]
    fn test_event_cues() {
        let good = EggKind::Good;
        let bad = EggKind::Bad;
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Caught { kind: good }),
            Some(SoundEffect::Catch)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Caught { kind: bad }),
            Some(SoundEffect::Lose)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Missed { kind: good }),
            Some(SoundEffect::Lose)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Missed { kind: bad }), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Spawned {
                column: 3,
                kind: good
            }),
            None
        );
    }

    #[test]
    fn test_preset_volumes() {
        let audio = AudioManager::new();
        let mut sink = Recorder::default();
        audio.play_events(
            &mut sink,
            &[
                GameEvent::Caught {
                    kind: EggKind::Good,
                },
                GameEvent::Missed {
                    kind: EggKind::Good,
                },
            ],
        );
        assert_eq!(
            sink.played,
            vec![(SoundEffect::Catch, 0.8), (SoundEffect::Lose, 0.9)]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        let mut sink = Recorder::default();
        audio.play(&mut sink, SoundEffect::Catch);
        assert!(sink.played.is_empty());
    }

    #[test]
    fn test_failures_are_swallowed() {
        let audio = AudioManager::new();
        let mut sink = Recorder {
            fail: true,
            ..Default::default()
        };
        audio.play(&mut sink, SoundEffect::Lose);
        assert!(sink.played.is_empty());
    }
}
