//! Platform abstraction layer
//!
//! The game core talks to its host through three narrow boundaries:
//! - render: receives one complete frame per host tick
//! - audio: receives fire-and-forget cues
//! - input: hands over key events since the last tick
//!
//! Window, widgets and sound-file loading belong to the host.

use std::collections::VecDeque;

use crate::audio::SoundEffect;
use crate::error::AudioError;
use crate::input::KeyEvent;
use crate::renderer::Frame;

/// Accepts finished frames
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Plays cues without blocking
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Source of key events, with auto-repeat already filtered or flagged
pub trait InputSource {
    /// Append every event received since the last poll
    fn poll(&mut self, out: &mut Vec<KeyEvent>);
}

/// Queue of pending events, drained on every poll
impl InputSource for VecDeque<KeyEvent> {
    fn poll(&mut self, out: &mut Vec<KeyEvent>) {
        out.extend(self.drain(..));
    }
}

/// Audio sink that logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("cue '{}' at volume {:.2}", effect.as_str(), volume);
        Ok(())
    }
}

/// Render sink that keeps the most recent frame
#[derive(Debug, Default)]
pub struct FrameCapture {
    pub last: Option<Frame>,
    pub presented: u64,
}

impl RenderSink for FrameCapture {
    fn present(&mut self, frame: &Frame) {
        self.last = Some(frame.clone());
        self.presented += 1;
    }
}
