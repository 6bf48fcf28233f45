//! Sound cues.
//!
//! Playback is best effort: a failing sink (autoplay blocked, missing file)
//! is logged and otherwise ignored, and never holds up the spin.

use crate::error::WheelResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// Loops from trigger until the winner is revealed
    Spin,
    /// Plays once on reveal
    Win,
}

impl SoundCue {
    pub fn looping(&self) -> bool {
        matches!(self, SoundCue::Spin)
    }

    /// Default audio source for the cue
    pub fn source(&self) -> &'static str {
        match self {
            SoundCue::Spin => "https://www.soundjay.com/buttons/button-10.mp3",
            SoundCue::Win => "https://www.soundjay.com/misc/sounds/success-fanfare-trumpet-15.mp3",
        }
    }
}

/// Audio backend supplied by the host
pub trait AudioSink: Send + Sync {
    /// Start `cue` from the beginning, looping if [`SoundCue::looping`]
    fn play(&self, cue: SoundCue) -> WheelResult<()>;

    fn stop(&self, cue: SoundCue) -> WheelResult<()>;
}

/// Sink for hosts without sound
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&self, cue: SoundCue) -> WheelResult<()> {
        tracing::debug!(?cue, "Silent audio: play");
        Ok(())
    }

    fn stop(&self, cue: SoundCue) -> WheelResult<()> {
        tracing::debug!(?cue, "Silent audio: stop");
        Ok(())
    }
}

/// Play a cue, swallowing failures
pub fn play_best_effort(sink: &dyn AudioSink, cue: SoundCue) {
    if let Err(e) = sink.play(cue) {
        tracing::warn!(?cue, "Audio playback failed: {}", e);
    }
}

/// Stop a cue, swallowing failures
pub fn stop_best_effort(sink: &dyn AudioSink, cue: SoundCue) {
    if let Err(e) = sink.stop(cue) {
        tracing::warn!(?cue, "Stopping audio failed: {}", e);
    }
}
