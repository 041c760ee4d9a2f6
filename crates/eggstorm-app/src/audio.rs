//! Audio output seam. The simulation only emits cues; a sink decides what
//! playing one means.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eggstorm_core::enums::SoundCue;
use eggstorm_core::events::AudioEvent;

/// Plays one-shot cues.
pub trait AudioSink: Send {
    fn play(&mut self, event: &AudioEvent);
}

/// Logs and counts cues by kind. Clones share the same tally.
#[derive(Debug, Clone, Default)]
pub struct CountingAudioSink {
    counts: Arc<Mutex<HashMap<SoundCue, u64>>>,
}

impl CountingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: SoundCue) -> u64 {
        self.counts
            .lock()
            .map(|counts| counts.get(&cue).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }
}

impl AudioSink for CountingAudioSink {
    fn play(&mut self, event: &AudioEvent) {
        if let Ok(mut counts) = self.counts.lock() {
            *counts.entry(event.cue).or_insert(0) += 1;
        }
        tracing::debug!(cue = ?event.cue, volume = event.volume, "play one-shot");
    }
}
