//! Per-tick event collection handed to systems.

use eggstorm_core::enums::SoundCue;
use eggstorm_core::events::{AudioEvent, GameEvent, UiEvent};

use crate::session::Session;

/// Everything emitted during one tick, drained into the snapshot.
#[derive(Debug, Default)]
pub struct Outbox {
    pub audio: Vec<AudioEvent>,
    pub ui: Vec<UiEvent>,
    pub game: Vec<GameEvent>,
}

impl Outbox {
    pub fn play(&mut self, cue: SoundCue) {
        self.audio.push(AudioEvent::new(cue));
    }

    pub fn ui(&mut self, event: UiEvent) {
        self.ui.push(event);
    }

    pub fn game(&mut self, event: GameEvent) {
        self.game.push(event);
    }

    /// Notify the UI and log the end of a session.
    pub fn announce_game_over(&mut self, session: &Session) {
        tracing::info!(
            score = session.score(),
            wave = session.wave_number(),
            "game over"
        );
        self.ui(UiEvent::ShowGameOver { visible: true });
        self.game(GameEvent::GameOver {
            score: session.score(),
            wave: session.wave_number(),
        });
    }

    pub fn take(&mut self) -> Outbox {
        std::mem::take(self)
    }
}
