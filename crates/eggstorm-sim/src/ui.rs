//! UI glue: the start button and the HUD text model.

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::enums::SoundCue;
use eggstorm_core::events::{AudioEvent, UiEvent};

/// The play button. Usable once; hides itself after the first press.
#[derive(Debug, Clone)]
pub struct StartButton {
    enabled: bool,
}

impl Default for StartButton {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl StartButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Press the button. Returns the start command and click cue on the
    /// first press, `None` afterwards.
    pub fn press(&mut self) -> Option<(PlayerCommand, AudioEvent)> {
        if !self.enabled {
            tracing::debug!("start button pressed while hidden");
            return None;
        }
        self.enabled = false;
        tracing::info!("play button clicked");
        Some((PlayerCommand::StartGame, AudioEvent::new(SoundCue::ButtonClick)))
    }

    /// Show the button again, e.g. after game over.
    pub fn enable(&mut self) {
        self.enabled = true;
    }
}

/// What the HUD currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score_text: String,
    pub game_over_visible: bool,
    pub start_screen_visible: bool,
    pub powerup_indicator_visible: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score_text: score_text(0),
            game_over_visible: false,
            start_screen_visible: true,
            powerup_indicator_visible: false,
        }
    }
}

impl Hud {
    pub fn apply(&mut self, event: &UiEvent) {
        match *event {
            UiEvent::ScoreChanged { score } => self.score_text = score_text(score),
            UiEvent::ShowGameOver { visible } => self.game_over_visible = visible,
            UiEvent::ShowStartScreen { visible } => self.start_screen_visible = visible,
            UiEvent::ShowPowerupIndicator { visible } => self.powerup_indicator_visible = visible,
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a UiEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}

fn score_text(score: u32) -> String {
    format!("Score: {score}")
}
