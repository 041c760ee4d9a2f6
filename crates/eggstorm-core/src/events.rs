//! Events emitted by the simulation for audio, UI and gameplay feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// "Play clip once at volume."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub cue: SoundCue,
    pub volume: f32,
}

impl AudioEvent {
    pub fn new(cue: SoundCue) -> Self {
        Self {
            cue,
            volume: cue.volume(),
        }
    }
}

/// Commands for the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    ScoreChanged { score: u32 },
    ShowGameOver { visible: bool },
    ShowStartScreen { visible: bool },
    ShowPowerupIndicator { visible: bool },
}

/// Gameplay events for logging and frontends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemyDestroyed {
        cause: DestroyCause,
        drop: PickupKind,
    },
    PickupCollected {
        kind: PickupKind,
    },
    PlayerHit {
        hits: u32,
        limit: u32,
    },
    PowerupActivated,
    PowerupExpired,
    /// The previous wave was cleared; `next_wave` has begun.
    WaveCleared {
        next_wave: u32,
    },
    GameOver {
        score: u32,
        wave: u32,
    },
}
