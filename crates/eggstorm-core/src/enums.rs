//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command.
    #[default]
    Idle,
    Active,
    /// Session ended. A new start resets everything.
    GameOver,
}

/// Consumable dropped by enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Grants score on contact.
    Experience,
    /// The rare drop. Activates the player power-up on contact.
    Powerup,
}

/// What an entity is, for contact resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Enemy,
    Projectile,
    Pickup(PickupKind),
}

/// Why an enemy was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    /// Rammed the player.
    PlayerContact,
    /// Struck by player fire.
    Projectile,
}

/// Named audio events. The engine decides when, never how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Collision,
    ScorePickup,
    Fire,
    Powerup,
    NextWave,
    ButtonClick,
}

impl SoundCue {
    /// One-shot playback volume for this cue.
    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Collision => VOLUME_COLLISION,
            SoundCue::ScorePickup => VOLUME_SCORE_PICKUP,
            SoundCue::Fire => VOLUME_FIRE,
            SoundCue::Powerup => VOLUME_POWERUP,
            SoundCue::NextWave => VOLUME_NEXT_WAVE,
            SoundCue::ButtonClick => VOLUME_BUTTON_CLICK,
        }
    }
}
