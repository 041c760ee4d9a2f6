//! Game state snapshot: the complete visible state sent to the frontend each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent, UiEvent};
use crate::types::{SimTime, Transform};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub session: SessionView,
    pub player: PlayerView,
    pub enemies: Vec<Transform>,
    pub projectiles: Vec<Transform>,
    pub pickups: Vec<PickupView>,
    pub audio_events: Vec<AudioEvent>,
    pub ui_events: Vec<UiEvent>,
    pub game_events: Vec<GameEvent>,
}

/// Session counters for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub wave_number: u32,
    pub score: u32,
    pub enemies_spawned_this_wave: u32,
    pub enemies_per_wave: u32,
    pub enemy_speed: f32,
    pub player_speed: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub transform: Transform,
    pub hit_count: u32,
    pub hit_limit: u32,
    pub has_powerup: bool,
    pub projectile_cooldown: f32,
    pub indicator_position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub transform: Transform,
}
