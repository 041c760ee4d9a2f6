//! Session/wave controller: game-active flag, wave number, spawn timing,
//! per-wave quota, score, difficulty scaling and the game-over transition.
//!
//! Pure state. The wave spawner system turns its decisions into entities.

use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::GamePhase;

use crate::player::PlayerState;

/// Session counters and difficulty multipliers.
#[derive(Debug, Clone)]
pub struct Session {
    phase: GamePhase,
    wave_number: u32,
    score: u32,
    enemies_spawned_this_wave: u32,
    enemies_per_wave: u32,
    spawn_timer: f32,
    spawn_interval: f32,
    enemy_speed: f32,
    player_speed: f32,
    enemy_base_speed: f32,
    player_base_speed: f32,
    enemy_speed_growth: f32,
    player_speed_growth: f32,
}

/// Result of a wave-clear check that advanced the wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveAdvance {
    /// The wave that just began.
    pub wave_number: u32,
    /// Enemies to spawn immediately, outside the trickle quota.
    pub batch: u32,
}

/// Outcome of [`Session::register_player_hit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Session not active; nothing counted.
    Ignored,
    Hit { hits: u32 },
    /// This hit reached the limit and ended the session.
    GameOver { hits: u32 },
}

impl Session {
    /// A new, inactive session.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            wave_number: 1,
            score: 0,
            enemies_spawned_this_wave: 0,
            enemies_per_wave: config.enemies_per_wave,
            spawn_timer: 0.0,
            spawn_interval: config.spawn_interval_secs,
            enemy_speed: config.enemy_base_speed,
            player_speed: config.player_base_speed,
            enemy_base_speed: config.enemy_base_speed,
            player_base_speed: config.player_base_speed,
            enemy_speed_growth: config.enemy_speed_growth,
            player_speed_growth: config.player_speed_growth,
        }
    }

    /// Reset counters and activate. Rejected while already active.
    ///
    /// Returns the size of the wave 1 batch, or `None` if rejected.
    pub fn start(&mut self) -> Option<u32> {
        if self.phase == GamePhase::Active {
            return None;
        }
        self.phase = GamePhase::Active;
        self.score = 0;
        self.wave_number = 1;
        self.enemies_spawned_this_wave = 0;
        self.spawn_timer = 0.0;
        self.enemy_speed = self.enemy_base_speed;
        self.player_speed = self.player_base_speed;
        Some(self.enemies_per_wave)
    }

    /// Accumulate `dt` into the spawn timer. Returns true when one trickle
    /// enemy is due; the timer is then zeroed and any overshoot discarded.
    pub fn advance_spawn_timer(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval
            && self.enemies_spawned_this_wave < self.enemies_per_wave
        {
            self.enemies_spawned_this_wave += 1;
            self.spawn_timer = 0.0;
            return true;
        }
        false
    }

    /// Advance the wave when the quota is spent and no enemy is alive.
    pub fn check_wave_clear(&mut self, live_enemies: usize) -> Option<WaveAdvance> {
        if !self.is_active()
            || live_enemies != 0
            || self.enemies_spawned_this_wave != self.enemies_per_wave
        {
            return None;
        }
        self.wave_number += 1;
        self.enemies_spawned_this_wave = 0;
        self.enemy_speed *= self.enemy_speed_growth;
        self.player_speed *= self.player_speed_growth;
        Some(WaveAdvance {
            wave_number: self.wave_number,
            batch: self.enemies_per_wave,
        })
    }

    /// Add points. Returns the new score, or `None` when inactive.
    pub fn register_score(&mut self, points: u32) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        self.score = self.score.saturating_add(points);
        Some(self.score)
    }

    /// Count a hit against the player, ending the session at the limit.
    pub fn register_player_hit(&mut self, player: &mut PlayerState) -> HitOutcome {
        if !self.is_active() {
            return HitOutcome::Ignored;
        }
        player.hit_count = (player.hit_count + 1).min(player.hit_limit);
        let hits = player.hit_count;
        if hits >= player.hit_limit && self.game_over() {
            return HitOutcome::GameOver { hits };
        }
        HitOutcome::Hit { hits }
    }

    /// Deactivate. Returns true only on the Active -> GameOver transition.
    pub fn game_over(&mut self) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        self.phase = GamePhase::GameOver;
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn enemies_spawned_this_wave(&self) -> u32 {
        self.enemies_spawned_this_wave
    }

    pub fn enemies_per_wave(&self) -> u32 {
        self.enemies_per_wave
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Speed given to enemies spawned now.
    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }

    /// Current player movement speed.
    pub fn player_speed(&self) -> f32 {
        self.player_speed
    }
}
