//! Runtime tuning, loadable from JSON.
//!
//! Missing fields fall back to the defaults in [`crate::constants`].

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// All tunable gameplay values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub enemies_per_wave: u32,
    pub spawn_interval_secs: f32,
    pub spawn_distance: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_growth: f32,
    pub player_base_speed: f32,
    pub player_speed_growth: f32,
    pub player_rotation_speed: f32,
    pub player_hit_limit: u32,
    pub projectile_speed: f32,
    pub projectile_cooldown_secs: f32,
    pub powerup_fire_rate_divisor: f32,
    pub powerup_duration_secs: f32,
    pub powerup_indicator_height: f32,
    /// When true, re-activating a power-up restarts its window and the
    /// earlier pending expiry is ignored. When false, every activation's
    /// expiry fires at its own due time.
    pub cancel_stale_powerup_expiry: bool,
    pub prune_distance: f32,
    pub viewpoint: Vec3,
    pub rare_drop_rate: f32,
    pub score_enemy_kill: u32,
    pub score_experience: u32,
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub projectile_radius: f32,
    pub pickup_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemies_per_wave: ENEMIES_PER_WAVE,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            spawn_distance: SPAWN_DISTANCE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_growth: ENEMY_SPEED_GROWTH,
            player_base_speed: PLAYER_BASE_SPEED,
            player_speed_growth: PLAYER_SPEED_GROWTH,
            player_rotation_speed: PLAYER_ROTATION_SPEED,
            player_hit_limit: PLAYER_HIT_LIMIT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_cooldown_secs: PROJECTILE_COOLDOWN_SECS,
            powerup_fire_rate_divisor: POWERUP_FIRE_RATE_DIVISOR,
            powerup_duration_secs: POWERUP_DURATION_SECS,
            powerup_indicator_height: POWERUP_INDICATOR_HEIGHT,
            cancel_stale_powerup_expiry: true,
            prune_distance: PRUNE_DISTANCE,
            viewpoint: Vec3::from_array(VIEWPOINT),
            rare_drop_rate: RARE_DROP_RATE,
            score_enemy_kill: SCORE_ENEMY_KILL,
            score_experience: SCORE_EXPERIENCE,
            player_radius: PLAYER_RADIUS,
            enemy_radius: ENEMY_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            pickup_radius: PICKUP_RADIUS,
        }
    }
}

/// Failure to load or validate a [`GameConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read config {path}: {message}"),
            Self::Parse(message) => write!(f, "failed to parse config: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Check the ranges the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn_interval_secs", self.spawn_interval_secs)?;
        positive("spawn_distance", self.spawn_distance)?;
        positive("enemy_base_speed", self.enemy_base_speed)?;
        positive("enemy_speed_growth", self.enemy_speed_growth)?;
        positive("player_base_speed", self.player_base_speed)?;
        positive("player_speed_growth", self.player_speed_growth)?;
        positive("player_rotation_speed", self.player_rotation_speed)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_cooldown_secs", self.projectile_cooldown_secs)?;
        positive("powerup_fire_rate_divisor", self.powerup_fire_rate_divisor)?;
        positive("powerup_duration_secs", self.powerup_duration_secs)?;
        positive("prune_distance", self.prune_distance)?;

        if self.enemies_per_wave == 0 {
            return Err(invalid("enemies_per_wave", "must be at least 1"));
        }
        if self.player_hit_limit == 0 {
            return Err(invalid("player_hit_limit", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.rare_drop_rate) {
            return Err(invalid("rare_drop_rate", "must be within [0, 1]"));
        }
        if !self.viewpoint.is_finite() {
            return Err(invalid("viewpoint", "must be finite"));
        }
        for (field, radius) in [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
            ("projectile_radius", self.projectile_radius),
            ("pickup_radius", self.pickup_radius),
        ] {
            if !(radius >= 0.0 && radius.is_finite()) {
                return Err(invalid(field, "must be a finite non-negative number"));
            }
        }
        Ok(())
    }

    /// Fire cooldown while a power-up is active.
    pub fn powered_cooldown_secs(&self) -> f32 {
        self.projectile_cooldown_secs / self.powerup_fire_rate_divisor
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
