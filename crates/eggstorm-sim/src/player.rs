//! Player control loop state: movement, cooldown-gated firing, timed power-up.

use glam::Vec3;

use eggstorm_core::config::GameConfig;
use eggstorm_core::types::{look_rotation, Transform};

use crate::timers::{TimedAction, TimerQueue};

/// The player avatar. Owned by the engine, not an ECS entity.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub transform: Transform,
    /// Held movement intent (x, z), each clamped to [-1, 1].
    pub move_intent: (f32, f32),
    pub hit_count: u32,
    pub hit_limit: u32,
    pub has_powerup: bool,
    pub indicator_visible: bool,
    pub indicator_position: Vec3,
    /// Time accumulated toward the next shot.
    pub fire_timer: f32,
    /// Current threshold for `fire_timer`.
    pub fire_cooldown: f32,
    pub default_cooldown: f32,
    /// Bumped on every activation so stale expiries can be told apart.
    pub powerup_generation: u32,
}

impl PlayerState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            transform: Transform::default(),
            move_intent: (0.0, 0.0),
            hit_count: 0,
            hit_limit: config.player_hit_limit,
            has_powerup: false,
            indicator_visible: false,
            indicator_position: Vec3::new(0.0, config.powerup_indicator_height, 0.0),
            fire_timer: 0.0,
            fire_cooldown: config.projectile_cooldown_secs,
            default_cooldown: config.projectile_cooldown_secs,
            powerup_generation: 0,
        }
    }

    pub fn set_move_intent(&mut self, x: f32, z: f32) {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.move_intent = (clamp(x), clamp(z));
    }

    /// Turn toward and move along the held intent.
    ///
    /// Orientation slerps toward the movement direction at
    /// `dt * rotation_speed` (clamped to a full turn); position moves by
    /// the normalized direction times `speed * dt` in world space.
    pub fn apply_movement(&mut self, dt: f32, speed: f32, rotation_speed: f32) {
        let (x, z) = self.move_intent;
        if x == 0.0 && z == 0.0 {
            return;
        }
        let Some(direction) = Vec3::new(x, 0.0, z).try_normalize() else {
            return;
        };
        if let Some(target) = look_rotation(direction) {
            let t = (dt * rotation_speed).clamp(0.0, 1.0);
            self.transform.rotation = self.transform.rotation.slerp(target, t).normalize();
        }
        self.transform.position += direction * speed * dt;
    }

    /// Accumulate `dt`; true when a shot is due. The timer is then zeroed.
    pub fn advance_fire(&mut self, dt: f32) -> bool {
        self.fire_timer += dt;
        if self.fire_timer >= self.fire_cooldown {
            self.fire_timer = 0.0;
            return true;
        }
        false
    }

    /// Keep the indicator floating above the player.
    pub fn update_indicator(&mut self, height: f32) {
        self.indicator_position = self.transform.position + Vec3::new(0.0, height, 0.0);
    }

    /// Start (or restart) a power-up window and schedule its reversal.
    pub fn activate_powerup(&mut self, now_secs: f64, config: &GameConfig, timers: &mut TimerQueue) {
        self.powerup_generation = self.powerup_generation.wrapping_add(1);
        self.has_powerup = true;
        self.indicator_visible = true;
        self.fire_cooldown = config.powered_cooldown_secs();
        timers.schedule(
            now_secs,
            config.powerup_duration_secs as f64,
            TimedAction::PowerupExpiry {
                generation: self.powerup_generation,
            },
        );
    }

    /// Revert a power-up. With `cancel_stale`, an expiry from an earlier
    /// activation is ignored. Returns true if the power-up was turned off.
    pub fn expire_powerup(&mut self, generation: u32, cancel_stale: bool) -> bool {
        if cancel_stale && generation != self.powerup_generation {
            return false;
        }
        if !self.has_powerup {
            return false;
        }
        self.has_powerup = false;
        self.indicator_visible = false;
        self.fire_cooldown = self.default_cooldown;
        true
    }
}
