//! Gameplay constants and tuning defaults.
//!
//! Every value here is the default for the matching `GameConfig` field.

/// Simulation tick rate used by the app loop (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Waves ---

/// Enemies trickle-spawned per wave.
pub const ENEMIES_PER_WAVE: u32 = 35;

/// Seconds between trickle spawns.
pub const SPAWN_INTERVAL_SECS: f32 = 0.15;

/// Radius of the spawn ring around the player.
pub const SPAWN_DISTANCE: f32 = 30.0;

/// Multiplier applied to enemy speed on every wave clear.
pub const ENEMY_SPEED_GROWTH: f32 = 1.3;

/// Multiplier applied to player speed on every wave clear.
pub const PLAYER_SPEED_GROWTH: f32 = 1.125;

// --- Enemies ---

/// Enemy homing speed on wave 1 (units/s).
pub const ENEMY_BASE_SPEED: f32 = 1.2;

/// Probability that a destroyed enemy leaves the rare pickup.
pub const RARE_DROP_RATE: f32 = 0.2;

// --- Player ---

/// Player movement speed on wave 1 (units/s).
pub const PLAYER_BASE_SPEED: f32 = 5.0;

/// Slerp rate toward the movement direction.
pub const PLAYER_ROTATION_SPEED: f32 = 10.0;

/// Hits the player can take before the session ends.
pub const PLAYER_HIT_LIMIT: u32 = 5;

/// Seconds between shots without a power-up.
pub const PROJECTILE_COOLDOWN_SECS: f32 = 0.6;

/// Fire-rate multiplier while powered up.
pub const POWERUP_FIRE_RATE_DIVISOR: f32 = 10.0;

/// Seconds a power-up lasts.
pub const POWERUP_DURATION_SECS: f32 = 8.0;

/// Height of the power-up indicator above the player.
pub const POWERUP_INDICATOR_HEIGHT: f32 = 1.0;

// --- Projectiles ---

/// Projectile forward speed (units/s).
pub const PROJECTILE_SPEED: f32 = 30.0;

/// Projectiles farther than this from the viewpoint are removed.
pub const PRUNE_DISTANCE: f32 = 45.0;

/// Fixed reference point used for pruning (the camera).
pub const VIEWPOINT: [f32; 3] = [0.0, 20.0, -10.0];

// --- Scoring ---

/// Points for destroying an enemy with a projectile.
pub const SCORE_ENEMY_KILL: u32 = 7;

/// Points for collecting an experience pickup.
pub const SCORE_EXPERIENCE: u32 = 5;

// --- Collision radii ---

pub const PLAYER_RADIUS: f32 = 0.6;
pub const ENEMY_RADIUS: f32 = 0.5;
pub const PROJECTILE_RADIUS: f32 = 0.25;
pub const PICKUP_RADIUS: f32 = 0.5;

// --- Audio ---

pub const VOLUME_COLLISION: f32 = 1.0;
pub const VOLUME_SCORE_PICKUP: f32 = 0.7;
pub const VOLUME_FIRE: f32 = 0.5;
pub const VOLUME_POWERUP: f32 = 1.0;
pub const VOLUME_NEXT_WAVE: f32 = 1.5;
pub const VOLUME_BUTTON_CLICK: f32 = 1.0;
