//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::PickupKind;

/// Marks an entity as a homing enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an entity as player fire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// A consumable lying in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
}

/// Straight-line motion along the entity's facing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForwardMotion {
    /// Units per second.
    pub speed: f32,
}

/// Motion toward the live player. Speed is fixed at spawn time from the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Homing {
    pub speed: f32,
}

/// Removed once farther than `max_distance` from the viewpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PruneBeyond {
    pub max_distance: f32,
}

/// Trigger sphere used for overlap detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}
