//! Entity spawn factories.
//!
//! Creates enemies, projectiles and pickups with their component bundles.

use glam::Vec3;
use hecs::World;

use eggstorm_core::components::*;
use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::{ContactKind, PickupKind};
use eggstorm_core::types::Transform;

use crate::rng::RandomSource;

/// Spawn a homing enemy at `position` moving at `speed`.
pub fn spawn_enemy(world: &mut World, config: &GameConfig, position: Vec3, speed: f32) -> hecs::Entity {
    world.spawn((
        Enemy,
        Transform::from_position(position),
        Homing { speed },
        Collider {
            radius: config.enemy_radius,
        },
        ContactKind::Enemy,
    ))
}

/// Spawn a projectile travelling along the facing of `transform`.
pub fn spawn_projectile(world: &mut World, config: &GameConfig, transform: Transform) -> hecs::Entity {
    world.spawn((
        Projectile,
        transform,
        ForwardMotion {
            speed: config.projectile_speed,
        },
        PruneBeyond {
            max_distance: config.prune_distance,
        },
        Collider {
            radius: config.projectile_radius,
        },
        ContactKind::Projectile,
    ))
}

/// Spawn a pickup where an enemy fell.
pub fn spawn_pickup(
    world: &mut World,
    config: &GameConfig,
    kind: PickupKind,
    transform: Transform,
) -> hecs::Entity {
    world.spawn((
        Pickup { kind },
        transform,
        Collider {
            radius: config.pickup_radius,
        },
        ContactKind::Pickup(kind),
    ))
}

/// Random point on the horizontal ring of radius `distance` around `center`.
pub fn ring_spawn_position(center: Vec3, rng: &mut dyn RandomSource, distance: f32) -> Vec3 {
    let mut direction = rng.on_unit_sphere();
    direction.y = 0.0;
    // A sample at a pole has no horizontal component.
    let direction = direction.try_normalize().unwrap_or(Vec3::X);
    center + direction * distance
}

/// Spawn `count` enemies on the ring around `center`.
pub fn spawn_enemy_batch(
    world: &mut World,
    rng: &mut dyn RandomSource,
    config: &GameConfig,
    center: Vec3,
    speed: f32,
    count: u32,
) {
    for _ in 0..count {
        let position = ring_spawn_position(center, rng, config.spawn_distance);
        spawn_enemy(world, config, position, speed);
    }
}

/// Number of live enemies.
pub fn live_enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}
