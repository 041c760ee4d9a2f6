//! Overlap detection: stands in for the engine's trigger callbacks.
//!
//! Produces overlap-begin reports; resolution lives in `combat`.

use glam::Vec3;
use hecs::{Entity, World};

use eggstorm_core::components::Collider;
use eggstorm_core::enums::ContactKind;
use eggstorm_core::types::Transform;

/// The side of an overlap that received the trigger callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initiator {
    Player,
    Entity(Entity),
}

/// One overlap-begin report: `initiator` touched `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub initiator: Initiator,
    pub other: Entity,
}

impl Overlap {
    pub fn with_player(other: Entity) -> Self {
        Self {
            initiator: Initiator::Player,
            other,
        }
    }

    pub fn between(initiator: Entity, other: Entity) -> Self {
        Self {
            initiator: Initiator::Entity(initiator),
            other,
        }
    }
}

/// Sphere-sphere overlap test.
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

/// Collider state gathered once per tick: entity, position, radius, kind.
pub type Body = (Entity, Vec3, f32, ContactKind);

/// Find player contacts (enemies and pickups) and projectile-enemy contacts.
///
/// `player` is the player's position and radius, or `None` when absent.
/// `bodies` is scratch space, cleared on entry.
pub fn detect(
    world: &World,
    player: Option<(Vec3, f32)>,
    bodies: &mut Vec<Body>,
    overlaps: &mut Vec<Overlap>,
) {
    bodies.clear();
    {
        let mut query = world.query::<(&Transform, &Collider, &ContactKind)>();
        for (entity, (transform, collider, kind)) in query.iter() {
            bodies.push((entity, transform.position, collider.radius, *kind));
        }
    }

    if let Some((player_pos, player_radius)) = player {
        for &(entity, pos, radius, kind) in bodies.iter() {
            if kind == ContactKind::Projectile {
                continue;
            }
            if spheres_overlap(player_pos, player_radius, pos, radius) {
                overlaps.push(Overlap::with_player(entity));
            }
        }
    }

    for &(projectile, p_pos, p_radius, p_kind) in bodies.iter() {
        if p_kind != ContactKind::Projectile {
            continue;
        }
        for &(enemy, e_pos, e_radius, e_kind) in bodies.iter() {
            if e_kind == ContactKind::Enemy && spheres_overlap(p_pos, p_radius, e_pos, e_radius) {
                overlaps.push(Overlap::between(projectile, enemy));
            }
        }
    }
}
