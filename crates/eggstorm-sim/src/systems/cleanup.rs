//! Lifecycle pruning and session teardown.

use glam::Vec3;
use hecs::{Entity, World};

use eggstorm_core::components::{Enemy, Pickup, Projectile, PruneBeyond};
use eggstorm_core::types::Transform;

/// Remove every `PruneBeyond` entity strictly farther than its limit from
/// `viewpoint`. Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns how many were removed.
pub fn prune(world: &mut World, viewpoint: Vec3, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, (transform, prune)) in world.query_mut::<(&Transform, &PruneBeyond)>() {
        if transform.distance_to(viewpoint) > prune.max_distance {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    if removed > 0 {
        tracing::trace!(removed, "pruned distant entities");
    }
    removed
}

/// Remove all enemies, projectiles and pickups without triggering drops.
pub fn clear_session(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Enemy>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Projectile>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Pickup>().into_iter().map(|(e, _)| e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
