//! Entity motion: straight-line forward travel and homing.

use glam::Vec3;
use hecs::World;

use eggstorm_core::components::{ForwardMotion, Homing};
use eggstorm_core::types::{move_towards, Transform};

/// Translate every `ForwardMotion` entity along its facing.
pub fn run_forward(world: &mut World, dt: f32) {
    for (_entity, (transform, motion)) in world.query_mut::<(&mut Transform, &ForwardMotion)>() {
        let step = transform.forward() * motion.speed * dt;
        transform.position += step;
    }
}

/// Move every `Homing` entity toward `target` and turn to face it.
///
/// No target (player gone) means no movement.
pub fn run_homing(world: &mut World, dt: f32, target: Option<Vec3>) {
    let Some(target) = target else {
        return;
    };
    for (_entity, (transform, homing)) in world.query_mut::<(&mut Transform, &Homing)>() {
        transform.position = move_towards(transform.position, target, homing.speed * dt);
        transform.look_at(target);
    }
}
