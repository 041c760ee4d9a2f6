//! Snapshot builder: reads the world and engine state into a `GameStateSnapshot`.

use hecs::World;

use eggstorm_core::components::{Enemy, Pickup, Projectile};
use eggstorm_core::state::*;
use eggstorm_core::types::{SimTime, Transform};

use crate::outbox::Outbox;
use crate::player::PlayerState;
use crate::session::Session;

/// Build the complete snapshot, draining `events` into it.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    session: &Session,
    player: &PlayerState,
    events: Outbox,
) -> GameStateSnapshot {
    let enemies = {
        let mut q = world.query::<(&Transform, &Enemy)>();
        q.iter().map(|(_, (t, _))| *t).collect()
    };
    let projectiles = {
        let mut q = world.query::<(&Transform, &Projectile)>();
        q.iter().map(|(_, (t, _))| *t).collect()
    };
    let pickups = {
        let mut q = world.query::<(&Transform, &Pickup)>();
        q.iter()
            .map(|(_, (t, p))| PickupView {
                kind: p.kind,
                transform: *t,
            })
            .collect()
    };

    GameStateSnapshot {
        time: *time,
        phase: session.phase(),
        session: SessionView {
            wave_number: session.wave_number(),
            score: session.score(),
            enemies_spawned_this_wave: session.enemies_spawned_this_wave(),
            enemies_per_wave: session.enemies_per_wave(),
            enemy_speed: session.enemy_speed(),
            player_speed: session.player_speed(),
        },
        player: PlayerView {
            transform: player.transform,
            hit_count: player.hit_count,
            hit_limit: player.hit_limit,
            has_powerup: player.has_powerup,
            projectile_cooldown: player.fire_cooldown,
            indicator_position: player.indicator_position,
        },
        enemies,
        projectiles,
        pickups,
        audio_events: events.audio,
        ui_events: events.ui,
        game_events: events.game,
    }
}
