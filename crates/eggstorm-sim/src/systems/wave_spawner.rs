//! Wave spawning system: trickle spawns on the session timer, and the
//! immediate batch that opens each wave.

use glam::Vec3;
use hecs::World;

use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::SoundCue;
use eggstorm_core::events::GameEvent;

use crate::outbox::Outbox;
use crate::rng::RandomSource;
use crate::session::Session;
use crate::world_setup;

/// Run the session's spawn logic for one tick, then check for wave clear.
///
/// `center` is the player position the spawn ring is placed around.
pub fn run(
    world: &mut World,
    rng: &mut dyn RandomSource,
    session: &mut Session,
    config: &GameConfig,
    center: Vec3,
    dt: f32,
    outbox: &mut Outbox,
) {
    if session.advance_spawn_timer(dt) {
        let position = world_setup::ring_spawn_position(center, rng, config.spawn_distance);
        world_setup::spawn_enemy(world, config, position, session.enemy_speed());
        tracing::debug!(
            spawned = session.enemies_spawned_this_wave(),
            quota = session.enemies_per_wave(),
            "enemy spawned"
        );
    }

    let live = world_setup::live_enemy_count(world);
    if let Some(advance) = session.check_wave_clear(live) {
        world_setup::spawn_enemy_batch(
            world,
            rng,
            config,
            center,
            session.enemy_speed(),
            advance.batch,
        );
        tracing::info!(
            wave = advance.wave_number,
            enemy_speed = session.enemy_speed(),
            player_speed = session.player_speed(),
            "next wave"
        );
        outbox.play(SoundCue::NextWave);
        outbox.game(GameEvent::WaveCleared {
            next_wave: advance.wave_number,
        });
    }
}
