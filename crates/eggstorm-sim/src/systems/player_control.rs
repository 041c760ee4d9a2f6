//! Player control loop: movement, firing, indicator upkeep, power-up expiry.

use hecs::World;

use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::SoundCue;
use eggstorm_core::events::{GameEvent, UiEvent};

use crate::outbox::Outbox;
use crate::player::PlayerState;
use crate::session::Session;
use crate::timers::{TimedAction, TimerQueue};
use crate::world_setup;

/// Move, fire when the cooldown allows, and keep the indicator attached.
pub fn run(
    world: &mut World,
    player: &mut PlayerState,
    session: &Session,
    config: &GameConfig,
    dt: f32,
    outbox: &mut Outbox,
) {
    player.apply_movement(dt, session.player_speed(), config.player_rotation_speed);

    if player.advance_fire(dt) {
        world_setup::spawn_projectile(world, config, player.transform);
        outbox.play(SoundCue::Fire);
    }

    player.update_indicator(config.powerup_indicator_height);
}

/// Fire every deferred action due by `now_secs`.
pub fn run_timers(
    player: &mut PlayerState,
    timers: &mut TimerQueue,
    config: &GameConfig,
    now_secs: f64,
    outbox: &mut Outbox,
) {
    for action in timers.pop_due(now_secs) {
        match action {
            TimedAction::PowerupExpiry { generation } => {
                if player.expire_powerup(generation, config.cancel_stale_powerup_expiry) {
                    tracing::info!("powerup expired");
                    outbox.ui(UiEvent::ShowPowerupIndicator { visible: false });
                    outbox.game(GameEvent::PowerupExpired);
                } else {
                    tracing::trace!(generation, "ignored stale powerup expiry");
                }
            }
        }
    }
}
