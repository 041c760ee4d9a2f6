//! Combat resolution: outcomes of overlaps between the player, enemies,
//! projectiles and pickups.

use hecs::{Entity, World};

use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::{ContactKind, DestroyCause, PickupKind, SoundCue};
use eggstorm_core::events::{GameEvent, UiEvent};
use eggstorm_core::types::Transform;

use crate::outbox::Outbox;
use crate::player::PlayerState;
use crate::rng::RandomSource;
use crate::session::{HitOutcome, Session};
use crate::systems::collision::{Initiator, Overlap};
use crate::timers::TimerQueue;
use crate::world_setup;

/// Mutable engine state touched by combat outcomes.
pub struct CombatContext<'a> {
    pub world: &'a mut World,
    pub session: &'a mut Session,
    pub player: &'a mut PlayerState,
    pub rng: &'a mut dyn RandomSource,
    pub timers: &'a mut TimerQueue,
    pub config: &'a GameConfig,
    pub now_secs: f64,
    pub outbox: &'a mut Outbox,
}

/// Pick the drop for a roll in [0, 1): the rare pickup iff `value < rare_rate`.
pub fn roll_drop(value: f32, rare_rate: f32) -> PickupKind {
    if value >= rare_rate {
        PickupKind::Experience
    } else {
        PickupKind::Powerup
    }
}

/// Resolve overlaps in order. Entities already consumed by an earlier
/// overlap are skipped; resolution stops once the session ends.
pub fn resolve(ctx: &mut CombatContext<'_>, overlaps: &[Overlap]) {
    for overlap in overlaps {
        if !ctx.session.is_active() {
            break;
        }
        let Some(other_kind) = contact_kind(ctx.world, overlap.other) else {
            continue;
        };

        match overlap.initiator {
            Initiator::Player => match other_kind {
                ContactKind::Enemy => player_struck(ctx, overlap.other),
                ContactKind::Pickup(PickupKind::Experience) => {
                    collect_experience(ctx, overlap.other)
                }
                ContactKind::Pickup(PickupKind::Powerup) => collect_powerup(ctx, overlap.other),
                ContactKind::Projectile => {}
            },
            Initiator::Entity(initiator) => {
                let Some(initiator_kind) = contact_kind(ctx.world, initiator) else {
                    continue;
                };
                match (initiator_kind, other_kind) {
                    (ContactKind::Projectile, ContactKind::Enemy) => {
                        projectile_hit(ctx, initiator, overlap.other)
                    }
                    (ContactKind::Enemy, ContactKind::Projectile) => {
                        projectile_hit(ctx, overlap.other, initiator)
                    }
                    (ContactKind::Enemy, _)
                    | (ContactKind::Projectile, _)
                    | (ContactKind::Pickup(_), _) => {}
                }
            }
        }
    }
}

fn contact_kind(world: &World, entity: Entity) -> Option<ContactKind> {
    world.get::<&ContactKind>(entity).ok().map(|kind| *kind)
}

/// Destroy an enemy and roll its drop. The roll happens once, and only if
/// the enemy was still alive.
pub fn destroy_enemy(
    world: &mut World,
    rng: &mut dyn RandomSource,
    config: &GameConfig,
    outbox: &mut Outbox,
    enemy: Entity,
    cause: DestroyCause,
) -> Option<PickupKind> {
    let transform = world.get::<&Transform>(enemy).ok().map(|t| *t)?;
    world.despawn(enemy).ok()?;

    let drop = roll_drop(rng.value(), config.rare_drop_rate);
    world_setup::spawn_pickup(world, config, drop, transform);
    tracing::debug!(?cause, ?drop, "enemy destroyed");
    outbox.game(GameEvent::EnemyDestroyed { cause, drop });
    Some(drop)
}

fn add_score(ctx: &mut CombatContext<'_>, points: u32) {
    if let Some(score) = ctx.session.register_score(points) {
        ctx.outbox.ui(UiEvent::ScoreChanged { score });
    }
}

fn player_struck(ctx: &mut CombatContext<'_>, enemy: Entity) {
    ctx.outbox.play(SoundCue::Collision);

    let outcome = ctx.session.register_player_hit(ctx.player);
    match outcome {
        HitOutcome::Hit { hits } | HitOutcome::GameOver { hits } => {
            tracing::debug!(hits, limit = ctx.player.hit_limit, "player hit by an enemy");
            ctx.outbox.game(GameEvent::PlayerHit {
                hits,
                limit: ctx.player.hit_limit,
            });
        }
        HitOutcome::Ignored => {}
    }

    destroy_enemy(
        ctx.world,
        ctx.rng,
        ctx.config,
        ctx.outbox,
        enemy,
        DestroyCause::PlayerContact,
    );

    if matches!(outcome, HitOutcome::GameOver { .. }) {
        ctx.outbox.announce_game_over(ctx.session);
    }
}

fn collect_experience(ctx: &mut CombatContext<'_>, pickup: Entity) {
    if ctx.world.despawn(pickup).is_err() {
        return;
    }
    tracing::debug!("experience collected");
    add_score(ctx, ctx.config.score_experience);
    ctx.outbox.play(SoundCue::ScorePickup);
    ctx.outbox.game(GameEvent::PickupCollected {
        kind: PickupKind::Experience,
    });
}

fn collect_powerup(ctx: &mut CombatContext<'_>, pickup: Entity) {
    if ctx.world.despawn(pickup).is_err() {
        return;
    }
    tracing::info!("powerup activated");
    ctx.player.activate_powerup(ctx.now_secs, ctx.config, ctx.timers);
    ctx.outbox.play(SoundCue::Powerup);
    ctx.outbox.ui(UiEvent::ShowPowerupIndicator { visible: true });
    ctx.outbox.game(GameEvent::PickupCollected {
        kind: PickupKind::Powerup,
    });
    ctx.outbox.game(GameEvent::PowerupActivated);
}

fn projectile_hit(ctx: &mut CombatContext<'_>, projectile: Entity, enemy: Entity) {
    let destroyed = destroy_enemy(
        ctx.world,
        ctx.rng,
        ctx.config,
        ctx.outbox,
        enemy,
        DestroyCause::Projectile,
    );
    if destroyed.is_none() {
        return;
    }
    ctx.outbox.play(SoundCue::Collision);
    add_score(ctx, ctx.config.score_enemy_kill);
    let _ = ctx.world.despawn(projectile);
}
