//! Tests for the engine, session/wave flow, combat resolution and motion.

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::components::{Enemy, ForwardMotion, Homing, Pickup, Projectile};
use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::*;
use eggstorm_core::events::{GameEvent, UiEvent};
use eggstorm_core::state::GameStateSnapshot;
use eggstorm_core::types::Transform;

use crate::engine::{SimConfig, SimulationEngine};
use crate::outbox::Outbox;
use crate::rng::SequenceRandom;
use crate::systems::collision::Overlap;
use crate::systems::{cleanup, combat, movement};
use crate::world_setup;

/// Engine whose enemies always spawn on the -X side, away from player fire
/// (identity facing is +Z), with a fixed drop roll.
fn scripted_engine(config: GameConfig, roll: f32) -> SimulationEngine {
    let rng = SequenceRandom::new([roll]).with_directions([Vec3::NEG_X]);
    SimulationEngine::with_random(config, Box::new(rng))
}

fn small_waves(per_wave: u32) -> GameConfig {
    GameConfig {
        enemies_per_wave: per_wave,
        spawn_interval_secs: 0.1,
        ..GameConfig::default()
    }
}

fn count<C: hecs::Component>(world: &World) -> usize {
    world.query::<&C>().iter().count()
}

fn first_entity<C: hecs::Component>(world: &World) -> hecs::Entity {
    let mut q = world.query::<&C>();
    let first = q.iter().next().map(|(e, _)| e);
    first.unwrap()
}

fn despawn_all_enemies(engine: &mut SimulationEngine) {
    let enemies: Vec<_> = {
        let mut q = engine.world().query::<&Enemy>();
        q.iter().map(|(e, _)| e).collect()
    };
    for e in enemies {
        engine.world_mut().despawn(e).unwrap();
    }
}

fn wave_events(snap: &GameStateSnapshot) -> Vec<u32> {
    snap.game_events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WaveCleared { next_wave } => Some(*next_wave),
            _ => None,
        })
        .collect()
}

// ---- Session start ----

#[test]
fn test_engine_starts_idle() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), GamePhase::Idle);

    let snap = engine.tick(0.1);
    assert_eq!(snap.phase, GamePhase::Idle);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.enemies.is_empty());
}

#[test]
fn test_start_game_spawns_opening_wave() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.0);

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.session.score, 0);
    assert_eq!(snap.session.wave_number, 1);
    assert_eq!(snap.enemies.len(), 35);
    assert_eq!(snap.session.enemy_speed, GameConfig::default().enemy_base_speed);
    assert!(snap.ui_events.contains(&UiEvent::ScoreChanged { score: 0 }));
    assert!(snap.ui_events.contains(&UiEvent::ShowStartScreen { visible: false }));
}

#[test]
fn test_opening_wave_spawns_on_ring() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.0);

    for enemy in &snap.enemies {
        assert_eq!(enemy.position.y, 0.0);
        assert!((enemy.position.length() - 30.0).abs() < 1e-3);
    }
}

#[test]
fn test_second_start_is_ignored_while_active() {
    let mut engine = scripted_engine(small_waves(3), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.1);
    engine.tick(0.1);
    let spawned = engine.session().enemies_spawned_this_wave();

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.0);
    assert_eq!(snap.session.enemies_spawned_this_wave, spawned);
    assert!(snap.ui_events.is_empty());
}

#[test]
fn test_restart_after_game_over_resets_world() {
    let mut engine = scripted_engine(small_waves(3), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    for _ in 0..5 {
        engine.tick(0.1);
    }
    engine.queue_command(PlayerCommand::StopGame);
    let snap = engine.tick(0.1);
    assert_eq!(snap.phase, GamePhase::GameOver);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.0);
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.enemies.len(), 3);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.session.enemies_spawned_this_wave, 0);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.time.elapsed_secs, 0.0);
}

// ---- Waves ----

#[test]
fn test_spawn_quota_never_exceeded() {
    let mut engine = scripted_engine(small_waves(4), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    for _ in 0..200 {
        let snap = engine.tick(0.05);
        assert!(snap.session.enemies_spawned_this_wave <= snap.session.enemies_per_wave);
    }
}

#[test]
fn test_trickle_spawns_one_per_interval() {
    let mut engine = scripted_engine(small_waves(10), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    // A 1s tick is ten intervals, but the overshoot is discarded.
    engine.tick(1.0);
    assert_eq!(engine.session().enemies_spawned_this_wave(), 1);
    engine.tick(0.05);
    assert_eq!(engine.session().enemies_spawned_this_wave(), 1);
    engine.tick(0.05);
    assert_eq!(engine.session().enemies_spawned_this_wave(), 2);
}

#[test]
fn test_no_wave_transition_with_enemy_alive() {
    let mut engine = scripted_engine(small_waves(2), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    engine.tick(0.1);
    engine.tick(0.1);
    assert_eq!(engine.session().enemies_spawned_this_wave(), 2);

    // Quota met, but enemies remain.
    let snap = engine.tick(0.01);
    assert!(!snap.enemies.is_empty());
    assert_eq!(snap.session.wave_number, 1);
    assert!(wave_events(&snap).is_empty());
}

#[test]
fn test_wave_transition_scales_speeds() {
    let config = small_waves(2);
    let mut engine = scripted_engine(config.clone(), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    engine.tick(0.1);
    engine.tick(0.1);

    despawn_all_enemies(&mut engine);
    let snap = engine.tick(0.01);

    assert_eq!(wave_events(&snap), vec![2]);
    assert_eq!(snap.session.wave_number, 2);
    assert_eq!(snap.session.enemies_spawned_this_wave, 0);
    assert_eq!(snap.enemies.len(), 2, "wave batch spawns immediately");
    assert!((snap.session.enemy_speed - config.enemy_base_speed * 1.3).abs() < 1e-5);
    assert!((snap.session.player_speed - config.player_base_speed * 1.125).abs() < 1e-5);
    assert!(snap
        .audio_events
        .iter()
        .any(|a| a.cue == SoundCue::NextWave && a.volume == 1.5));

    // New enemies carry the scaled speed.
    let mut q = engine.world().query::<&Homing>();
    for (_, homing) in q.iter() {
        assert!((homing.speed - config.enemy_base_speed * 1.3).abs() < 1e-5);
    }
}

#[test]
fn test_no_wave_transition_before_quota() {
    let mut engine = scripted_engine(small_waves(5), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    engine.tick(0.1);

    despawn_all_enemies(&mut engine);
    let snap = engine.tick(0.01);
    assert_eq!(snap.session.wave_number, 1);
}

// ---- Combat ----

#[test]
fn test_projectile_kill_then_experience_scores_twelve() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    let at = Transform::from_position(Vec3::new(5.0, 0.0, 5.0));
    let config = engine.config().clone();
    let enemy = world_setup::spawn_enemy(engine.world_mut(), &config, at.position, 1.2);
    let projectile = world_setup::spawn_projectile(engine.world_mut(), &config, at);
    engine.report_overlap(Overlap::between(projectile, enemy));
    let snap = engine.tick(0.01);

    assert_eq!(snap.session.score, 7);
    assert!(engine.world().get::<&Enemy>(enemy).is_err());
    assert!(engine.world().get::<&Projectile>(projectile).is_err());
    assert_eq!(snap.pickups.len(), 1);
    assert_eq!(snap.pickups[0].kind, PickupKind::Experience);
    assert!(snap.game_events.contains(&GameEvent::EnemyDestroyed {
        cause: DestroyCause::Projectile,
        drop: PickupKind::Experience,
    }));

    let pickup = first_entity::<Pickup>(engine.world());
    engine.report_overlap(Overlap::with_player(pickup));
    let snap = engine.tick(0.01);

    assert_eq!(snap.session.score, 12);
    assert!(snap.pickups.is_empty());
    assert!(snap.ui_events.contains(&UiEvent::ScoreChanged { score: 12 }));
    assert!(snap
        .audio_events
        .iter()
        .any(|a| a.cue == SoundCue::ScorePickup && a.volume == 0.7));
}

#[test]
fn test_rare_roll_drops_powerup() {
    let mut engine = scripted_engine(small_waves(35), 0.19);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    let config = engine.config().clone();
    let at = Transform::from_position(Vec3::new(5.0, 0.0, 5.0));
    let enemy = world_setup::spawn_enemy(engine.world_mut(), &config, at.position, 1.2);
    let projectile = world_setup::spawn_projectile(engine.world_mut(), &config, at);
    engine.report_overlap(Overlap::between(projectile, enemy));
    let snap = engine.tick(0.01);

    assert_eq!(snap.pickups.len(), 1);
    assert_eq!(snap.pickups[0].kind, PickupKind::Powerup);
}

#[test]
fn test_drop_roll_boundary() {
    assert_eq!(combat::roll_drop(0.19, 0.2), PickupKind::Powerup);
    assert_eq!(combat::roll_drop(0.2, 0.2), PickupKind::Experience);
    assert_eq!(combat::roll_drop(0.99, 0.2), PickupKind::Experience);
    assert_eq!(combat::roll_drop(0.0, 0.2), PickupKind::Powerup);
}

#[test]
fn test_drop_roll_fires_once_per_destruction() {
    let config = GameConfig::default();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut outbox = Outbox::default();
    let enemy = world_setup::spawn_enemy(&mut world, &config, Vec3::ZERO, 1.0);

    let first = combat::destroy_enemy(
        &mut world,
        &mut rng,
        &config,
        &mut outbox,
        enemy,
        DestroyCause::Projectile,
    );
    let second = combat::destroy_enemy(
        &mut world,
        &mut rng,
        &config,
        &mut outbox,
        enemy,
        DestroyCause::PlayerContact,
    );

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(count::<Pickup>(&world), 1);
    assert_eq!(outbox.game.len(), 1);
}

#[test]
fn test_enemy_contact_counts_hit_and_drops() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    let config = engine.config().clone();
    world_setup::spawn_enemy(engine.world_mut(), &config, Vec3::ZERO, 1.2);
    let snap = engine.tick(0.01);

    assert_eq!(snap.player.hit_count, 1);
    assert!(snap.game_events.contains(&GameEvent::PlayerHit { hits: 1, limit: 5 }));
    assert!(snap.game_events.contains(&GameEvent::EnemyDestroyed {
        cause: DestroyCause::PlayerContact,
        drop: PickupKind::Experience,
    }));
    assert_eq!(snap.session.score, 0, "ramming is not a kill");
    assert!(snap.audio_events.iter().any(|a| a.cue == SoundCue::Collision));
}

#[test]
fn test_hit_limit_triggers_game_over_once() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    let config = engine.config().clone();

    let mut game_overs = 0;
    for hit in 1..=7u32 {
        world_setup::spawn_enemy(engine.world_mut(), &config, Vec3::ZERO, 1.2);
        let snap = engine.tick(0.01);
        game_overs += snap
            .game_events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();

        if hit < 5 {
            assert_eq!(snap.phase, GamePhase::Active, "hit {hit} must not end the game");
        } else {
            assert_eq!(snap.phase, GamePhase::GameOver);
        }
        assert!(snap.player.hit_count <= snap.player.hit_limit);
    }
    assert_eq!(game_overs, 1);
    assert_eq!(engine.player().hit_count, 5);
}

#[test]
fn test_game_over_shows_ui() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    engine.queue_command(PlayerCommand::StopGame);
    let snap = engine.tick(0.01);
    assert!(snap.ui_events.contains(&UiEvent::ShowGameOver { visible: true }));

    // A second stop is a no-op.
    engine.queue_command(PlayerCommand::StopGame);
    let snap = engine.tick(0.01);
    assert!(snap.game_events.is_empty());
}

#[test]
fn test_score_is_monotonic() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::SetMoveIntent { x: -1.0, z: 0.3 });
    let mut last = 0;
    for _ in 0..3000 {
        let snap = engine.tick(1.0 / 60.0);
        assert!(snap.session.score >= last);
        last = snap.session.score;
    }
}

// ---- Power-up ----

#[test]
fn test_powerup_cooldown_window() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    let config = engine.config().clone();
    world_setup::spawn_pickup(
        engine.world_mut(),
        &config,
        PickupKind::Powerup,
        Transform::default(),
    );

    // Collected at t = 0.5, expires at t = 8.5.
    let snap = engine.tick(0.5);
    assert!(snap.player.has_powerup);
    assert!((snap.player.projectile_cooldown - 0.06).abs() < 1e-6);
    assert!(snap.ui_events.contains(&UiEvent::ShowPowerupIndicator { visible: true }));

    for _ in 0..15 {
        let snap = engine.tick(0.5);
        assert!(snap.player.has_powerup, "expired early at t={}", snap.time.elapsed_secs);
        assert!((snap.player.projectile_cooldown - 0.06).abs() < 1e-6);
    }
    assert_eq!(engine.time().elapsed_secs, 8.0);

    let snap = engine.tick(0.5);
    assert!(!snap.player.has_powerup);
    assert_eq!(snap.player.projectile_cooldown, 0.6);
    assert!(snap.game_events.contains(&GameEvent::PowerupExpired));
}

#[test]
fn test_powerup_reactivation_restarts_window() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    let config = engine.config().clone();

    world_setup::spawn_pickup(engine.world_mut(), &config, PickupKind::Powerup, Transform::default());
    engine.tick(1.0); // t = 1, due 9
    for _ in 0..3 {
        engine.tick(1.0);
    }
    world_setup::spawn_pickup(engine.world_mut(), &config, PickupKind::Powerup, Transform::default());
    engine.tick(1.0); // t = 5, due 13

    for _ in 0..7 {
        let snap = engine.tick(1.0);
        assert!(snap.player.has_powerup, "stale expiry fired at t={}", snap.time.elapsed_secs);
    }
    let snap = engine.tick(1.0); // t = 13
    assert!(!snap.player.has_powerup);
}

#[test]
fn test_base_fire_rate() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);

    let mut shots = 0;
    for _ in 0..60 {
        let snap = engine.tick(0.1);
        shots += snap.audio_events.iter().filter(|a| a.cue == SoundCue::Fire).count();
    }
    // 6s at 0.6s cooldown, counted in 0.1s steps.
    assert!((8..=10).contains(&shots), "got {shots} shots");
}

// ---- Motion and pruning ----

#[test]
fn test_forward_motion() {
    let mut world = World::new();
    let transform = Transform::new(Vec3::ZERO, glam::Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let e = world.spawn((transform, ForwardMotion { speed: 30.0 }));
    movement::run_forward(&mut world, 0.5);
    let t = *world.get::<&Transform>(e).unwrap();
    assert!((t.position - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_homing_caps_at_target_and_faces_it() {
    let mut world = World::new();
    let e = world.spawn((Transform::from_position(Vec3::new(0.0, 0.0, 1.0)), Homing { speed: 10.0 }));
    movement::run_homing(&mut world, 1.0, Some(Vec3::ZERO));
    let t = *world.get::<&Transform>(e).unwrap();
    assert_eq!(t.position, Vec3::ZERO, "must not overshoot");

    let e2 = world.spawn((Transform::from_position(Vec3::new(4.0, 0.0, 0.0)), Homing { speed: 1.0 }));
    movement::run_homing(&mut world, 1.0, Some(Vec3::ZERO));
    let t2 = *world.get::<&Transform>(e2).unwrap();
    assert!((t2.position - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    assert!((t2.forward() - Vec3::NEG_X).length() < 1e-4);
}

#[test]
fn test_homing_without_target_is_skipped() {
    let mut world = World::new();
    let start = Transform::from_position(Vec3::new(4.0, 0.0, 0.0));
    let e = world.spawn((start, Homing { speed: 1.0 }));
    movement::run_homing(&mut world, 1.0, None);
    assert_eq!(*world.get::<&Transform>(e).unwrap(), start);
}

#[test]
fn test_prune_threshold_is_strict() {
    let config = GameConfig::default();
    let mut world = World::new();
    let mut buffer = Vec::new();
    let viewpoint = Vec3::ZERO;

    let at_limit = world_setup::spawn_projectile(
        &mut world,
        &config,
        Transform::from_position(Vec3::new(45.0, 0.0, 0.0)),
    );
    let beyond = world_setup::spawn_projectile(
        &mut world,
        &config,
        Transform::from_position(Vec3::new(45.01, 0.0, 0.0)),
    );

    let removed = cleanup::prune(&mut world, viewpoint, &mut buffer);
    assert_eq!(removed, 1);
    assert!(world.contains(at_limit));
    assert!(!world.contains(beyond));
}

#[test]
fn test_projectiles_pruned_in_engine() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    for _ in 0..300 {
        engine.tick(0.05);
    }
    let limit = engine.config().prune_distance;
    let viewpoint = engine.config().viewpoint;
    let mut q = engine.world().query::<(&Transform, &Projectile)>();
    for (_, (t, _)) in q.iter() {
        assert!(t.distance_to(viewpoint) <= limit);
    }
}

#[test]
fn test_move_intent_moves_player() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::SetMoveIntent { x: 0.0, z: 1.0 });
    let snap = engine.tick(0.5);
    assert!((snap.player.transform.position - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
    assert!((snap.player.indicator_position - Vec3::new(0.0, 1.0, 2.5)).length() < 1e-5);
}

#[test]
fn test_intent_held_through_start_is_kept() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::SetMoveIntent { x: 0.0, z: 1.0 });
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.5);
    assert!((snap.player.transform.position - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
}

#[test]
fn test_restart_keeps_intent_but_resets_position() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::SetMoveIntent { x: 1.0, z: 0.0 });
    engine.tick(0.5);
    engine.queue_command(PlayerCommand::StopGame);
    engine.tick(0.0);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(0.0);
    assert_eq!(snap.player.transform.position, Vec3::ZERO);
    assert_eq!(engine.player().move_intent, (1.0, 0.0));
}

#[test]
fn test_invalid_dt_is_ignored() {
    let mut engine = scripted_engine(small_waves(35), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(f32::NAN);
    engine.tick(-1.0);
    assert_eq!(engine.time().elapsed_secs, 0.0);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(PlayerCommand::StartGame);
        engine.queue_command(PlayerCommand::SetMoveIntent { x: 0.5, z: -1.0 });
    }

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick(1.0 / 60.0)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(1.0 / 60.0)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    let json_a = serde_json::to_string(&engine_a.tick(0.0)).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick(0.0)).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should place enemies differently");
}

#[test]
fn test_enemies_only_live_while_counted() {
    let mut engine = scripted_engine(small_waves(3), 0.5);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    assert_eq!(count::<Enemy>(engine.world()), 3);
    assert_eq!(world_setup::live_enemy_count(engine.world()), 3);
}
