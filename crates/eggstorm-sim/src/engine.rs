//! Simulation engine: the owning loop for every per-frame behavior.
//!
//! `SimulationEngine` owns the hecs world, the session, the player, the
//! deferred-timer queue and the RNG. It processes commands at tick
//! boundaries, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::config::GameConfig;
use eggstorm_core::enums::GamePhase;
use eggstorm_core::events::UiEvent;
use eggstorm_core::state::GameStateSnapshot;
use eggstorm_core::types::SimTime;

use crate::outbox::Outbox;
use crate::player::PlayerState;
use crate::rng::RandomSource;
use crate::session::Session;
use crate::systems;
use crate::systems::collision::{Body, Overlap};
use crate::systems::combat::CombatContext;
use crate::timers::TimerQueue;
use crate::world_setup;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: GameConfig,
    session: Session,
    player: PlayerState,
    timers: TimerQueue,
    rng: Box<dyn RandomSource>,
    command_queue: VecDeque<PlayerCommand>,
    reported_overlaps: Vec<Overlap>,
    overlap_buffer: Vec<Overlap>,
    body_buffer: Vec<Body>,
    despawn_buffer: Vec<hecs::Entity>,
    outbox: Outbox,
}

impl SimulationEngine {
    /// Create a new engine seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_random(config.game, Box::new(rng))
    }

    /// Create a new engine drawing randomness from `rng`.
    pub fn with_random(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            session: Session::new(&config),
            player: PlayerState::new(&config),
            timers: TimerQueue::new(),
            rng,
            command_queue: VecDeque::new(),
            reported_overlaps: Vec::new(),
            overlap_buffer: Vec::new(),
            body_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            outbox: Outbox::default(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Report an overlap from an external physics collaborator. Resolved
    /// on the next active tick together with detected overlaps.
    pub fn report_overlap(&mut self, overlap: Overlap) {
        self.reported_overlaps.push(overlap);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Non-finite or negative `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.process_commands();

        if self.session.is_active() {
            self.time.advance(dt);
            self.run_systems(dt);
        } else {
            self.reported_overlaps.clear();
        }

        let events = self.outbox.take();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.session,
            &self.player,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world, for collaborators that place entities.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::StopGame => {
                if self.session.game_over() {
                    self.outbox.announce_game_over(&self.session);
                } else {
                    tracing::warn!(phase = ?self.session.phase(), "stop ignored: no active session");
                }
            }
            PlayerCommand::SetMoveIntent { x, z } => self.player.set_move_intent(x, z),
        }
    }

    /// Reset everything and open wave 1 at base difficulty.
    fn start_game(&mut self) {
        let Some(batch) = self.session.start() else {
            tracing::warn!("start ignored: session already active");
            return;
        };

        systems::cleanup::clear_session(&mut self.world, &mut self.despawn_buffer);
        // A held direction survives the reset.
        let intent = self.player.move_intent;
        self.player = PlayerState::new(&self.config);
        self.player.move_intent = intent;
        self.timers.clear();
        self.reported_overlaps.clear();
        self.time = SimTime::default();

        world_setup::spawn_enemy_batch(
            &mut self.world,
            self.rng.as_mut(),
            &self.config,
            self.player.transform.position,
            self.session.enemy_speed(),
            batch,
        );

        tracing::info!(wave = 1, enemies = batch, "game started");
        self.outbox.ui(UiEvent::ScoreChanged { score: 0 });
        self.outbox.ui(UiEvent::ShowStartScreen { visible: false });
        self.outbox.ui(UiEvent::ShowGameOver { visible: false });
        self.outbox.ui(UiEvent::ShowPowerupIndicator { visible: false });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let now = self.time.elapsed_secs;

        // 1. Player movement, firing, indicator
        systems::player_control::run(
            &mut self.world,
            &mut self.player,
            &self.session,
            &self.config,
            dt,
            &mut self.outbox,
        );
        // 2. Deferred actions (power-up expiry)
        systems::player_control::run_timers(
            &mut self.player,
            &mut self.timers,
            &self.config,
            now,
            &mut self.outbox,
        );
        // 3. Entity motion
        systems::movement::run_forward(&mut self.world, dt);
        systems::movement::run_homing(&mut self.world, dt, Some(self.player.transform.position));
        // 4. Overlaps: reported first, then detected
        self.overlap_buffer.clear();
        self.overlap_buffer.append(&mut self.reported_overlaps);
        systems::collision::detect(
            &self.world,
            Some((self.player.transform.position, self.config.player_radius)),
            &mut self.body_buffer,
            &mut self.overlap_buffer,
        );
        // 5. Combat resolution
        let overlaps = std::mem::take(&mut self.overlap_buffer);
        let mut ctx = CombatContext {
            world: &mut self.world,
            session: &mut self.session,
            player: &mut self.player,
            rng: self.rng.as_mut(),
            timers: &mut self.timers,
            config: &self.config,
            now_secs: now,
            outbox: &mut self.outbox,
        };
        systems::combat::resolve(&mut ctx, &overlaps);
        self.overlap_buffer = overlaps;
        // 6. Pruning
        systems::cleanup::prune(&mut self.world, self.config.viewpoint, &mut self.despawn_buffer);
        // 7. Spawning and wave progression
        systems::wave_spawner::run(
            &mut self.world,
            self.rng.as_mut(),
            &mut self.session,
            &self.config,
            self.player.transform.position,
            dt,
            &mut self.outbox,
        );
    }
}
