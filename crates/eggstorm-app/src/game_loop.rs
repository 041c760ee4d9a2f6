//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. The latest snapshot and the HUD model
//! are stored in shared state for polling; audio cues go to the sink.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::constants::{DT, TICK_RATE};
use eggstorm_core::enums::GamePhase;
use eggstorm_core::events::AudioEvent;
use eggstorm_core::state::GameStateSnapshot;
use eggstorm_sim::engine::{SimConfig, SimulationEngine};
use eggstorm_sim::ui::Hud;

use crate::audio::AudioSink;
use crate::autopilot::Autopilot;
use crate::state::{AppState, GameLoopCommand};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop runs.
#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub sim: SimConfig,
    /// Sleep to hold the nominal tick rate. Off = run as fast as possible.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    pub stop_on_game_over: bool,
    pub autopilot: bool,
    /// Queued before the first tick.
    pub initial_commands: Vec<PlayerCommand>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            realtime: true,
            max_ticks: None,
            stop_on_game_over: false,
            autopilot: false,
            initial_commands: Vec::new(),
        }
    }
}

/// Counters returned when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub audio_played: u64,
    pub audio_dropped: u64,
}

/// Spawns the game loop in a new thread and registers its command sender
/// in `state`.
pub fn spawn_game_loop(
    options: LoopOptions,
    state: &AppState,
    audio: Option<Box<dyn AudioSink>>,
) -> io::Result<JoinHandle<LoopStats>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::clone(&state.latest_snapshot);
    let hud = Arc::clone(&state.hud);

    let handle = std::thread::Builder::new()
        .name("eggstorm-game-loop".into())
        .spawn(move || run_game_loop(options, cmd_rx, &latest_snapshot, &hud, audio))?;

    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(cmd_tx);
    }
    Ok(handle)
}

/// The game loop. Runs until Shutdown, channel disconnect, or a stop
/// condition from `options`.
fn run_game_loop(
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    hud: &Mutex<Hud>,
    mut audio: Option<Box<dyn AudioSink>>,
) -> LoopStats {
    let mut engine = SimulationEngine::new(options.sim.clone());
    engine.queue_commands(options.initial_commands.iter().copied());

    let mut autopilot = options.autopilot.then(Autopilot::default);
    let mut stats = LoopStats::default();
    let mut next_tick_time = Instant::now();

    tracing::info!(
        seed = options.sim.seed,
        realtime = options.realtime,
        max_ticks = ?options.max_ticks,
        "game loop started"
    );
    if audio.is_none() {
        tracing::warn!("no audio sink attached; sound cues will be dropped");
    }

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(ticks = stats.ticks, "game loop shut down");
                    return stats;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return stats,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(DT);
        stats.ticks += 1;

        // 3. Audio cues
        dispatch_audio(
            &mut audio,
            &snapshot.audio_events,
            &mut stats,
        );

        // 4. HUD
        if let Ok(mut hud) = hud.lock() {
            hud.apply_all(&snapshot.ui_events);
        }

        // 5. Steering for the next tick
        if let Some(pilot) = autopilot.as_mut() {
            if let Some(cmd) = pilot.steer(&snapshot, DT) {
                engine.queue_command(cmd);
            }
        }

        let finished = (options.stop_on_game_over && snapshot.phase == GamePhase::GameOver)
            || options.max_ticks.is_some_and(|max| stats.ticks >= max);

        // 6. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished {
            tracing::info!(ticks = stats.ticks, "game loop finished");
            return stats;
        }

        // 7. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind: reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

/// Send cues to the sink, or count them as dropped when there is none.
fn dispatch_audio(
    sink: &mut Option<Box<dyn AudioSink>>,
    events: &[AudioEvent],
    stats: &mut LoopStats,
) {
    if events.is_empty() {
        return;
    }
    match sink.as_mut() {
        Some(sink) => {
            for event in events {
                sink.play(event);
            }
            stats.audio_played += events.len() as u64;
        }
        None => stats.audio_dropped += events.len() as u64,
    }
}
