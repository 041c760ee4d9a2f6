//! eggstorm: headless session runner.
//!
//! Usage:
//!   eggstorm [--config <file.json>] [--seed <n>] [--seconds <n>] [--realtime]
//!            [--snapshot-out <file.json>] [--mute]

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use eggstorm_app::audio::{AudioSink, CountingAudioSink};
use eggstorm_app::game_loop::{spawn_game_loop, LoopOptions};
use eggstorm_app::state::AppState;
use eggstorm_core::config::GameConfig;
use eggstorm_core::constants::TICK_RATE;
use eggstorm_core::enums::SoundCue;
use eggstorm_sim::engine::SimConfig;
use eggstorm_sim::ui::StartButton;

#[derive(Debug, Parser)]
#[command(name = "eggstorm")]
#[command(about = "Run a headless EGGSTORM session under autopilot and print a summary")]
struct Cli {
    /// JSON file with tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value_t = 120)]
    seconds: u32,

    /// Pace ticks to 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final snapshot as pretty JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Run without an audio sink
    #[arg(long)]
    mute: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let game = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    let mut button = StartButton::new();
    let (start, click) = button
        .press()
        .ok_or_else(|| anyhow!("start button is not available"))?;

    let counter = CountingAudioSink::new();
    let sink: Option<Box<dyn AudioSink>> = if cli.mute {
        None
    } else {
        let mut sink = counter.clone();
        sink.play(&click);
        Some(Box::new(sink))
    };

    let state = AppState::new();
    let options = LoopOptions {
        sim: SimConfig {
            seed: cli.seed,
            game,
        },
        realtime: cli.realtime,
        max_ticks: Some(u64::from(cli.seconds) * u64::from(TICK_RATE)),
        stop_on_game_over: true,
        autopilot: true,
        initial_commands: vec![start],
    };

    let handle = spawn_game_loop(options, &state, sink).context("failed to spawn game loop")?;
    let stats = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    let snapshot = state
        .snapshot()
        .ok_or_else(|| anyhow!("game loop exited before the first tick"))?;
    let hud = state
        .hud
        .lock()
        .map_err(|_| anyhow!("HUD state poisoned"))?
        .clone();

    println!("Session finished.");
    println!("  Seed:          {}", cli.seed);
    println!("  Phase:         {:?}", snapshot.phase);
    println!("  Ticks:         {}", stats.ticks);
    println!("  Elapsed:       {:.2}s", snapshot.time.elapsed_secs);
    println!("  Wave:          {}", snapshot.session.wave_number);
    println!("  {}", hud.score_text);
    println!(
        "  Hits taken:    {}/{}",
        snapshot.player.hit_count, snapshot.player.hit_limit
    );
    println!("  Enemies alive: {}", snapshot.enemies.len());
    if cli.mute {
        println!("  Audio:         muted ({} cues dropped)", stats.audio_dropped);
    } else {
        println!(
            "  Audio:         {} cues ({} shots, {} collisions, {} pickups)",
            counter.total(),
            counter.count(SoundCue::Fire),
            counter.count(SoundCue::Collision),
            counter.count(SoundCue::ScorePickup) + counter.count(SoundCue::Powerup),
        );
    }

    if let Some(path) = &cli.snapshot_out {
        let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
        println!("  Snapshot:      {}", path.display());
    }

    Ok(())
}
