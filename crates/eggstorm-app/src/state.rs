//! State shared between the game loop thread and its owner.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::state::GameStateSnapshot;
use eggstorm_sim::ui::Hud;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// The snapshot and HUD are written by the loop thread after each tick and
/// read by the host whenever it likes.
pub struct AppState {
    /// Channel sender to the game loop. `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub hud: Arc<Mutex<Hud>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            hud: Arc::new(Mutex::new(Hud::default())),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command to the loop. Returns false if no loop is
    /// running or it has already exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(guard) = self.command_tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::PlayerCommand(command)).is_ok(),
            None => false,
        }
    }

    /// Ask the loop to stop. Safe to call more than once.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.command_tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
