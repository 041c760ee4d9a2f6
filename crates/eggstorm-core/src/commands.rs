//! Commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player/frontend actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Reset and begin a new session.
    StartGame,
    /// End the active session.
    StopGame,
    /// Movement intent on two axes, each in [-1, 1]. Held until replaced.
    SetMoveIntent { x: f32, z: f32 },
}
