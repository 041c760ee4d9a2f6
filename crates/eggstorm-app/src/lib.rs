//! EGGSTORM host application.
//!
//! Runs the simulation on its own thread, routes audio cues to a sink,
//! keeps the HUD model current, and optionally steers the player.

pub mod audio;
pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use eggstorm_core as core;
