//! Simulation engine for EGGSTORM.
//!
//! Owns the hecs ECS world, drives the session/wave controller and the
//! player control loop each tick, and produces `GameStateSnapshot`s.

pub mod engine;
pub mod outbox;
pub mod player;
pub mod rng;
pub mod session;
pub mod systems;
pub mod timers;
pub mod ui;
pub mod world_setup;

pub use eggstorm_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
