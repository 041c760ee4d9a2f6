//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they need. They do not own state.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod movement;
pub mod player_control;
pub mod snapshot;
pub mod wave_spawner;
