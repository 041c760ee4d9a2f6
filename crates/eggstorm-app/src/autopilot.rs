//! Autopilot: a simple steering policy for unattended sessions.
//!
//! Flees enemies inside `threat_radius`, otherwise heads for the nearest
//! pickup, otherwise orbits. Operates on snapshots only, so it sees exactly
//! what a frontend would.

use glam::Vec3;

use eggstorm_core::commands::PlayerCommand;
use eggstorm_core::enums::GamePhase;
use eggstorm_core::state::GameStateSnapshot;

/// Radians per second of the idle orbit.
const ORBIT_RATE: f32 = 0.8;
/// Intents are rounded to this step so small wobbles don't flood the queue.
const INTENT_STEP: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub threat_radius: f32,
    heading: f32,
    last_intent: Option<(f32, f32)>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            threat_radius: 6.0,
            heading: 0.0,
            last_intent: None,
        }
    }
}

impl Autopilot {
    /// Pick a move intent for the next tick. Returns `None` when the intent
    /// is unchanged or no session is running.
    pub fn steer(&mut self, snapshot: &GameStateSnapshot, dt: f32) -> Option<PlayerCommand> {
        if snapshot.phase != GamePhase::Active {
            self.last_intent = None;
            return None;
        }
        let player = flat(snapshot.player.transform.position);

        let direction = self
            .flee(player, snapshot)
            .or_else(|| nearest_pickup(player, snapshot))
            .unwrap_or_else(|| {
                self.heading = (self.heading + ORBIT_RATE * dt) % std::f32::consts::TAU;
                Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
            });

        let intent = (quantize(direction.x), quantize(direction.z));
        if self.last_intent == Some(intent) {
            return None;
        }
        self.last_intent = Some(intent);
        Some(PlayerCommand::SetMoveIntent {
            x: intent.0,
            z: intent.1,
        })
    }

    /// Inverse-square push away from close enemies.
    fn flee(&self, player: Vec3, snapshot: &GameStateSnapshot) -> Option<Vec3> {
        let mut push = Vec3::ZERO;
        for enemy in &snapshot.enemies {
            let offset = player - flat(enemy.position);
            let distance = offset.length();
            if distance > f32::EPSILON && distance < self.threat_radius {
                push += offset / (distance * distance);
            }
        }
        push.try_normalize()
    }
}

fn nearest_pickup(player: Vec3, snapshot: &GameStateSnapshot) -> Option<Vec3> {
    snapshot
        .pickups
        .iter()
        .map(|p| flat(p.transform.position) - player)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .and_then(Vec3::try_normalize)
}

fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

fn quantize(v: f32) -> f32 {
    (v / INTENT_STEP).round() * INTENT_STEP
}
