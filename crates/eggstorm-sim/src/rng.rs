//! Randomness collaborator: uniform values and unit-sphere directions.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Source of the two random quantities the game needs.
pub trait RandomSource: Send {
    /// Uniform value in [0, 1).
    fn value(&mut self) -> f32;

    /// Uniform point on the unit sphere surface.
    fn on_unit_sphere(&mut self) -> Vec3;
}

impl RandomSource for ChaCha8Rng {
    fn value(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn on_unit_sphere(&mut self) -> Vec3 {
        // Archimedes: uniform height and uniform azimuth.
        let y: f32 = self.gen_range(-1.0..=1.0);
        let theta: f32 = self.gen_range(0.0..TAU);
        let ring = (1.0 - y * y).max(0.0).sqrt();
        Vec3::new(ring * theta.cos(), y, ring * theta.sin())
    }
}

/// Replays scripted values, then repeats the last one. Used to pin drop
/// rolls and spawn directions.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: VecDeque<f32>,
    directions: VecDeque<Vec3>,
    last_value: f32,
    last_direction: Option<Vec3>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_directions(mut self, directions: impl IntoIterator<Item = Vec3>) -> Self {
        self.directions = directions.into_iter().collect();
        self
    }
}

impl RandomSource for SequenceRandom {
    fn value(&mut self) -> f32 {
        if let Some(v) = self.values.pop_front() {
            self.last_value = v;
        }
        self.last_value
    }

    fn on_unit_sphere(&mut self) -> Vec3 {
        if let Some(d) = self.directions.pop_front() {
            self.last_direction = Some(d);
        }
        self.last_direction.unwrap_or(Vec3::X)
    }
}
