//! Glittering points that hang around each planet and jitter in place.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::SceneClock;
use crate::scene::presets::{SPARKLE_JITTER, SPARKLE_RADIUS, SPARKLE_SPEED, SPARKLE_SPREAD};

/// One sparkle, relative to its planet's centre in scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleSpec {
    pub anchor: Vec3,
    /// Scales how far along its cycle the sparkle starts.
    pub noise: f32,
}

impl SparkleSpec {
    /// Offset from the planet's centre at `elapsed`.
    pub fn offset_at(&self, elapsed: f32) -> Vec3 {
        let angle = elapsed * SPARKLE_SPEED + self.anchor.x * self.noise * 100.0;
        self.anchor + Vec3::new(angle.cos(), angle.sin(), angle.cos()) * SPARKLE_JITTER
    }
}

/// `count` sparkles spread through a cube `SPARKLE_SPREAD * size` wide.
pub fn generate_sparkles(count: usize, size: f32, rng: &mut impl Rng) -> Vec<SparkleSpec> {
    let half = SPARKLE_SPREAD * size / 2.0;
    (0..count)
        .map(|_| SparkleSpec {
            anchor: Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ),
            noise: rng.gen_range(0.0..1.0),
        })
        .collect()
}

/// A sparkle entity parented to a planet mesh of radius `host_size`. The
/// parent's scale is divided out so sparkles keep their size in scene units.
#[derive(Component, Clone, Copy, Debug)]
pub struct Sparkle {
    pub spec: SparkleSpec,
    pub host_size: f32,
}

impl Sparkle {
    pub fn local_transform(&self, elapsed: f32) -> Transform {
        let inverse = 1.0 / self.host_size.max(f32::EPSILON);
        Transform::from_translation(self.spec.offset_at(elapsed) * inverse)
            .with_scale(Vec3::splat(SPARKLE_RADIUS * inverse))
    }
}

pub fn animate_sparkles(clock: Res<SceneClock>, mut sparkles: Query<(&Sparkle, &mut Transform)>) {
    let elapsed = clock.elapsed();
    for (sparkle, mut tf) in &mut sparkles {
        *tf = sparkle.local_transform(elapsed);
    }
}
