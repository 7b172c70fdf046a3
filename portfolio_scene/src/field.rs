//! Ambient particle and star fields: randomly placed decorative points with
//! independent timing, generated once per distinct count.

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hard cap on overlay particles.
pub const MAX_PARTICLES: usize = 100;

/// One pulsing dot over the toolkit panel. Positions are percentages of the
/// panel, times are seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub left_percent: f32,
    pub top_percent: f32,
    pub delay_secs: f32,
    pub duration_secs: f32,
}

/// One twinkling star behind the skills section.
#[derive(Clone, Debug, PartialEq)]
pub struct StarSpec {
    pub left_percent: f32,
    pub top_percent: f32,
    pub size_px: f32,
    pub opacity: f32,
    pub delay_secs: f32,
    pub duration_secs: f32,
}

pub fn generate_particles(count: usize, rng: &mut impl Rng) -> Vec<ParticleSpec> {
    (0..count.min(MAX_PARTICLES))
        .map(|_| ParticleSpec {
            left_percent: rng.gen_range(0.0..100.0),
            top_percent: rng.gen_range(0.0..100.0),
            delay_secs: rng.gen_range(0.0..2.0),
            duration_secs: rng.gen_range(2.0..5.0),
        })
        .collect()
}

pub fn generate_stars(count: usize, rng: &mut impl Rng) -> Vec<StarSpec> {
    (0..count)
        .map(|_| StarSpec {
            left_percent: rng.gen_range(0.0..100.0),
            top_percent: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(0.7..2.2),
            duration_secs: rng.gen_range(1.5..3.5),
            delay_secs: rng.gen_range(0.0..4.0),
            opacity: rng.gen_range(0.5..1.0),
        })
        .collect()
}

impl ParticleSpec {
    /// Opacity at page time `t`: full until the delay passes, then a smooth
    /// pulse between 0.5 and 1.0 with this particle's period.
    pub fn opacity_at(&self, t: f32) -> f32 {
        let local = t - self.delay_secs;
        if local <= 0.0 || self.duration_secs <= 0.0 {
            return 1.0;
        }
        let phase = (local / self.duration_secs).fract();
        0.75 + 0.25 * (phase * TAU).cos()
    }
}

impl StarSpec {
    /// `(opacity, scale)` at page time `t`. Alternates 0.7 → 1.0 → 0.7 of the
    /// star's own opacity, growing to 1.2× at the peak.
    pub fn twinkle_at(&self, t: f32) -> (f32, f32) {
        let local = t - self.delay_secs;
        if local <= 0.0 || self.duration_secs <= 0.0 {
            return (self.opacity, 1.0);
        }
        let phase = (local / self.duration_secs).fract();
        let peak = 0.5 - 0.5 * (phase * TAU).cos();
        (self.opacity * (0.7 + 0.3 * peak), 1.0 + 0.2 * peak)
    }
}

/// Generated fields memoised by requested count. Asking again with the same
/// count returns the same points; a new count generates a new set once.
#[derive(Resource)]
pub struct FieldCache {
    rng: StdRng,
    particles: HashMap<usize, Vec<ParticleSpec>>,
    stars: HashMap<usize, Vec<StarSpec>>,
}

impl FieldCache {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            particles: HashMap::new(),
            stars: HashMap::new(),
        }
    }

    pub fn particles(&mut self, count: usize) -> &[ParticleSpec] {
        let rng = &mut self.rng;
        self.particles
            .entry(count)
            .or_insert_with(|| generate_particles(count, rng))
    }

    pub fn stars(&mut self, count: usize) -> &[StarSpec] {
        let rng = &mut self.rng;
        self.stars
            .entry(count)
            .or_insert_with(|| generate_stars(count, rng))
    }
}
