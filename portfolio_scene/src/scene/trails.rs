//! Fading trails behind the planets, drawn with Bevy gizmos.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::animation::animate_entities;
use crate::scene::presets::TRAIL_POINTS;

/// Ring buffer of a planet's recent positions, oldest first.
#[derive(Component, Clone, Debug)]
pub struct Trail {
    pub color: Color,
    points: VecDeque<Vec3>,
    capacity: usize,
}

impl Trail {
    pub fn new(color: Color) -> Self {
        Self::with_capacity(color, TRAIL_POINTS)
    }

    pub fn with_capacity(color: Color, capacity: usize) -> Self {
        Self {
            color,
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `point`, dropping the oldest once full. Repeats of the last
    /// point are skipped so a paused planet doesn't collapse its trail.
    pub fn record(&mut self, point: Vec3) {
        if self.capacity == 0 || self.points.back() == Some(&point) {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with their opacity: 0 at the tail rising quadratically to 1 at
    /// the planet.
    pub fn faded_points(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        let last = self.points.len().saturating_sub(1).max(1) as f32;
        self.points.iter().enumerate().map(move |(i, &point)| {
            let t = i as f32 / last;
            (point, t * t)
        })
    }
}

pub fn trail_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (record_trails, draw_trails).chain().after(animate_entities),
    );
}

pub fn record_trails(mut trails: Query<(&Transform, &mut Trail)>) {
    for (tf, mut trail) in &mut trails {
        trail.record(tf.translation);
    }
}

fn draw_trails(mut gizmos: Gizmos, trails: Query<&Trail>) {
    for trail in &trails {
        if trail.len() < 2 {
            continue;
        }
        gizmos.linestrip_gradient(
            trail
                .faded_points()
                .map(|(point, alpha)| (point, trail.color.with_alpha(alpha))),
        );
    }
}
