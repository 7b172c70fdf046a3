//! Auto-rotating orbit camera for the space backdrop. Pan and zoom are never
//! applied; drag-to-rotate only when the camera is marked interactive.

use std::f32::consts::{PI, TAU};

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

const DRAG_RADIANS_PER_PIXEL: f32 = 0.005;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around Y, radians. Zero looks down -Z from +Z.
    pub azimuth: f32,
    /// Angle from +Y, radians.
    pub polar: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    /// Full turns per minute, matching the usual orbit-controls convention.
    pub auto_rotate_speed: f32,
    pub auto_rotate: bool,
    pub interactive: bool,
}

impl OrbitCamera {
    /// An orbit that starts at `position`, looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            min_polar: PI / 2.2,
            max_polar: PI / 1.8,
            auto_rotate_speed: 0.3,
            auto_rotate: true,
            interactive: false,
        }
    }

    /// Advances the orbit by `dt` seconds plus an optional pointer drag in pixels.
    pub fn step(&mut self, dt: f32, drag: Vec2) {
        if self.auto_rotate && dt.is_finite() && dt > 0.0 {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }
        if self.interactive && drag.is_finite() {
            self.azimuth -= drag.x * DRAG_RADIANS_PER_PIXEL;
            self.polar -= drag.y * DRAG_RADIANS_PER_PIXEL;
        }
        self.azimuth = self.azimuth.rem_euclid(TAU);
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
    }

    pub fn transform(&self) -> Transform {
        let position = orbit_position(self.target, self.radius, self.azimuth, self.polar);
        Transform::from_translation(position).looking_at(self.target, Vec3::Y)
    }
}

pub fn orbit_position(target: Vec3, radius: f32, azimuth: f32, polar: f32) -> Vec3 {
    target
        + radius
            * Vec3::new(
                polar.sin() * azimuth.sin(),
                polar.cos(),
                polar.sin() * azimuth.cos(),
            )
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(Update, orbit_camera_system);
}

fn orbit_camera_system(
    time: Res<Time>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let dragging = mouse.is_some_and(|m| m.pressed(MouseButton::Left));
    let drag = match (dragging, motion) {
        (true, Some(motion)) => motion.delta,
        _ => Vec2::ZERO,
    };
    for (mut orbit, mut tf) in &mut cameras {
        orbit.step(time.delta_secs(), drag);
        *tf = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_where_the_camera_was_placed() {
        let orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
        assert!((orbit.radius - 12.0).abs() < 1e-6);
        assert!(orbit.transform().translation.distance(Vec3::new(0.0, 0.0, 12.0)) < 1e-4);
    }

    #[test]
    fn auto_rotation_keeps_radius_and_advances() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
        let before = orbit.transform().translation;
        orbit.step(1.0, Vec2::ZERO);
        let after = orbit.transform().translation;
        assert!((after.length() - 12.0).abs() < 1e-4);
        assert!(before.distance(after) > 0.1);
    }

    #[test]
    fn drag_is_ignored_unless_interactive() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
        orbit.auto_rotate = false;
        orbit.step(0.016, Vec2::new(200.0, 0.0));
        assert_eq!(orbit.azimuth, 0.0);

        orbit.interactive = true;
        orbit.step(0.016, Vec2::new(0.0, -10_000.0));
        assert!((orbit.polar - orbit.max_polar).abs() < 1e-6);
    }
}
