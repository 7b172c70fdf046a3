//! Animated entity definitions: stable ids plus immutable base configuration.

use std::fmt;

use bevy::prelude::*;

use crate::animation::FloatDrift;

/// Stable identity of an animated entity for the lifetime of its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Orb,
    Planet,
    Asteroid,
    Nebula,
}

/// Base configuration of an animated visual object. Never mutated after
/// composition; the live pose lives beside it in the entity table.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub label: Option<String>,
    pub base_position: Vec3,
    pub color: Color,
    pub size: f32,
    /// Spin added to the yaw every frame, in radians.
    pub angular_speed: f32,
    pub phase_offset: f32,
    pub drift: Option<FloatDrift>,
}

/// Live pose. Euler angles are applied in XYZ order.
///
/// `translation` and the three angles are the entity's own motion. `sway`
/// and `lift` move the frame it sits in: that frame is rotated about the
/// scene origin, then raised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub sway: Vec3,
    pub lift: f32,
}

impl Pose {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            sway: Vec3::ZERO,
            lift: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }

    pub fn frame_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.sway.x, self.sway.y, self.sway.z)
    }

    /// Where a point fixed in the drifting frame ends up in the scene.
    pub fn carry(&self, point: Vec3) -> Vec3 {
        Vec3::Y * self.lift + self.frame_rotation() * point
    }

    /// Writes translation and rotation into a host transform, keeping its scale.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.carry(self.translation);
        transform.rotation = self.frame_rotation() * self.rotation();
    }
}

impl AnimatedEntity {
    pub fn initial_pose(&self) -> Pose {
        Pose::at(self.base_position)
    }
}

/// Links a host entity back to its row in the entity table.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneEntity(pub EntityId);
