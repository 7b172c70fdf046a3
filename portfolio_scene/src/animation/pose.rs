//! Pure per-frame pose math: `(entity, motion, previous pose, elapsed) -> pose`.

use bevy::prelude::*;

use crate::error::AnimationError;
use crate::scene::{AnimatedEntity, Pose};

pub const ORB_PITCH_AMPLITUDE: f32 = 0.2;
pub const ORB_BOB_AMPLITUDE: f32 = 0.1;
pub const PLANET_ORBIT_RADIUS: f32 = 2.0;

/// Per-entity animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Spins about Y, nods about X and bobs vertically around its base.
    Orb {
        pitch_amplitude: f32,
        bob_amplitude: f32,
    },
    /// Spins on two axes and traces a three-axis Lissajous orbit.
    Planet { orbit_radius: f32 },
    /// Constant per-frame increments on each Euler axis; position fixed.
    Tumble { rates: Vec3 },
    /// Keeps its base pose. Only a float drift moves it.
    Still,
}

impl Motion {
    pub fn orb() -> Self {
        Self::Orb {
            pitch_amplitude: ORB_PITCH_AMPLITUDE,
            bob_amplitude: ORB_BOB_AMPLITUDE,
        }
    }

    pub fn planet() -> Self {
        Self::Planet {
            orbit_radius: PLANET_ORBIT_RADIUS,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Orb { .. } => "orb",
            Self::Planet { .. } => "planet",
            Self::Tumble { .. } => "tumble",
            Self::Still => "still",
        }
    }
}

/// Slow sway of an entity's whole frame: a small rotation about the scene
/// origin plus a vertical lift, both periodic in `(offset + elapsed) / 4 * speed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatDrift {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Start of this entity's cycle, so neighbours don't sway together.
    pub offset: f32,
}

impl FloatDrift {
    /// Sway angles (XYZ Euler) and lift at `elapsed`.
    pub fn at(&self, elapsed: f32) -> (Vec3, f32) {
        let t = (self.offset + elapsed) / 4.0 * self.speed;
        let sway = Vec3::new(t.cos() / 8.0, t.sin() / 8.0, t.sin() / 20.0) * self.rotation_intensity;
        let lift = t.sin() / 10.0 * self.float_intensity;
        (sway, lift)
    }

    fn is_finite(&self) -> bool {
        [
            self.speed,
            self.rotation_intensity,
            self.float_intensity,
            self.offset,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Computes the next pose of `entity`.
///
/// Spin is accumulated from `previous`; every other component is a function
/// of `elapsed` and the entity's base configuration only.
pub fn advance_pose(
    entity: &AnimatedEntity,
    motion: &Motion,
    previous: &Pose,
    elapsed: f32,
) -> Result<Pose, AnimationError> {
    ensure_finite(entity, "elapsed time", elapsed)?;
    ensure_finite(entity, "angular speed", entity.angular_speed)?;
    ensure_finite(entity, "phase offset", entity.phase_offset)?;
    if !entity.base_position.is_finite() {
        return Err(AnimationError::NonFinite {
            id: entity.id,
            field: "base position",
        });
    }

    let pose = match *motion {
        Motion::Orb {
            pitch_amplitude,
            bob_amplitude,
        } => {
            let phase = entity.phase_offset;
            Pose {
                translation: entity.base_position
                    + Vec3::Y * (elapsed + phase).sin() * bob_amplitude,
                pitch: (elapsed * 0.5 + phase).sin() * pitch_amplitude,
                yaw: previous.yaw + entity.angular_speed,
                ..*previous
            }
        }
        Motion::Planet { orbit_radius } => {
            let speed = entity.angular_speed;
            let offset = Vec3::new(
                (elapsed * speed * 10.0).cos() * orbit_radius * 0.3,
                (elapsed * speed * 8.0).sin() * orbit_radius * 0.2,
                (elapsed * speed * 6.0).sin() * orbit_radius * 0.1,
            );
            Pose {
                translation: entity.base_position + offset,
                pitch: previous.pitch + speed * 0.5,
                yaw: previous.yaw + speed,
                ..*previous
            }
        }
        Motion::Tumble { rates } => {
            if !rates.is_finite() {
                return Err(AnimationError::NonFinite {
                    id: entity.id,
                    field: "tumble rates",
                });
            }
            Pose {
                translation: entity.base_position,
                pitch: previous.pitch + rates.x,
                yaw: previous.yaw + rates.y,
                roll: previous.roll + rates.z,
                ..*previous
            }
        }
        Motion::Still => Pose {
            translation: entity.base_position,
            ..*previous
        },
    };

    let pose = match &entity.drift {
        Some(drift) => {
            if !drift.is_finite() {
                return Err(AnimationError::NonFinite {
                    id: entity.id,
                    field: "float drift",
                });
            }
            let (sway, lift) = drift.at(elapsed);
            Pose { sway, lift, ..pose }
        }
        None => pose,
    };

    if !pose.translation.is_finite() || !pose.pitch.is_finite() || !pose.yaw.is_finite() {
        return Err(AnimationError::NonFinite {
            id: entity.id,
            field: motion.name(),
        });
    }
    Ok(pose)
}

/// Orientation that points an object's -Z axis at `target`, Y up.
///
/// Returns `None` when the two points coincide (no defined direction).
pub fn face_towards(from: Vec3, target: Vec3) -> Option<Quat> {
    let forward = target - from;
    if forward.length_squared() <= f32::EPSILON || !forward.is_finite() {
        return None;
    }
    Some(Transform::from_translation(from).looking_at(target, Vec3::Y).rotation)
}

fn ensure_finite(entity: &AnimatedEntity, field: &'static str, value: f32) -> Result<(), AnimationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnimationError::NonFinite {
            id: entity.id,
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityId, EntityKind};

    fn orb(id: u32, phase_offset: f32) -> AnimatedEntity {
        AnimatedEntity {
            id: EntityId(id),
            kind: EntityKind::Orb,
            label: None,
            base_position: Vec3::new(1.2, 0.8, 0.0),
            color: Color::WHITE,
            size: 0.3,
            angular_speed: 0.01,
            phase_offset,
            drift: None,
        }
    }

    fn planet(angular_speed: f32) -> AnimatedEntity {
        AnimatedEntity {
            id: EntityId(7),
            kind: EntityKind::Planet,
            label: None,
            base_position: Vec3::new(-6.0, 3.0, -8.0),
            color: Color::WHITE,
            size: 1.2,
            angular_speed,
            phase_offset: 0.0,
            drift: None,
        }
    }

    fn drifting_rock(offset: f32) -> AnimatedEntity {
        AnimatedEntity {
            id: EntityId(9),
            kind: EntityKind::Asteroid,
            label: None,
            base_position: Vec3::new(4.0, 0.0, 0.0),
            color: Color::WHITE,
            size: 0.2,
            angular_speed: 0.0,
            phase_offset: 0.0,
            drift: Some(FloatDrift {
                speed: 2.0,
                rotation_intensity: 1.0,
                float_intensity: 0.5,
                offset,
            }),
        }
    }

    #[test]
    fn orb_spin_is_monotonic_over_time() {
        let entity = orb(0, 0.0);
        let mut pose = entity.initial_pose();
        let mut last_yaw = pose.yaw;
        for frame in 0..240 {
            let t = frame as f32 / 60.0;
            pose = advance_pose(&entity, &Motion::orb(), &pose, t).unwrap();
            assert!(pose.yaw >= last_yaw);
            last_yaw = pose.yaw;
        }
        assert!((pose.yaw - 2.4).abs() < 1e-4);
    }

    #[test]
    fn orb_pitch_and_bob_stay_bounded() {
        let entity = orb(0, 0.5);
        let mut pose = entity.initial_pose();
        for frame in 0..600 {
            pose = advance_pose(&entity, &Motion::orb(), &pose, frame as f32 * 0.05).unwrap();
            assert!(pose.pitch.abs() <= ORB_PITCH_AMPLITUDE + 1e-6);
            assert!((pose.translation.y - 0.8).abs() <= ORB_BOB_AMPLITUDE + 1e-6);
            assert_eq!(pose.translation.x, 1.2);
        }
    }

    #[test]
    fn orb_pitch_adds_phase_after_halving_the_clock() {
        let entity = orb(0, 1.0);
        let at_zero = advance_pose(&entity, &Motion::orb(), &entity.initial_pose(), 0.0).unwrap();
        assert!((at_zero.pitch - 1.0_f32.sin() * 0.2).abs() < 1e-6);

        let at_two = advance_pose(&entity, &Motion::orb(), &entity.initial_pose(), 2.0).unwrap();
        assert!((at_two.pitch - 2.0_f32.sin() * 0.2).abs() < 1e-6);
        assert!((at_two.translation.y - (0.8 + 3.0_f32.sin() * 0.1)).abs() < 1e-6);
    }

    #[test]
    fn phase_offset_breaks_lockstep() {
        let a = orb(0, 0.0);
        let b = orb(1, 0.5);
        for frame in 0..120 {
            let t = frame as f32 * 0.1;
            let pa = advance_pose(&a, &Motion::orb(), &a.initial_pose(), t).unwrap();
            let pb = advance_pose(&b, &Motion::orb(), &b.initial_pose(), t).unwrap();
            assert_ne!(pa.translation.y, pb.translation.y, "lockstep at t={t}");
        }
    }

    #[test]
    fn planet_orbit_matches_composite_formula() {
        let entity = planet(0.008);
        let t = 12.5;
        let pose = advance_pose(&entity, &Motion::planet(), &entity.initial_pose(), t).unwrap();
        let expected = Vec3::new(
            -6.0 + (t * 0.08).cos() * 0.6,
            3.0 + (t * 0.064).sin() * 0.4,
            -8.0 + (t * 0.048).sin() * 0.2,
        );
        assert!(pose.translation.distance(expected) < 1e-5);
        assert!((pose.yaw - 0.008).abs() < 1e-7);
        assert!((pose.pitch - 0.004).abs() < 1e-7);
    }

    #[test]
    fn tumble_keeps_position() {
        let mut entity = planet(0.0);
        entity.kind = EntityKind::Nebula;
        let motion = Motion::Tumble {
            rates: Vec3::new(0.0005, 0.0008, 0.0003),
        };
        let pose = advance_pose(&entity, &motion, &entity.initial_pose(), 3.0).unwrap();
        assert_eq!(pose.translation, entity.base_position);
        assert!((pose.roll - 0.0003).abs() < 1e-9);
    }

    #[test]
    fn still_entity_only_moves_with_its_drift() {
        let mut entity = drifting_rock(0.0);
        let pose = advance_pose(&entity, &Motion::Still, &entity.initial_pose(), 1.0).unwrap();
        assert_eq!(pose.translation, entity.base_position);
        assert_eq!((pose.pitch, pose.yaw, pose.roll), (0.0, 0.0, 0.0));
        assert!(pose.lift != 0.0);

        entity.drift = None;
        let pose = advance_pose(&entity, &Motion::Still, &entity.initial_pose(), 1.0).unwrap();
        assert_eq!(pose, entity.initial_pose());
    }

    #[test]
    fn drift_peaks_a_quarter_cycle_in() {
        // (0 + π) / 4 * 2 = π/2
        let (sway, lift) = drifting_rock(0.0).drift.unwrap().at(std::f32::consts::PI);
        assert!(sway.x.abs() < 1e-6);
        assert!((sway.y - 0.125).abs() < 1e-6);
        assert!((sway.z - 0.05).abs() < 1e-6);
        assert!((lift - 0.05).abs() < 1e-6);
    }

    #[test]
    fn drift_offsets_desynchronise_neighbours() {
        let a = drifting_rock(0.0).drift.unwrap();
        let b = drifting_rock(37.0).drift.unwrap();
        for frame in 0..100 {
            let t = frame as f32 * 0.1;
            assert!(a.at(t).1.abs() <= 0.05 + 1e-6);
            assert_ne!(a.at(t), b.at(t), "in step at t={t}");
        }
    }

    #[test]
    fn drifting_frame_swings_about_the_origin() {
        let entity = drifting_rock(0.0);
        let pose = advance_pose(&entity, &Motion::Still, &entity.initial_pose(), 3.0).unwrap();
        let mut transform = Transform::default();
        pose.apply_to(&mut transform);

        let expected = Vec3::Y * pose.lift + pose.frame_rotation() * entity.base_position;
        assert!(transform.translation.distance(expected) < 1e-6);
        // Rotating about the origin keeps the distance from it, lift aside.
        let unlifted = transform.translation - Vec3::Y * pose.lift;
        assert!((unlifted.length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn non_finite_drift_is_rejected() {
        let mut entity = drifting_rock(0.0);
        if let Some(drift) = entity.drift.as_mut() {
            drift.speed = f32::INFINITY;
        }
        let err = advance_pose(&entity, &Motion::Still, &entity.initial_pose(), 1.0).unwrap_err();
        assert_eq!(
            err,
            AnimationError::NonFinite {
                id: EntityId(9),
                field: "float drift"
            }
        );
    }

    #[test]
    fn non_finite_elapsed_is_rejected() {
        let entity = orb(3, 0.0);
        let err = advance_pose(&entity, &Motion::orb(), &entity.initial_pose(), f32::NAN).unwrap_err();
        assert_eq!(
            err,
            AnimationError::NonFinite {
                id: EntityId(3),
                field: "elapsed time"
            }
        );
    }

    #[test]
    fn face_towards_points_negative_z_at_target() {
        let rotation = face_towards(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)).unwrap();
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.distance(Vec3::Z) < 1e-5);
        assert!(face_towards(Vec3::ONE, Vec3::ONE).is_none());
    }
}
