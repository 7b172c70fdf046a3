//! Scene composer: turns a preset into entities, lights, camera and backdrop.
//!
//! All randomness in a scene comes from the composer's generator and is spent
//! here, once. Supplying a seed makes composition reproducible.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{FloatDrift, Motion};
use crate::scene::materials::parse_color;
use crate::scene::presets::{self, BackgroundSpec, CameraSpec, FloatDef, LightSpec, ScenePreset};
use crate::scene::sparkles::{generate_sparkles, SparkleSpec};
use crate::scene::{AnimatedEntity, EntityId, EntityKind};

/// A fully composed scene, ready to be handed to the render host.
#[derive(Clone, Debug)]
pub struct ComposedScene {
    pub preset: ScenePreset,
    pub entities: Vec<(AnimatedEntity, Motion)>,
    pub lights: Vec<LightSpec>,
    pub camera: CameraSpec,
    pub background: BackgroundSpec,
    /// Point positions of each star shell; empty for scenes without stars.
    pub star_shells: Vec<Vec<Vec3>>,
    /// Sparkle clouds keyed by the planet they surround.
    pub sparkles: Vec<(EntityId, Vec<SparkleSpec>)>,
}

#[derive(Resource)]
pub struct SceneComposer {
    rng: StdRng,
    next_id: u32,
}

impl SceneComposer {
    /// A composer seeded from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, next_id: 0 }
    }

    pub fn compose(&mut self, preset: ScenePreset) -> ComposedScene {
        let (entities, star_shells, sparkles) = match preset {
            ScenePreset::Toolkit => (self.toolkit_orbs(), Vec::new(), Vec::new()),
            ScenePreset::Space => {
                let mut entities = self.planets();
                let sparkles = entities
                    .iter()
                    .map(|(planet, _)| {
                        let cloud = generate_sparkles(
                            presets::SPARKLES_PER_PLANET,
                            planet.size,
                            &mut self.rng,
                        );
                        (planet.id, cloud)
                    })
                    .collect();
                entities.push(self.nebula());
                entities.extend(self.asteroids(presets::ASTEROID_COUNT));
                let shells = presets::STAR_SHELLS
                    .iter()
                    .map(|&(count, radius, depth)| self.star_shell(count, radius, depth))
                    .collect();
                (entities, shells, sparkles)
            }
        };
        ComposedScene {
            preset,
            entities,
            lights: presets::lights(preset),
            camera: presets::camera(preset),
            background: presets::background(preset),
            star_shells,
            sparkles,
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn drift(&mut self, def: &FloatDef, speed: f32) -> Option<FloatDrift> {
        Some(FloatDrift {
            speed,
            rotation_intensity: def.rotation_intensity,
            float_intensity: def.float_intensity,
            offset: self.rng.gen_range(0.0..presets::FLOAT_OFFSET_RANGE),
        })
    }

    fn toolkit_orbs(&mut self) -> Vec<(AnimatedEntity, Motion)> {
        presets::TOOLKIT_ORBS
            .iter()
            .enumerate()
            .map(|(index, orb)| {
                let entity = AnimatedEntity {
                    id: self.allocate(),
                    kind: EntityKind::Orb,
                    label: Some(orb.name.to_string()),
                    base_position: Vec3::from_array(orb.position),
                    color: parse_color(orb.color),
                    size: presets::ORB_RADIUS,
                    angular_speed: presets::ORB_SPIN,
                    phase_offset: index as f32 * presets::ORB_PHASE_STEP,
                    drift: self.drift(&presets::ORB_FLOAT, presets::ORB_FLOAT.speed),
                };
                (entity, Motion::orb())
            })
            .collect()
    }

    fn planets(&mut self) -> Vec<(AnimatedEntity, Motion)> {
        presets::SPACE_PLANETS
            .iter()
            .map(|planet| {
                let entity = AnimatedEntity {
                    id: self.allocate(),
                    kind: EntityKind::Planet,
                    label: None,
                    base_position: Vec3::from_array(planet.position),
                    color: parse_color(planet.color),
                    size: planet.size,
                    angular_speed: planet.speed,
                    phase_offset: 0.0,
                    drift: self.drift(&presets::PLANET_FLOAT, presets::PLANET_FLOAT.speed),
                };
                (entity, Motion::planet())
            })
            .collect()
    }

    fn nebula(&mut self) -> (AnimatedEntity, Motion) {
        let entity = AnimatedEntity {
            id: self.allocate(),
            kind: EntityKind::Nebula,
            label: None,
            base_position: presets::NEBULA_POSITION,
            color: parse_color(presets::NEBULA_COLOR).with_alpha(presets::NEBULA_ALPHA),
            size: presets::NEBULA_SCALE,
            angular_speed: presets::NEBULA_TUMBLE.y,
            phase_offset: 0.0,
            drift: None,
        };
        (
            entity,
            Motion::Tumble {
                rates: presets::NEBULA_TUMBLE,
            },
        )
    }

    fn asteroids(&mut self, count: usize) -> Vec<(AnimatedEntity, Motion)> {
        let color = parse_color(presets::ASTEROID_COLOR);
        (0..count)
            .map(|_| {
                let half = presets::ASTEROID_SPREAD / 2.0;
                let position = Vec3::new(
                    self.rng.gen_range(-half..half),
                    self.rng.gen_range(-half..half),
                    self.rng.gen_range(-half..half),
                );
                let scale = self.rng.gen_range(0.1..0.4);
                let speed = self.rng.gen_range(0.01..0.03);
                let entity = AnimatedEntity {
                    id: self.allocate(),
                    kind: EntityKind::Asteroid,
                    label: None,
                    base_position: position,
                    color,
                    size: scale,
                    angular_speed: 0.0,
                    phase_offset: 0.0,
                    drift: self.drift(&presets::ASTEROID_FLOAT, speed),
                };
                (entity, Motion::Still)
            })
            .collect()
    }

    /// Uniform points on a sphere, pushed outwards by up to `depth`.
    fn star_shell(&mut self, count: usize, radius: f32, depth: f32) -> Vec<Vec3> {
        (0..count)
            .map(|_| {
                let z: f32 = self.rng.gen_range(-1.0..1.0);
                let theta: f32 = self.rng.gen_range(0.0..TAU);
                let ring = (1.0 - z * z).sqrt();
                let r = radius + self.rng.gen_range(0.0..depth);
                Vec3::new(ring * theta.cos(), ring * theta.sin(), z) * r
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolkit_has_six_symmetric_orbs() {
        let scene = SceneComposer::new(Some(1)).compose(ScenePreset::Toolkit);
        assert_eq!(scene.entities.len(), 6);
        assert!(scene.star_shells.is_empty());
        for (entity, _) in &scene.entities {
            let p = entity.base_position;
            assert!(p.x.abs() <= 1.2 && p.y.abs() <= 0.8 && p.z.abs() <= 1.0);
        }
        let centroid: Vec3 =
            scene.entities.iter().map(|(e, _)| e.base_position).sum::<Vec3>() / 6.0;
        assert!(centroid.length() < 1e-6);
        let phases: Vec<f32> = scene.entities.iter().map(|(e, _)| e.phase_offset).collect();
        assert_eq!(phases, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn space_scene_counts_and_bounds() {
        let scene = SceneComposer::new(Some(7)).compose(ScenePreset::Space);
        let count = |kind| scene.entities.iter().filter(|(e, _)| e.kind == kind).count();
        assert_eq!(count(EntityKind::Planet), 6);
        assert_eq!(count(EntityKind::Nebula), 1);
        assert_eq!(count(EntityKind::Asteroid), presets::ASTEROID_COUNT);

        for (entity, _) in scene.entities.iter().filter(|(e, _)| e.kind == EntityKind::Planet) {
            let p = entity.base_position;
            assert!(p.x.abs() <= 8.0 && p.y.abs() <= 8.0);
            assert!(p.z < 0.0);
        }
        for (entity, motion) in scene.entities.iter().filter(|(e, _)| e.kind == EntityKind::Asteroid) {
            assert!((0.1..0.4).contains(&entity.size));
            let drift = entity.drift.expect("asteroids float");
            assert!((0.01..0.03).contains(&drift.speed));
            assert_eq!(*motion, Motion::Still);
            assert!(entity.base_position.abs().max_element() <= 20.0);
        }
        let nebula = scene
            .entities
            .iter()
            .find(|(e, _)| e.kind == EntityKind::Nebula)
            .map(|(e, _)| e)
            .unwrap();
        assert!(nebula.drift.is_none());
        assert_eq!(scene.star_shells.len(), 2);
        assert_eq!(scene.star_shells[0].len(), 5000);
        assert!(scene.star_shells[1]
            .iter()
            .all(|p| (100.0..=130.0 + 1e-3).contains(&p.length())));
    }

    #[test]
    fn every_planet_gets_a_sparkle_cloud() {
        let scene = SceneComposer::new(Some(7)).compose(ScenePreset::Space);
        let planets: Vec<&AnimatedEntity> = scene
            .entities
            .iter()
            .filter(|(e, _)| e.kind == EntityKind::Planet)
            .map(|(e, _)| e)
            .collect();
        assert_eq!(scene.sparkles.len(), planets.len());
        for ((id, cloud), planet) in scene.sparkles.iter().zip(&planets) {
            assert_eq!(*id, planet.id);
            assert_eq!(cloud.len(), presets::SPARKLES_PER_PLANET);
            assert!(cloud
                .iter()
                .all(|s| s.anchor.abs().max_element() <= planet.size + 1e-6));
        }
        assert!(SceneComposer::new(Some(7))
            .compose(ScenePreset::Toolkit)
            .sparkles
            .is_empty());
    }

    #[test]
    fn drift_cycles_are_spread_out() {
        let scene = SceneComposer::new(Some(12)).compose(ScenePreset::Toolkit);
        let offsets: Vec<f32> = scene
            .entities
            .iter()
            .map(|(e, _)| e.drift.expect("orbs float").offset)
            .collect();
        assert!(offsets.iter().all(|o| (0.0..presets::FLOAT_OFFSET_RANGE).contains(o)));
        assert!(offsets.windows(2).all(|w| w[0] != w[1]));
        let drift = scene.entities[0].0.drift.unwrap();
        assert_eq!((drift.speed, drift.rotation_intensity, drift.float_intensity), (2.0, 0.5, 0.8));
    }

    #[test]
    fn seeded_composition_is_reproducible() {
        let a = SceneComposer::new(Some(42)).compose(ScenePreset::Space);
        let b = SceneComposer::new(Some(42)).compose(ScenePreset::Space);
        let positions = |s: &ComposedScene| -> Vec<Vec3> {
            s.entities.iter().map(|(e, _)| e.base_position).collect()
        };
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.star_shells, b.star_shells);
        assert_eq!(a.sparkles, b.sparkles);
    }

    #[test]
    fn ids_are_unique_across_scenes() {
        let mut composer = SceneComposer::new(Some(3));
        let toolkit = composer.compose(ScenePreset::Toolkit);
        let space = composer.compose(ScenePreset::Space);
        let mut ids: Vec<EntityId> = toolkit
            .entities
            .iter()
            .chain(space.entities.iter())
            .map(|(e, _)| e.id)
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
