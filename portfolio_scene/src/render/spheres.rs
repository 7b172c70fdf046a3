use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::RenderLayers;

use crate::render::EntityRenderer;
use crate::scene::labels::{Billboard, OrbLabel};
use crate::scene::presets::{ScenePreset, ORB_LABEL_OFFSET};
use crate::scene::{
    materials, AnimatedEntity, EntityKind, MountedBy, SceneEntity, Sparkle, SparkleSpec,
};

#[derive(Clone, Debug)]
pub struct SphereRendererSettings {
    /// UV sphere resolution for orbs and planets: (sectors, stacks).
    pub sphere_resolution: (u32, u32),
    pub nebula_resolution: (u32, u32),
    /// Icosphere subdivisions for asteroids; 0 gives a faceted rock.
    pub asteroid_subdivisions: u32,
}

impl Default for SphereRendererSettings {
    fn default() -> Self {
        Self {
            sphere_resolution: (32, 32),
            nebula_resolution: (64, 64),
            asteroid_subdivisions: 0,
        }
    }
}

/// Renders every entity as a unit sphere scaled by its size.
#[derive(Default)]
pub struct SphereRenderer {
    pub settings: SphereRendererSettings,
}

impl SphereRenderer {
    fn mesh_for(&self, kind: EntityKind) -> Mesh {
        let sphere = Sphere::new(1.0);
        match kind {
            EntityKind::Orb | EntityKind::Planet => {
                let (sectors, stacks) = self.settings.sphere_resolution;
                sphere.mesh().uv(sectors, stacks)
            }
            EntityKind::Nebula => {
                let (sectors, stacks) = self.settings.nebula_resolution;
                sphere.mesh().uv(sectors, stacks)
            }
            EntityKind::Asteroid => match sphere.mesh().ico(self.settings.asteroid_subdivisions) {
                Ok(mesh) => mesh,
                Err(err) => {
                    warn!("portfolio: asteroid mesh: {err}, using a uv sphere");
                    sphere.mesh().uv(8, 6)
                }
            },
        }
    }
}

impl EntityRenderer for SphereRenderer {
    fn spawn_entity(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials_res: &mut Assets<StandardMaterial>,
        entity: &AnimatedEntity,
        layer: &RenderLayers,
    ) -> Entity {
        let material = materials::entity_material(materials_res, entity);
        let mut transform = Transform::from_scale(Vec3::splat(entity.size));
        entity.initial_pose().apply_to(&mut transform);

        let handle = commands
            .spawn((
                Mesh3d(meshes.add(self.mesh_for(entity.kind))),
                MeshMaterial3d(material),
                transform,
                Visibility::Visible,
                layer.clone(),
                SceneEntity(entity.id),
            ))
            .id();

        if let (EntityKind::Orb, Some(text)) = (entity.kind, &entity.label) {
            let anchor = entity.base_position + ORB_LABEL_OFFSET;
            commands.spawn((
                OrbLabel {
                    text: text.clone(),
                    owner: entity.id,
                    anchor,
                },
                Billboard {
                    scene: ScenePreset::Toolkit,
                },
                MountedBy(ScenePreset::Toolkit),
                Transform::from_translation(entity.initial_pose().carry(anchor)),
                Visibility::Visible,
                layer.clone(),
            ));
        }

        handle
    }

    fn spawn_sparkles(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials_res: &mut Assets<StandardMaterial>,
        host: Entity,
        entity: &AnimatedEntity,
        sparkles: &[SparkleSpec],
        layer: &RenderLayers,
    ) {
        if sparkles.is_empty() {
            return;
        }
        let mesh = meshes.add(Sphere::new(1.0).mesh().ico(1).unwrap_or_else(|_| {
            Sphere::new(1.0).mesh().uv(6, 4)
        }));
        let material = materials::sparkle_material(materials_res, entity.color);
        commands.entity(host).with_children(|parent| {
            for &spec in sparkles {
                let sparkle = Sparkle {
                    spec,
                    host_size: entity.size,
                };
                parent.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    sparkle.local_transform(0.0),
                    Visibility::Inherited,
                    layer.clone(),
                    sparkle,
                ));
            }
        });
    }

    fn spawn_star_shell(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials_res: &mut Assets<StandardMaterial>,
        points: &[Vec3],
        layer: &RenderLayers,
    ) -> Option<Entity> {
        if points.is_empty() {
            return None;
        }
        let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
        let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);

        Some(
            commands
                .spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(materials::star_material(materials_res)),
                    Transform::IDENTITY,
                    Visibility::Visible,
                    layer.clone(),
                ))
                .id(),
        )
    }
}
