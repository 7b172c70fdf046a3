//! Mounting and unmounting scenes in the render host.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;

use crate::camera::{OrbitCamera, SceneCamera};
use crate::render::RendererResource;
use crate::scene::materials::parse_color;
use crate::scene::presets::{LightKind, ScenePreset};
use crate::scene::{ComposedScene, EntityKind, EntityTable, SceneComposer, Trail};

/// Unitless light intensities scaled to Bevy's photometric units.
const POINT_LUMENS_PER_UNIT: f32 = 400_000.0;
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 400.0;
const LIGHT_RANGE: f32 = 60.0;

/// Marks every host entity that belongs to a mounted scene, including
/// cameras, lights and star shells that have no table row.
#[derive(Component, Clone, Copy, Debug)]
pub struct MountedBy(pub ScenePreset);

/// Configuration for the space scene's camera behaviour.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct SpaceCameraSettings {
    pub interactive: bool,
}

pub fn spawn_toolkit_scene(
    mut commands: Commands,
    mut composer: ResMut<SceneComposer>,
    mut table: ResMut<EntityTable>,
    renderer: Res<RendererResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    mount_scene(
        ScenePreset::Toolkit,
        &mut commands,
        &mut composer,
        &mut table,
        &renderer,
        &mut meshes,
        &mut materials,
        SpaceCameraSettings::default(),
    );
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_space_scene(
    mut commands: Commands,
    mut composer: ResMut<SceneComposer>,
    mut table: ResMut<EntityTable>,
    renderer: Res<RendererResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Option<Res<SpaceCameraSettings>>,
) {
    mount_scene(
        ScenePreset::Space,
        &mut commands,
        &mut composer,
        &mut table,
        &renderer,
        &mut meshes,
        &mut materials,
        settings.map(|s| *s).unwrap_or_default(),
    );
}

/// Composes `preset` and spawns it. Does nothing when the scene is already
/// mounted, so re-running never regenerates positions or colours.
#[allow(clippy::too_many_arguments)]
pub fn mount_scene(
    preset: ScenePreset,
    commands: &mut Commands,
    composer: &mut SceneComposer,
    table: &mut EntityTable,
    renderer: &RendererResource,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    camera_settings: SpaceCameraSettings,
) -> bool {
    if table.is_mounted(preset) {
        debug!("portfolio: {preset:?} scene already mounted");
        return false;
    }

    let scene = composer.compose(preset);
    let layer = RenderLayers::layer(preset.layer());

    table.mount(preset, scene.entities.iter().cloned());
    for (entity, _) in &scene.entities {
        let handle = renderer
            .0
            .spawn_entity(commands, meshes, materials, entity, &layer);
        commands.entity(handle).insert(MountedBy(preset));
        if entity.kind == EntityKind::Planet {
            commands.entity(handle).insert(Trail::new(entity.color));
        }
        if let Some((_, cloud)) = scene.sparkles.iter().find(|(id, _)| *id == entity.id) {
            renderer
                .0
                .spawn_sparkles(commands, meshes, materials, handle, entity, cloud, &layer);
        }
        table.bind(entity.id, handle);
    }
    for shell in &scene.star_shells {
        if let Some(handle) = renderer
            .0
            .spawn_star_shell(commands, meshes, materials, shell, &layer)
        {
            commands.entity(handle).insert(MountedBy(preset));
        }
    }

    spawn_camera(commands, &scene, &layer, camera_settings);
    spawn_lights(commands, &scene, &layer);

    info!(
        "portfolio: mounted {preset:?} scene with {} entities",
        scene.entities.len()
    );
    true
}

/// Despawns everything `preset` put into the host and drops its table rows.
pub fn unmount_scene(
    preset: ScenePreset,
    commands: &mut Commands,
    table: &mut EntityTable,
    mounted: &Query<(Entity, &MountedBy)>,
) {
    table.unmount(preset);
    for (entity, by) in mounted {
        if by.0 == preset {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn spawn_camera(
    commands: &mut Commands,
    scene: &ComposedScene,
    layer: &RenderLayers,
    settings: SpaceCameraSettings,
) {
    let background = &scene.background;
    let clear_color = match background.clear_color {
        Some(hex) => ClearColorConfig::Custom(parse_color(hex)),
        None => ClearColorConfig::None,
    };
    let projection = Projection::Perspective(PerspectiveProjection {
        fov: scene.camera.fov_degrees.to_radians(),
        ..default()
    });
    let transform = Transform::from_translation(scene.camera.position).looking_at(Vec3::ZERO, Vec3::Y);

    let mut camera = commands.spawn((
        Camera3d::default(),
        Camera {
            order: scene.preset.layer() as isize,
            clear_color,
            // The toolkit camera waits for the UI to give it a viewport.
            is_active: scene.preset == ScenePreset::Space,
            ..default()
        },
        projection,
        transform,
        layer.clone(),
        SceneCamera(scene.preset),
        MountedBy(scene.preset),
    ));

    if let Some(fog) = &background.fog {
        camera.insert(DistanceFog {
            color: parse_color(fog.color),
            falloff: FogFalloff::Linear {
                start: fog.near,
                end: fog.far,
            },
            ..default()
        });
    }
    if scene.preset == ScenePreset::Space {
        let mut orbit = OrbitCamera::from_position(scene.camera.position, Vec3::ZERO);
        orbit.interactive = settings.interactive;
        camera.insert(orbit);
        // The backdrop scene owns the global ambient term.
        commands.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: background.ambient_brightness * AMBIENT_BRIGHTNESS_PER_UNIT,
        });
    }
}

fn spawn_lights(commands: &mut Commands, scene: &ComposedScene, layer: &RenderLayers) {
    for light in &scene.lights {
        let color = parse_color(light.color);
        let intensity = light.intensity * POINT_LUMENS_PER_UNIT;
        // Z up: the spot light sits straight above the origin.
        let transform = Transform::from_translation(light.position).looking_at(Vec3::ZERO, Vec3::Z);
        match light.kind {
            LightKind::Point => {
                commands.spawn((
                    PointLight {
                        color,
                        intensity,
                        range: LIGHT_RANGE,
                        ..default()
                    },
                    transform,
                    layer.clone(),
                    MountedBy(scene.preset),
                ));
            }
            LightKind::Spot { angle } => {
                commands.spawn((
                    SpotLight {
                        color,
                        intensity,
                        range: LIGHT_RANGE,
                        outer_angle: angle,
                        inner_angle: 0.0,
                        shadows_enabled: true,
                        ..default()
                    },
                    transform,
                    layer.clone(),
                    MountedBy(scene.preset),
                ));
            }
        }
    }
}
