//! Renderer trait and default implementation.

mod spheres;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use crate::scene::{AnimatedEntity, SparkleSpec};

pub use spheres::{SphereRenderer, SphereRendererSettings};

/// Turns composed entities into host entities. The animation layer only ever
/// sees the returned handle, so any backend that produces a `Transform` works.
pub trait EntityRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}

    fn spawn_entity(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        entity: &AnimatedEntity,
        layer: &RenderLayers,
    ) -> Entity;

    /// Static point cloud behind a scene. Renderers without star support skip it.
    fn spawn_star_shell(
        &self,
        _commands: &mut Commands,
        _meshes: &mut Assets<Mesh>,
        _materials: &mut Assets<StandardMaterial>,
        _points: &[Vec3],
        _layer: &RenderLayers,
    ) -> Option<Entity> {
        None
    }

    /// Glitter around an already spawned `host`. Skipped by default.
    #[allow(clippy::too_many_arguments)]
    fn spawn_sparkles(
        &self,
        _commands: &mut Commands,
        _meshes: &mut Assets<Mesh>,
        _materials: &mut Assets<StandardMaterial>,
        _host: Entity,
        _entity: &AnimatedEntity,
        _sparkles: &[SparkleSpec],
        _layer: &RenderLayers,
    ) {
    }
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn EntityRenderer>);

impl RendererResource {
    pub fn new(renderer: impl EntityRenderer) -> Self {
        Self(Box::new(renderer))
    }
}
