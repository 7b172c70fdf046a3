pub(crate) mod composer;
mod entity;
pub(crate) mod host;
pub(crate) mod labels;
pub(crate) mod materials;
pub mod presets;
pub(crate) mod sparkles;
mod spawn;
mod table;
pub(crate) mod trails;

use bevy::prelude::*;

use crate::render::{RendererResource, SphereRenderer};

pub use composer::{ComposedScene, SceneComposer};
pub use entity::{AnimatedEntity, EntityId, EntityKind, Pose, SceneEntity};
pub use host::{configure_render_host, fit_toolkit_viewport, RenderHost, ToolkitViewport};
pub use labels::{billboard_labels_system, follow_orb_drift, Billboard, OrbLabel};
pub use presets::ScenePreset;
pub use spawn::{
    mount_scene, spawn_space_scene, spawn_toolkit_scene, unmount_scene, MountedBy,
    SpaceCameraSettings,
};
pub use sparkles::{animate_sparkles, generate_sparkles, Sparkle, SparkleSpec};
pub use table::{EntityTable, TableRow};
pub use trails::{record_trails, trail_plugin, Trail};

/// Mounts both scenes at startup and keeps the toolkit viewport on its panel.
/// Uses an entropy-seeded composer and the sphere renderer unless those
/// resources were inserted beforehand.
pub fn scene_plugin(app: &mut App) {
    if !app.world().contains_resource::<SceneComposer>() {
        app.insert_resource(SceneComposer::new(None));
    }
    if !app.world().contains_resource::<RendererResource>() {
        app.insert_resource(RendererResource::new(SphereRenderer::default()));
    }
    app.init_resource::<EntityTable>()
        .init_resource::<ToolkitViewport>()
        .add_systems(
            Startup,
            (configure_render_host, spawn_toolkit_scene, spawn_space_scene).chain(),
        )
        .add_systems(Update, fit_toolkit_viewport);
}
