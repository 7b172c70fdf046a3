//! Orb name labels that always face their scene's camera.

use bevy::prelude::*;

use crate::animation::face_towards;
use crate::camera::SceneCamera;
use crate::scene::{EntityId, EntityTable, ScenePreset};

/// Text shown beside an orb. Drawn by the toolkit overlay at the label's
/// projected position.
#[derive(Component, Clone, Debug)]
pub struct OrbLabel {
    pub text: String,
    /// The orb whose drift the label rides along with.
    pub owner: EntityId,
    /// Resting position, below the orb's base position.
    pub anchor: Vec3,
}

/// Moves labels with their orb's float drift. Bob and spin are not shared.
pub fn follow_orb_drift(table: Res<EntityTable>, mut labels: Query<(&OrbLabel, &mut Transform)>) {
    for (label, mut tf) in &mut labels {
        if let Some(row) = table.get(label.owner) {
            tf.translation = row.pose.carry(label.anchor);
        }
    }
}

/// Entities whose orientation is locked towards a scene camera every frame.
#[derive(Component, Clone, Copy, Debug)]
pub struct Billboard {
    pub scene: ScenePreset,
}

/// Rotates every `Billboard` to face its scene's camera each frame.
pub fn billboard_labels_system(
    cameras: Query<(&SceneCamera, &GlobalTransform)>,
    mut billboards: Query<(&Billboard, &mut Transform), Without<SceneCamera>>,
) {
    for (billboard, mut tf) in &mut billboards {
        let Some(cam_pos) = cameras
            .iter()
            .find(|(camera, _)| camera.0 == billboard.scene)
            .map(|(_, global)| global.translation())
        else {
            continue;
        };
        if let Some(rotation) = face_towards(tf.translation, cam_pos) {
            tf.rotation = rotation;
        }
    }
}
