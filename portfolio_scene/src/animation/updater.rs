//! Applies computed poses to host transforms once per frame.

use bevy::prelude::*;

use crate::animation::{advance_pose, sync_scene_clock, SceneClock};
use crate::scene::{animate_sparkles, billboard_labels_system, follow_orb_drift, EntityTable};

/// Outcome of the most recent frame, for diagnostics and tests.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub updated: usize,
    /// Rows whose host entity was not attached or not queryable yet.
    pub skipped: usize,
    pub failed: usize,
}

pub fn animation_plugin(app: &mut App) {
    app.init_resource::<SceneClock>()
        .init_resource::<FrameReport>()
        .add_systems(
            Update,
            (
                sync_scene_clock,
                animate_entities,
                animate_sparkles,
                follow_orb_drift,
                billboard_labels_system,
            )
                .chain(),
        );
}

/// Advances every table row and writes its pose into the host transform.
///
/// A missing handle or a failed computation only affects that row for this
/// frame; every other row is still updated.
pub fn animate_entities(
    clock: Res<SceneClock>,
    mut table: ResMut<EntityTable>,
    mut transforms: Query<&mut Transform>,
    mut report: ResMut<FrameReport>,
) {
    let elapsed = clock.elapsed();
    let mut frame = FrameReport::default();

    for (row, handle) in table.rows_with_handles_mut() {
        let Some(handle) = handle else {
            debug!("portfolio: entity {} has no host handle yet", row.entity.id);
            frame.skipped += 1;
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(handle) else {
            debug!("portfolio: entity {} not ready in host", row.entity.id);
            frame.skipped += 1;
            continue;
        };
        match advance_pose(&row.entity, &row.motion, &row.pose, elapsed) {
            Ok(pose) => {
                row.pose = pose;
                pose.apply_to(&mut transform);
                frame.updated += 1;
            }
            Err(err) => {
                warn!("portfolio: skipping frame update: {err}");
                frame.failed += 1;
            }
        }
    }

    *report = frame;
}
