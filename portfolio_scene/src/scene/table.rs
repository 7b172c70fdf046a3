//! Entity table: every animated entity keyed by stable id, plus its host handle.

use std::collections::{BTreeMap, HashMap, HashSet};

use bevy::prelude::*;

use crate::animation::Motion;
use crate::scene::{AnimatedEntity, EntityId, Pose, ScenePreset};

/// One animated entity: immutable definition plus the live pose the updater writes.
#[derive(Clone, Debug)]
pub struct TableRow {
    pub scene: ScenePreset,
    pub entity: AnimatedEntity,
    pub motion: Motion,
    pub pose: Pose,
}

/// All mounted scenes' entities. Rows are only added by `mount` and only
/// removed by `unmount`; the frame loop never changes the row set.
#[derive(Resource, Default)]
pub struct EntityTable {
    rows: BTreeMap<EntityId, TableRow>,
    handles: HashMap<EntityId, Entity>,
    mounted: HashSet<ScenePreset>,
}

impl EntityTable {
    /// Adds a scene's entities. Returns `false` and changes nothing when the
    /// scene is already mounted.
    pub fn mount(
        &mut self,
        scene: ScenePreset,
        entities: impl IntoIterator<Item = (AnimatedEntity, Motion)>,
    ) -> bool {
        if !self.mounted.insert(scene) {
            return false;
        }
        for (entity, motion) in entities {
            let pose = entity.initial_pose();
            self.rows.insert(
                entity.id,
                TableRow {
                    scene,
                    entity,
                    motion,
                    pose,
                },
            );
        }
        true
    }

    /// Drops a scene's rows and returns the host handles that were bound to them.
    pub fn unmount(&mut self, scene: ScenePreset) -> Vec<Entity> {
        if !self.mounted.remove(&scene) {
            return Vec::new();
        }
        let ids: Vec<EntityId> = self
            .rows
            .iter()
            .filter(|(_, row)| row.scene == scene)
            .map(|(id, _)| *id)
            .collect();
        ids.iter()
            .filter_map(|id| {
                self.rows.remove(id);
                self.handles.remove(id)
            })
            .collect()
    }

    pub fn is_mounted(&self, scene: ScenePreset) -> bool {
        self.mounted.contains(&scene)
    }

    /// Attaches the host entity that renders `id`. Unknown ids are ignored.
    pub fn bind(&mut self, id: EntityId, handle: Entity) -> bool {
        if !self.rows.contains_key(&id) {
            return false;
        }
        self.handles.insert(id, handle);
        true
    }

    pub fn handle(&self, id: EntityId) -> Option<Entity> {
        self.handles.get(&id).copied()
    }

    pub fn get(&self, id: EntityId) -> Option<&TableRow> {
        self.rows.get(&id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.values()
    }

    /// Rows paired with their (possibly missing) host handle.
    pub fn rows_with_handles_mut(&mut self) -> impl Iterator<Item = (&mut TableRow, Option<Entity>)> {
        let handles = &self.handles;
        self.rows
            .iter_mut()
            .map(move |(id, row)| (row, handles.get(id).copied()))
    }

    pub fn scene_rows(&self, scene: ScenePreset) -> impl Iterator<Item = &TableRow> {
        self.rows.values().filter(move |row| row.scene == scene)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
