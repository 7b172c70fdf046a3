mod orbit;

use bevy::prelude::*;

use crate::scene::ScenePreset;

pub use orbit::{orbit_camera_plugin, orbit_position, OrbitCamera};

/// Marks the camera that renders a given scene.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneCamera(pub ScenePreset);
