//! Portfolio scenes: a cluster of floating toolkit orbs and a deep-space
//! backdrop of orbiting planets, with the navigation bar and skills section
//! drawn over them.
//!
//! Library root: scene composition, per-frame animation, reveal and field
//! generation, plus the egui overlay.

pub mod animation;
mod camera;
pub mod config;
pub mod content;
pub mod error;
pub mod field;
pub mod render;
pub mod reveal;
pub mod scene;
pub mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::{OrbitCamera, SceneCamera};
pub use scene::{AnimatedEntity, EntityId, EntityTable, ScenePreset, SceneComposer};
