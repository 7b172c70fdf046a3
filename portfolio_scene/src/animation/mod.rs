//! Frame-driven transform updates.

mod clock;
mod pose;
mod updater;

pub use clock::{sync_scene_clock, SceneClock};
pub use pose::{
    advance_pose, face_towards, FloatDrift, Motion, ORB_BOB_AMPLITUDE, ORB_PITCH_AMPLITUDE,
    PLANET_ORBIT_RADIUS,
};
pub use updater::{animate_entities, animation_plugin, FrameReport};
