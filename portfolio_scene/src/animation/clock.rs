//! Monotonic elapsed-time clock shared by every animated entity.

use bevy::prelude::*;

/// Seconds since the scenes were mounted. Never decreases.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    elapsed: f32,
}

impl SceneClock {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Moves the clock to `t`. Earlier or non-finite readings are ignored.
    pub fn advance_to(&mut self, t: f32) {
        if t.is_finite() && t > self.elapsed {
            self.elapsed = t;
        }
    }
}

/// Mirrors the host's `Time` into the scene clock once per frame.
pub fn sync_scene_clock(time: Res<Time>, mut clock: ResMut<SceneClock>) {
    clock.advance_to(time.elapsed_secs());
}
