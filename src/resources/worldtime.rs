//! Simulation clock.
//!
//! Written once per frame by [`crate::systems::time::update_world_time`];
//! every time-driven system reads `delta` from here instead of sampling the
//! wall clock.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled seconds since the previous frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Clock with a fixed frame delta, for driving systems in tests.
    pub fn with_delta(delta: f32) -> Self {
        WorldTime {
            delta,
            ..Self::default()
        }
    }
}
