//! Screen size resource.
//!
//! Current framebuffer dimensions in pixels, refreshed every frame from the
//! window. The table layout and the camera offset are derived from it.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn as_f32(&self) -> (f32, f32) {
        (self.w as f32, self.h as f32)
    }
}
