//! Transient HUD line.
//!
//! Used for NPC dialogue and short notices while exploring. The text
//! disappears once its time to live runs out.

use bevy_ecs::prelude::Resource;

/// Seconds a line stays on screen unless told otherwise.
pub const DEFAULT_MESSAGE_SECS: f32 = 3.0;

#[derive(Resource, Debug, Clone, Default)]
pub struct HudMessage {
    text: String,
    remaining: f32,
}

impl HudMessage {
    pub fn show(&mut self, text: impl Into<String>, secs: f32) {
        self.text = text.into();
        self.remaining = secs;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.remaining = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.clear();
            }
        }
    }

    /// The line to draw, if any.
    pub fn text(&self) -> Option<&str> {
        (self.remaining > 0.0 && !self.text.is_empty()).then_some(self.text.as_str())
    }
}
