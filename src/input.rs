//! Input capture with edge detection
//!
//! Devices (or the demo autopilot) report which controls are down as a
//! [`RawInput`]. The tracker turns that into the per-tick [`TickInput`],
//! computing the edge fields as "down now and not down last tick".

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Controls currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub fire: bool,
    pub pause: bool,
}

#[derive(Debug, Default)]
pub struct InputTracker {
    prev: RawInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, raw: RawInput) -> TickInput {
        let input = TickInput {
            left: raw.left,
            right: raw.right,
            up: raw.up,
            jump_pressed: raw.up && !self.prev.up,
            fire_pressed: raw.fire && !self.prev.fire,
            fire_held: raw.fire,
            pause_pressed: raw.pause && !self.prev.pause,
        };
        self.prev = raw;
        input
    }
}
