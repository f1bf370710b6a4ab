//! Burst animation left behind by expiring orbs and fruit

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ticks a pop stays in the world
pub const POP_LIFETIME: i32 = 12;

/// Visual variant of a pop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopKind {
    Fruit = 0,
    Orb = 1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pop {
    pub pos: Vec2,
    pub kind: PopKind,
    pub timer: i32,
}

impl Pop {
    pub fn new(pos: Vec2, kind: PopKind) -> Self {
        Self {
            pos,
            kind,
            timer: -1,
        }
    }

    pub fn update(&mut self) {
        self.timer += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.timer < POP_LIFETIME
    }

    pub fn image(&self) -> String {
        if self.timer < 0 {
            return "blank".to_owned();
        }
        format!("pop{}{}", self.kind as u8, self.timer / 2)
    }
}
