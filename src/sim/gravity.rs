//! Gravity for bodies anchored at their feet

use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::grid::Grid;
use crate::consts::*;
use crate::sign;

/// Vertical velocity and landing state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gravity {
    pub vel_y: i32,
    pub landed: bool,
}

impl Gravity {
    /// Accelerate and fall one tick.
    ///
    /// With `detect` set, the body stops on blocks and wraps from the bottom
    /// of the screen to the top. Without it the body drops straight through
    /// everything (used for a dying player).
    pub fn apply(&mut self, body: &mut Body, grid: &Grid, detect: bool) {
        self.vel_y = (self.vel_y + 1).min(MAX_FALL_SPEED);

        if detect {
            if body.move_by(grid, 0, sign(self.vel_y as f32), self.vel_y.abs()) {
                self.vel_y = 0;
                self.landed = true;
            }

            if body.top() >= HEIGHT as f32 {
                body.pos.y = 1.0;
            }
        } else {
            body.pos.y += self.vel_y as f32;
        }
    }
}
