//! Robot laser bolts

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Anchor, Body};
use super::context::TickContext;
use super::orb::Orb;
use super::player::Player;

pub const BOLT_SIZE: Vec2 = Vec2::new(26.0, 14.0);
pub const BOLT_SPEED: i32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub body: Body,
    pub direction_x: i32,
    pub active: bool,
    /// Set by the first update; drawn blank until then
    pub updated: bool,
}

impl Bolt {
    pub fn new(pos: Vec2, direction_x: i32) -> Self {
        Self {
            body: Body::new(pos, BOLT_SIZE, Anchor::Centre),
            direction_x,
            active: true,
            updated: false,
        }
    }

    /// Fly one tick. Orbs are tested in order before the player; the first
    /// thing hit absorbs the bolt.
    pub fn update(
        &mut self,
        ctx: &mut TickContext<'_>,
        orbs: &mut [Orb],
        player: Option<&mut Player>,
    ) {
        self.updated = true;
        if self.body.move_by(ctx.grid, self.direction_x, 0, BOLT_SPEED) {
            self.active = false;
            return;
        }

        let point = self.body.pos;
        if orbs.iter_mut().any(|orb| orb.hit_test(point)) {
            self.active = false;
            return;
        }

        if let Some(player) = player {
            if player.hit_test(ctx, point, self.direction_x) {
                self.active = false;
            }
        }
    }

    pub fn image(&self, timer: i64) -> String {
        if !self.updated {
            return "blank".to_owned();
        }
        let facing = if self.direction_x > 0 { 1 } else { 0 };
        format!("bolt{}{}", facing, timer.div_euclid(4).rem_euclid(2))
    }
}
