//! Orbs: the player's bubbles
//!
//! An orb is blown horizontally, then floats upward for the rest of its
//! life. Floating never switches back off. A robot that touches an orb is
//! trapped inside it and comes back out as fruit when the orb pops.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Anchor, Body};
use super::context::TickContext;
use super::fruit::{Fruit, FruitKind};
use super::pop::{Pop, PopKind};
use super::robot::RobotKind;

pub const ORB_SIZE: Vec2 = Vec2::new(70.0, 70.0);
/// Age at which an orb pops
pub const ORB_MAX_AGE: i32 = 250;
/// Orbs that float this far above the screen pop
pub const ORB_CEILING: f32 = -40.0;
/// Horizontal speed while being blown
pub const ORB_SPEED: i32 = 4;
/// Ticks of horizontal travel before floating
pub const BASE_BLOWN_FRAMES: i32 = 6;
/// Holding fire keeps the orb travelling, up to this many ticks
pub const MAX_BLOWN_FRAMES: i32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub body: Body,
    pub direction_x: i32,
    pub floating: bool,
    pub trapped: Option<RobotKind>,
    pub timer: i32,
    pub blown_frames: i32,
}

impl Orb {
    pub fn new(id: u32, pos: Vec2, direction_x: i32) -> Self {
        Self {
            id,
            body: Body::new(pos, ORB_SIZE, Anchor::Centre),
            direction_x,
            floating: false,
            trapped: None,
            timer: -1,
            blown_frames: BASE_BLOWN_FRAMES,
        }
    }

    /// Does `point` lie inside the orb? A hit leaves the orb one tick from
    /// popping rather than removing it outright.
    pub fn hit_test(&mut self, point: Vec2) -> bool {
        let hit = self.body.contains(point);
        if hit {
            self.timer = ORB_MAX_AGE - 1;
        }
        hit
    }

    /// Old enough or high enough to pop. The world's removal sweep uses the
    /// same test, so an orb pops exactly once.
    pub fn expired(&self) -> bool {
        self.timer >= ORB_MAX_AGE || self.body.pos.y <= ORB_CEILING
    }

    pub fn update(
        &mut self,
        ctx: &mut TickContext<'_>,
        pops: &mut Vec<Pop>,
        fruits: &mut Vec<Fruit>,
    ) {
        self.timer += 1;

        if self.floating {
            let rise = ctx.rng.range(1, 2);
            self.body.move_by(ctx.grid, 0, -1, rise);
        } else if self.body.move_by(ctx.grid, self.direction_x, 0, ORB_SPEED) {
            self.floating = true;
        }

        if self.timer == self.blown_frames {
            self.floating = true;
        }

        if self.expired() {
            pops.push(Pop::new(self.body.pos, PopKind::Orb));
            if let Some(kind) = self.trapped {
                let fruit_kind = FruitKind::roll(ctx, kind);
                fruits.push(Fruit::new(self.body.pos, fruit_kind));
            }
            ctx.play_sound("pop", 4);
        }
    }

    /// Blank until the orb's first update
    pub fn image(&self) -> String {
        if self.timer < 0 {
            "blank".to_owned()
        } else if self.timer < 9 {
            format!("orb{}", self.timer / 3)
        } else if let Some(kind) = self.trapped {
            format!("trap{}{}", kind as u8, (self.timer / 4) % 8)
        } else {
            format!("orb{}", 3 + ((self.timer - 9) / 8) % 4)
        }
    }
}
