//! Fruit and power-up pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Anchor, Body};
use super::context::TickContext;
use super::gravity::Gravity;
use super::player::{MAX_HEALTH, Player};
use super::pop::{Pop, PopKind};
use super::robot::RobotKind;

pub const FRUIT_SIZE: Vec2 = Vec2::new(50.0, 54.0);
/// Ticks an uncollected fruit lasts
pub const FRUIT_TTL: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple = 0,
    Raspberry = 1,
    Lemon = 2,
    ExtraHealth = 3,
    ExtraLife = 4,
}

impl FruitKind {
    pub const BASIC: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Raspberry, FruitKind::Lemon];

    /// Draw the pickup dropped by (or standing in for) an enemy of `source`.
    ///
    /// Normal robots and ambient spawns give plain fruit. Aggressive robots
    /// draw from a 30-slot pool: 20 fruit, 9 extra health, 1 extra life.
    pub fn roll(ctx: &mut TickContext<'_>, source: RobotKind) -> Self {
        match source {
            RobotKind::Normal => ctx.choose(&Self::BASIC),
            RobotKind::Aggressive => match ctx.rng.index(30) {
                0..=19 => ctx.choose(&Self::BASIC),
                20..=28 => FruitKind::ExtraHealth,
                _ => FruitKind::ExtraLife,
            },
        }
    }

    pub fn points(self) -> u64 {
        match self {
            FruitKind::Apple | FruitKind::Raspberry | FruitKind::Lemon => (self as u64 + 1) * 100,
            FruitKind::ExtraHealth | FruitKind::ExtraLife => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub body: Body,
    pub gravity: Gravity,
    pub kind: FruitKind,
    pub time_to_live: i32,
    /// Set by the first update; drawn blank until then
    pub updated: bool,
}

impl Fruit {
    pub fn new(pos: Vec2, kind: FruitKind) -> Self {
        Self {
            body: Body::new(pos, FRUIT_SIZE, Anchor::CentreBottom),
            gravity: Gravity::default(),
            kind,
            time_to_live: FRUIT_TTL,
            updated: false,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut TickContext<'_>,
        player: Option<&mut Player>,
        pops: &mut Vec<Pop>,
    ) {
        self.updated = true;
        self.gravity.apply(&mut self.body, ctx.grid, true);

        match player {
            Some(player) if player.body.contains(self.body.center()) => {
                match self.kind {
                    FruitKind::ExtraHealth => {
                        player.health = (player.health + 1).min(MAX_HEALTH);
                        ctx.play_sound("bonus", 1);
                    }
                    FruitKind::ExtraLife => {
                        player.lives += 1;
                        ctx.play_sound("bonus", 1);
                    }
                    basic => {
                        player.score += basic.points();
                        ctx.play_sound("score", 1);
                    }
                }
                // Removal happens in the world's end-of-tick sweep
                self.time_to_live = 0;
            }
            _ => self.time_to_live -= 1,
        }

        if self.time_to_live <= 0 {
            pops.push(Pop::new(
                Vec2::new(self.body.pos.x, self.body.pos.y - 27.0),
                PopKind::Fruit,
            ));
        }
    }

    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0
    }

    pub fn image(&self, timer: i64) -> String {
        const BOB: [u8; 4] = [0, 1, 2, 1];
        if !self.updated {
            return "blank".to_owned();
        }
        let frame = BOB[(timer.div_euclid(6).rem_euclid(4)) as usize];
        format!("fruit{}{}", self.kind as u8, frame)
    }
}
