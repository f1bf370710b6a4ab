//! Robot enemies
//!
//! Robots patrol the ledges at a fixed speed, turn at walls and at random
//! intervals (leaning toward the player), and fire bolts after a short
//! wind-up. Aggressive robots also charge at nearby orbs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bolt::Bolt;
use super::collision::{Anchor, Body};
use super::context::TickContext;
use super::gravity::Gravity;
use super::orb::Orb;
use super::player::Player;
use crate::sign;

pub const ROBOT_SIZE: Vec2 = Vec2::new(56.0, 70.0);
/// Fire timer value at which a robot may start rolling to fire
pub const FIRE_READY: i32 = 12;
/// Fire timer value at which the bolt leaves the robot
pub const FIRE_RELEASE: i32 = 8;
/// Aggressive robots look for orbs once their fire timer reaches this
pub const HUNT_READY: i32 = 24;
/// Horizontal reach of the orb hunt
pub const HUNT_RANGE: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotKind {
    Normal = 0,
    Aggressive = 1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub body: Body,
    pub gravity: Gravity,
    pub kind: RobotKind,
    /// Pixels per tick, fixed for the robot's life
    pub speed: i32,
    pub direction_x: i32,
    pub alive: bool,
    pub change_dir_timer: i32,
    pub fire_timer: i32,
    /// Set by the first update; drawn blank until then
    pub updated: bool,
}

impl Robot {
    pub fn new(ctx: &mut TickContext<'_>, pos: Vec2, kind: RobotKind) -> Self {
        Self {
            body: Body::new(pos, ROBOT_SIZE, Anchor::CentreBottom),
            gravity: Gravity::default(),
            kind,
            speed: ctx.rng.range(1, 3),
            direction_x: 1,
            alive: true,
            change_dir_timer: 0,
            fire_timer: 100,
            updated: false,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut TickContext<'_>,
        player: Option<&Player>,
        orbs: &mut [Orb],
        bolts: &mut Vec<Bolt>,
    ) {
        self.updated = true;
        self.gravity.apply(&mut self.body, ctx.grid, true);

        self.change_dir_timer -= 1;
        self.fire_timer += 1;

        if self.body.move_by(ctx.grid, self.direction_x, 0, self.speed) {
            self.change_dir_timer = 0;
        }

        if self.change_dir_timer <= 0 {
            self.direction_x = match player {
                Some(p) => ctx.choose(&[-1, 1, sign(p.body.pos.x - self.body.pos.x)]),
                None => ctx.choose(&[-1, 1]),
            };
            self.change_dir_timer = ctx.rng.range(100, 250);
        }

        if self.kind == RobotKind::Aggressive && self.fire_timer >= HUNT_READY {
            self.hunt(orbs);
        }

        if self.fire_timer >= FIRE_READY {
            let mut chance = ctx.fire_probability();
            if player.is_some_and(|p| self.shares_band(&p.body)) {
                chance *= 10.0;
            }
            if ctx.rng.unit() < chance {
                self.fire_timer = 0;
                ctx.play_sound("laser", 4);
            }
        } else if self.fire_timer == FIRE_RELEASE {
            let muzzle = Vec2::new(
                self.body.pos.x + (self.direction_x * 20) as f32,
                self.body.pos.y - 38.0,
            );
            bolts.push(Bolt::new(muzzle, self.direction_x));
        }

        if let Some(orb) = orbs.iter_mut().find(|orb| self.caught_by(orb)) {
            self.alive = false;
            orb.floating = true;
            orb.trapped = Some(self.kind);
            ctx.play_sound("trap", 4);
        }
    }

    /// Turn toward the first orb level with us and within reach
    fn hunt(&mut self, orbs: &[Orb]) {
        let (top, bottom) = (self.body.top(), self.body.bottom());
        if let Some(orb) = orbs.iter().find(|orb| {
            orb.body.pos.y >= top
                && orb.body.pos.y < bottom
                && (orb.body.pos.x - self.body.pos.x).abs() < HUNT_RANGE
        }) {
            self.direction_x = sign(orb.body.pos.x - self.body.pos.x);
            self.fire_timer = 0;
        }
    }

    /// An empty orb whose centre is inside our box
    fn caught_by(&self, orb: &Orb) -> bool {
        orb.trapped.is_none() && self.body.contains(orb.body.center())
    }

    /// Do our vertical extents overlap?
    fn shares_band(&self, other: &Body) -> bool {
        self.body.top() < other.bottom() && self.body.bottom() > other.top()
    }

    pub fn image(&self, timer: i64) -> String {
        if !self.updated {
            return "blank".to_owned();
        }
        let facing = if self.direction_x > 0 { 1 } else { 0 };
        let frame = if self.fire_timer < FIRE_READY {
            5 + self.fire_timer / 4
        } else {
            1 + (timer.div_euclid(4).rem_euclid(4)) as i32
        };
        format!("robot{}{}{}", self.kind as u8, facing, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::harness::Harness;

    fn robot(h: &mut Harness, x: f32, y: f32, kind: RobotKind) -> Robot {
        h.rng.ints.push_back(2);
        Robot::new(&mut h.ctx(), Vec2::new(x, y), kind)
    }

    fn player_at(x: f32, y: f32) -> Player {
        let mut p = Player::new();
        p.body.pos = Vec2::new(x, y);
        p
    }

    #[test]
    fn test_spawn_speed_from_rng() {
        let mut h = Harness::open();
        let r = robot(&mut h, 300.0, -30.0, RobotKind::Normal);
        assert_eq!(r.speed, 2);
        assert_eq!(r.fire_timer, 100);
        assert!(r.alive);
    }

    #[test]
    fn test_reroll_biased_toward_player() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 100.0, RobotKind::Normal);
        let player = player_at(100.0, 400.0);
        // Third option is the player's side; timer drawn next
        h.rng.indices.push_back(2);
        h.rng.ints.push_back(180);
        r.update(&mut h.ctx(), Some(&player), &mut [], &mut Vec::new());
        assert_eq!(r.direction_x, -1);
        assert_eq!(r.change_dir_timer, 180);
    }

    #[test]
    fn test_wall_forces_reroll() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 729.0, 100.0, RobotKind::Normal);
        r.change_dir_timer = 200;
        h.rng.indices.push_back(0);
        h.rng.ints.push_back(150);
        r.update(&mut h.ctx(), None, &mut [], &mut Vec::new());
        assert_eq!(r.direction_x, -1);
        assert_eq!(r.change_dir_timer, 150);
    }

    #[test]
    fn test_fire_roll_then_bolt_after_windup() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 100.0, RobotKind::Normal);
        r.change_dir_timer = 1000;
        h.rng.units.push_back(0.0);
        let mut bolts = Vec::new();

        r.update(&mut h.ctx(), None, &mut [], &mut bolts);
        assert_eq!(r.fire_timer, 0);
        assert_eq!(h.sound_names(), vec!["laser"]);

        for _ in 0..7 {
            r.update(&mut h.ctx(), None, &mut [], &mut bolts);
        }
        assert!(bolts.is_empty());

        r.update(&mut h.ctx(), None, &mut [], &mut bolts);
        assert_eq!(r.fire_timer, 8);
        assert_eq!(bolts.len(), 1);
        assert_eq!(bolts[0].direction_x, r.direction_x);
        assert_eq!(
            bolts[0].body.pos,
            Vec2::new(r.body.pos.x + 20.0, r.body.pos.y - 38.0)
        );
    }

    #[test]
    fn test_player_in_band_boosts_fire_chance() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 300.0, RobotKind::Normal);
        r.change_dir_timer = 1000;
        r.gravity.landed = true;
        // 0.005 misses the base 0.001 chance but not the boosted 0.01
        h.rng.units.extend([0.005, 0.005]);

        let far = player_at(500.0, 100.0);
        r.update(&mut h.ctx(), Some(&far), &mut [], &mut Vec::new());
        assert!(r.fire_timer > FIRE_READY);

        let near = player_at(500.0, r.body.pos.y);
        r.update(&mut h.ctx(), Some(&near), &mut [], &mut Vec::new());
        assert_eq!(r.fire_timer, 0);
    }

    #[test]
    fn test_aggressive_hunts_orb() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 300.0, RobotKind::Aggressive);
        r.change_dir_timer = 1000;
        r.direction_x = 1;
        let mut orbs = vec![Orb::new(1, Vec2::new(150.0, 260.0), 1)];

        r.update(&mut h.ctx(), None, &mut orbs, &mut Vec::new());
        assert_eq!(r.direction_x, -1);
        assert_eq!(r.fire_timer, 0);
    }

    #[test]
    fn test_hunt_ignores_orbs_out_of_reach() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 300.0, RobotKind::Aggressive);
        r.change_dir_timer = 1000;
        let mut orbs = vec![Orb::new(1, Vec2::new(560.0, 260.0), -1)];
        r.update(&mut h.ctx(), None, &mut orbs, &mut Vec::new());
        assert_eq!(r.direction_x, 1);
        assert!(r.fire_timer > HUNT_READY);
    }

    #[test]
    fn test_trapped_by_orb() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 300.0, RobotKind::Aggressive);
        r.change_dir_timer = 1000;
        let mut orbs = vec![
            Orb::new(1, Vec2::new(302.0, 270.0), 1),
            Orb::new(2, Vec2::new(302.0, 270.0), 1),
        ];
        orbs[0].trapped = Some(RobotKind::Normal);

        r.update(&mut h.ctx(), None, &mut orbs, &mut Vec::new());
        assert!(!r.alive);
        assert_eq!(orbs[0].trapped, Some(RobotKind::Normal));
        assert_eq!(orbs[1].trapped, Some(RobotKind::Aggressive));
        assert!(orbs[1].floating);
        assert!(h.sound_names().contains(&"trap"));
    }

    #[test]
    fn test_image() {
        let mut h = Harness::open();
        let mut r = robot(&mut h, 300.0, 300.0, RobotKind::Aggressive);
        assert_eq!(r.image(0), "blank");
        r.updated = true;
        r.fire_timer = 5;
        assert_eq!(r.image(0), "robot116");
        r.fire_timer = 40;
        r.direction_x = -1;
        assert_eq!(r.image(13), "robot104");
    }
}
