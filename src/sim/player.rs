//! The player character
//!
//! Control is driven by `hurt_timer`. Above 100 the player is being knocked
//! back (or, with no health left, falling off the level to respawn) and
//! input is ignored. Landing cuts a knockback short.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Anchor, Body};
use super::context::TickContext;
use super::gravity::Gravity;
use super::orb::{MAX_BLOWN_FRAMES, Orb};
use super::tick::TickInput;
use crate::consts::*;

pub const PLAYER_SIZE: Vec2 = Vec2::new(56.0, 70.0);
pub const MAX_HEALTH: i32 = 3;
pub const START_LIVES: i32 = 2;
/// Orbs allowed in the world at once
pub const MAX_ORBS: usize = 5;
/// Ticks between shots
pub const FIRE_COOLDOWN: i32 = 20;
/// Hurt timer value set by a hit
pub const HURT_TIME: i32 = 200;
/// Hurt timer values above this mean no control
pub const CONTROL_THRESHOLD: i32 = 100;
pub const RUN_SPEED: i32 = 4;
pub const JUMP_VELOCITY: i32 = -16;
pub const KNOCKBACK_VELOCITY: i32 = -12;

/// Control state derived from the hurt timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Normal,
    Recoil,
    Dying,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub gravity: Gravity,
    pub lives: i32,
    pub score: u64,
    pub health: i32,
    pub hurt_timer: i32,
    pub fire_timer: i32,
    pub direction_x: i32,
    /// Orb still being blown while fire is held
    pub blowing_orb: Option<u32>,
    /// Horizontal input acted on this tick (for the run animation)
    pub moving_x: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let mut player = Self {
            body: Body::new(Vec2::ZERO, PLAYER_SIZE, Anchor::CentreBottom),
            gravity: Gravity::default(),
            lives: START_LIVES,
            score: 0,
            health: MAX_HEALTH,
            hurt_timer: 0,
            fire_timer: 0,
            direction_x: 1,
            blowing_orb: None,
            moving_x: 0,
        };
        player.reset();
        player
    }

    /// Back to the spawn point with full health (new level or respawn)
    pub fn reset(&mut self) {
        self.body.pos = Vec2::new(WIDTH as f32 / 2.0, 100.0);
        self.gravity.vel_y = 0;
        self.direction_x = 1;
        self.fire_timer = 0;
        self.hurt_timer = CONTROL_THRESHOLD;
        self.health = MAX_HEALTH;
        self.blowing_orb = None;
    }

    pub fn state(&self) -> PlayerState {
        if self.hurt_timer <= CONTROL_THRESHOLD {
            PlayerState::Normal
        } else if self.health > 0 {
            PlayerState::Recoil
        } else {
            PlayerState::Dying
        }
    }

    /// Take a bolt hit at `point` travelling in `direction_x`. Only lands
    /// once the previous hit has fully worn off.
    pub fn hit_test(&mut self, ctx: &mut TickContext<'_>, point: Vec2, direction_x: i32) -> bool {
        if !self.body.contains(point) || self.hurt_timer >= 0 {
            return false;
        }

        self.hurt_timer = HURT_TIME;
        self.health -= 1;
        self.gravity.vel_y = KNOCKBACK_VELOCITY;
        self.gravity.landed = false;
        self.direction_x = direction_x;

        if self.health > 0 {
            ctx.play_sound("ouch", 4);
        } else {
            ctx.play_sound("die", 1);
        }
        true
    }

    pub fn update(&mut self, ctx: &mut TickContext<'_>, input: &TickInput, orbs: &mut Vec<Orb>) {
        // A dead player falls through the level
        self.gravity.apply(&mut self.body, ctx.grid, self.health > 0);

        self.fire_timer -= 1;
        self.hurt_timer -= 1;

        if self.gravity.landed {
            self.hurt_timer = self.hurt_timer.min(CONTROL_THRESHOLD);
        }

        self.moving_x = 0;

        if self.hurt_timer > CONTROL_THRESHOLD {
            if self.health > 0 {
                self.body.move_by(ctx.grid, self.direction_x, 0, RUN_SPEED);
            } else if self.body.top() >= HEIGHT as f32 * 1.5 {
                self.lives -= 1;
                log::debug!("Player lost a life, {} left", self.lives);
                self.reset();
            }
        } else {
            self.control(ctx, input, orbs);
        }

        if input.fire_held {
            if let Some(id) = self.blowing_orb {
                match orbs.iter_mut().find(|o| o.id == id) {
                    Some(orb) => {
                        orb.blown_frames += 4;
                        if orb.blown_frames >= MAX_BLOWN_FRAMES {
                            self.blowing_orb = None;
                        }
                    }
                    // Already popped
                    None => self.blowing_orb = None,
                }
            }
        } else {
            self.blowing_orb = None;
        }
    }

    fn control(&mut self, ctx: &mut TickContext<'_>, input: &TickInput, orbs: &mut Vec<Orb>) {
        if input.left {
            self.moving_x = -1;
        } else if input.right {
            self.moving_x = 1;
        }

        if self.moving_x != 0 {
            self.direction_x = self.moving_x;
            // Blowing an orb holds the player in place for a moment
            if self.fire_timer < 10 {
                self.body.move_by(ctx.grid, self.moving_x, 0, RUN_SPEED);
            }
        }

        if input.fire_pressed && self.fire_timer <= 0 && orbs.len() < MAX_ORBS {
            let x = (self.body.pos.x + (self.direction_x * 38) as f32)
                .clamp(MIN_X as f32, MAX_X as f32);
            let y = self.body.pos.y - 35.0;
            let orb = Orb::new(ctx.alloc_id(), Vec2::new(x, y), self.direction_x);
            self.blowing_orb = Some(orb.id);
            orbs.push(orb);
            ctx.play_sound("blow", 4);
            self.fire_timer = FIRE_COOLDOWN;
        }

        if input.up && self.gravity.vel_y == 0 && self.gravity.landed {
            self.gravity.vel_y = JUMP_VELOCITY;
            self.gravity.landed = false;
            ctx.play_sound("jump", 1);
        }
    }

    pub fn image(&self, timer: i64) -> String {
        if self.hurt_timer > 0 && self.hurt_timer.rem_euclid(2) == 0 {
            // Flicker while invulnerable
            return "blank".to_owned();
        }

        let facing = if self.direction_x > 0 { 1 } else { 0 };
        match self.state() {
            PlayerState::Recoil => format!("recoil{facing}"),
            PlayerState::Dying => format!("fall{}", timer.div_euclid(4).rem_euclid(2)),
            PlayerState::Normal if self.fire_timer > 0 => format!("blow{facing}"),
            PlayerState::Normal if self.moving_x == 0 => "still".to_owned(),
            PlayerState::Normal => format!("run{}{}", facing, timer.div_euclid(8).rem_euclid(4)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::harness::Harness;
    use crate::sim::grid::Grid;

    /// Player standing on the row-9 platform of level 0
    fn grounded(h: &mut Harness) -> Player {
        let mut p = Player::new();
        p.body.pos = Vec2::new(400.0, 224.0);
        p.gravity.landed = true;
        p.hurt_timer = -1;
        p.update(&mut h.ctx(), &TickInput::default(), &mut Vec::new());
        p
    }

    fn level0() -> Harness {
        Harness::new(Grid::for_level(0))
    }

    #[test]
    fn test_new_player() {
        let p = Player::new();
        assert_eq!(p.lives, 2);
        assert_eq!(p.health, 3);
        assert_eq!(p.body.pos, Vec2::new(400.0, 100.0));
        assert_eq!(p.hurt_timer, 100);
        assert_eq!(p.state(), PlayerState::Normal);
    }

    #[test]
    fn test_hit_and_invulnerability() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        let at = Vec2::new(400.0, 200.0);

        assert!(p.hit_test(&mut h.ctx(), at, -1));
        assert_eq!(p.health, 2);
        assert_eq!(p.hurt_timer, 200);
        assert_eq!(p.gravity.vel_y, -12);
        assert!(!p.gravity.landed);
        assert_eq!(p.direction_x, -1);
        assert_eq!(p.state(), PlayerState::Recoil);
        assert_eq!(h.sound_names(), vec!["ouch"]);

        // Never hurt again until the timer runs out
        for _ in 0..100 {
            let at = p.body.center();
            assert!(!p.hit_test(&mut h.ctx(), at, 1));
            p.update(&mut h.ctx(), &TickInput::default(), &mut Vec::new());
        }
        assert_eq!(p.health, 2);
    }

    #[test]
    fn test_miss_outside_box() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        assert!(!p.hit_test(&mut h.ctx(), Vec2::new(600.0, 200.0), 1));
        assert_eq!(p.health, 3);
    }

    #[test]
    fn test_recoil_slides_without_control() {
        let mut h = Harness::open();
        let mut p = Player::new();
        p.body.pos = Vec2::new(400.0, 300.0);
        p.hurt_timer = -1;
        assert!(p.hit_test(&mut h.ctx(), Vec2::new(400.0, 260.0), 1));

        let input = TickInput {
            left: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &input, &mut Vec::new());
        assert_eq!(p.body.pos.x, 404.0);
        assert_eq!(p.direction_x, 1);
    }

    #[test]
    fn test_landing_ends_knockback() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        p.hurt_timer = 150;
        p.gravity.landed = true;
        p.update(&mut h.ctx(), &TickInput::default(), &mut Vec::new());
        assert_eq!(p.hurt_timer, 100);
        assert_eq!(p.state(), PlayerState::Normal);
    }

    #[test]
    fn test_dying_falls_through_and_respawns() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        p.health = 1;
        assert!(p.hit_test(&mut h.ctx(), p.body.center(), 1));
        assert_eq!(p.state(), PlayerState::Dying);
        assert_eq!(h.sound_names(), vec!["die"]);

        let mut ticks = 0;
        while p.lives == 2 {
            p.update(&mut h.ctx(), &TickInput::default(), &mut Vec::new());
            ticks += 1;
            assert!(ticks < 100, "player never respawned");
        }
        assert_eq!(p.lives, 1);
        assert_eq!(p.health, 3);
        assert_eq!(p.body.pos, Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_walk_and_jump() {
        let mut h = level0();
        let mut p = grounded(&mut h);

        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &input, &mut Vec::new());
        assert_eq!(p.body.pos.x, 396.0);
        assert_eq!(p.direction_x, -1);
        assert_eq!(p.gravity.vel_y, -16);
        assert!(!p.gravity.landed);
        assert!(h.sound_names().contains(&"jump"));
    }

    #[test]
    fn test_fire_spawns_orb_ahead() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        let mut orbs = Vec::new();

        let fire = TickInput {
            fire_pressed: true,
            fire_held: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &fire, &mut orbs);
        assert_eq!(orbs.len(), 1);
        assert_eq!(orbs[0].body.pos, Vec2::new(438.0, 189.0));
        assert_eq!(orbs[0].direction_x, 1);
        assert_eq!(p.fire_timer, FIRE_COOLDOWN);
        assert_eq!(p.blowing_orb, Some(orbs[0].id));
        assert_eq!(orbs[0].blown_frames, 10);

        // Cooldown blocks a second shot, and movement is frozen briefly
        let again = TickInput {
            fire_pressed: true,
            fire_held: true,
            right: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &again, &mut orbs);
        assert_eq!(orbs.len(), 1);
        assert_eq!(p.body.pos.x, 400.0);
    }

    #[test]
    fn test_fire_clamped_to_bounds() {
        let mut h = Harness::open();
        let mut p = Player::new();
        p.body.pos = Vec2::new(710.0, 300.0);
        let mut orbs = Vec::new();
        let fire = TickInput {
            fire_pressed: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &fire, &mut orbs);
        assert_eq!(orbs[0].body.pos.x, 730.0);
    }

    #[test]
    fn test_orb_limit() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        let mut orbs: Vec<Orb> = (0..5)
            .map(|i| Orb::new(100 + i, Vec2::new(300.0, 100.0), 1))
            .collect();
        let fire = TickInput {
            fire_pressed: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &fire, &mut orbs);
        assert_eq!(orbs.len(), 5);
        assert_eq!(p.fire_timer, -2);
    }

    #[test]
    fn test_holding_fire_extends_orb_until_cap() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        let mut orbs = Vec::new();
        let fire = TickInput {
            fire_pressed: true,
            fire_held: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &fire, &mut orbs);

        let hold = TickInput {
            fire_held: true,
            ..Default::default()
        };
        for _ in 0..60 {
            p.update(&mut h.ctx(), &hold, &mut orbs);
        }
        assert_eq!(orbs[0].blown_frames, 122);
        assert_eq!(p.blowing_orb, None);
    }

    #[test]
    fn test_release_detaches_orb() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        let mut orbs = Vec::new();
        let fire = TickInput {
            fire_pressed: true,
            fire_held: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &fire, &mut orbs);
        p.update(&mut h.ctx(), &TickInput::default(), &mut orbs);
        assert_eq!(p.blowing_orb, None);

        let hold = TickInput {
            fire_held: true,
            ..Default::default()
        };
        p.update(&mut h.ctx(), &hold, &mut orbs);
        assert_eq!(orbs[0].blown_frames, 10);
    }

    #[test]
    fn test_images() {
        let mut h = level0();
        let mut p = grounded(&mut h);
        assert_eq!(p.image(0), "still");

        p.moving_x = -1;
        p.direction_x = -1;
        assert_eq!(p.image(16), "run02");

        p.fire_timer = 5;
        assert_eq!(p.image(0), "blow0");

        p.hurt_timer = 150;
        assert_eq!(p.image(0), "blank");
        p.hurt_timer = 151;
        assert_eq!(p.image(0), "recoil0");
        p.health = 0;
        assert_eq!(p.image(4), "fall1");
    }
}
