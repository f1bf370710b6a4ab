//! Demo autopilot for headless runs
//!
//! Plays the game with a simple policy: head for the nearest robot and blow
//! orbs at it when it is close and level with the player. It draws from its
//! own random source so the world's sequence is untouched.

use crate::app::{App, Screen};
use crate::input::RawInput;
use crate::sim::{Randomness, Robot, SimRng, World};

/// Fire when a robot is this close horizontally
pub const FIRE_RANGE: f32 = 250.0;
/// Vertical distance that still counts as the same ledge
pub const SAME_BAND: f32 = 40.0;
/// Chance per tick of a random jump
pub const JUMP_CHANCE: f64 = 0.02;
/// Frames to linger on the game over screen
pub const GAME_OVER_WAIT: u32 = 120;

#[derive(Debug)]
pub struct Autopilot {
    rng: SimRng,
    fire_down: bool,
    waited: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
            fire_down: false,
            waited: 0,
        }
    }

    /// Decide which controls are down this frame
    pub fn next_input(&mut self, app: &App) -> RawInput {
        let input = match app.screen() {
            Screen::Menu => self.tap_fire(),
            Screen::Play { .. } => {
                self.waited = 0;
                self.play(app.world())
            }
            Screen::GameOver => {
                self.waited += 1;
                if self.waited >= GAME_OVER_WAIT {
                    self.tap_fire()
                } else {
                    RawInput::default()
                }
            }
        };
        self.fire_down = input.fire;
        input
    }

    /// Fire down for one frame, up the next, so each press is an edge
    fn tap_fire(&self) -> RawInput {
        RawInput {
            fire: !self.fire_down,
            ..Default::default()
        }
    }

    fn play(&mut self, world: &World) -> RawInput {
        let Some(player) = world.player.as_ref() else {
            return RawInput::default();
        };
        let pos = player.body.pos;

        let mut input = RawInput {
            up: self.rng.unit() < JUMP_CHANCE,
            ..Default::default()
        };

        let dist = |r: &&Robot| r.body.pos.distance_squared(pos);
        let target = world
            .enemies
            .iter()
            .min_by(|a, b| dist(a).total_cmp(&dist(b)))
            .map(|r| r.body.pos);

        if let Some(target) = target {
            let dx = target.x - pos.x;
            let facing = (dx < 0.0) == (player.direction_x < 0);
            let close = dx.abs() < FIRE_RANGE && (target.y - pos.y).abs() < SAME_BAND;

            if close && facing {
                input.fire = !self.fire_down;
            } else if dx < 0.0 {
                input.left = true;
            } else {
                input.right = true;
            }
        }
        input
    }
}
