//! Fixed timestep simulation tick
//!
//! One call to [`World::update`] is one frame of the game. Entities are
//! updated in a fixed order, dead ones are swept, then the world spawns
//! ambient fruit and robots and checks whether the level is done.

use glam::Vec2;

use super::entity::EntityRef;
use super::fruit::{Fruit, FruitKind};
use super::robot::{Robot, RobotKind};
use super::state::World;
use crate::consts::*;

/// Ticks between ambient fruit drops
pub const FRUIT_SPAWN_INTERVAL: i64 = 100;
/// Ticks between robot spawns
pub const ROBOT_SPAWN_INTERVAL: i64 = 81;
/// Robots enter above the top of the screen
pub const ROBOT_SPAWN_Y: f32 = -30.0;

/// Input commands for a single tick
///
/// Edge fields are true only on the tick the control went down; the core
/// never looks at raw device state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump (held)
    pub up: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Fire went down this tick
    pub fire_pressed: bool,
    /// Fire is held (keeps blowing the last orb)
    pub fire_held: bool,
    /// Pause went down this tick (handled by the shell)
    pub pause_pressed: bool,
}

impl World {
    /// Advance one tick. The player only moves when it exists and input is
    /// given; a playerless world runs as menu scenery.
    pub fn update(&mut self, input: Option<&TickInput>) {
        self.timer += 1;

        self.update_entities(input);
        self.sweep();
        self.spawn();

        if self.level_complete() {
            log::info!("Level {} complete", self.level + 1);
            self.next_level();
        }
    }

    fn update_entities(&mut self, input: Option<&TickInput>) {
        let World {
            grid,
            rng,
            sounds,
            next_id,
            fruits,
            bolts,
            enemies,
            pops,
            orbs,
            player,
            level,
            ..
        } = self;

        let mut ctx = super::context::TickContext {
            grid: &*grid,
            rng: &mut **rng,
            sounds,
            audible: player.is_some(),
            level: *level,
            next_id,
        };

        for fruit in fruits.iter_mut() {
            fruit.update(&mut ctx, player.as_mut(), pops);
        }
        for bolt in bolts.iter_mut() {
            bolt.update(&mut ctx, orbs.as_mut_slice(), player.as_mut());
        }
        for robot in enemies.iter_mut() {
            robot.update(&mut ctx, player.as_ref(), orbs.as_mut_slice(), bolts);
        }
        for pop in pops.iter_mut() {
            pop.update();
        }
        for orb in orbs.iter_mut() {
            orb.update(&mut ctx, pops, fruits);
        }
        if let (Some(player), Some(input)) = (player.as_mut(), input) {
            player.update(&mut ctx, input, orbs);
        }
    }

    /// Drop everything whose removal predicate failed this tick
    fn sweep(&mut self) {
        self.fruits.retain(|f| EntityRef::Fruit(f).is_alive());
        self.bolts.retain(|b| EntityRef::Bolt(b).is_alive());
        self.enemies.retain(|r| EntityRef::Robot(r).is_alive());
        self.pops.retain(|p| EntityRef::Pop(p).is_alive());
        self.orbs.retain(|o| EntityRef::Orb(o).is_alive());
    }

    fn spawn(&mut self) {
        if self.timer % FRUIT_SPAWN_INTERVAL == 0
            && !(self.pending_enemies.is_empty() && self.enemies.is_empty())
        {
            let x = self.rng.range(MIN_X, MAX_X);
            let y = self.rng.range(75, 400);
            let kind = FruitKind::roll(&mut self.context(), RobotKind::Normal);
            self.fruits.push(Fruit::new(Vec2::new(x as f32, y as f32), kind));
        }

        if self.timer % ROBOT_SPAWN_INTERVAL == 0 && self.enemies.len() < self.max_enemies() {
            if let Some(kind) = self.pending_enemies.pop() {
                let pos = Vec2::new(self.robot_spawn_x(), ROBOT_SPAWN_Y);
                let robot = Robot::new(&mut self.context(), pos, kind);
                log::debug!(
                    "Spawned {:?} robot at x={} ({} pending)",
                    kind,
                    pos.x,
                    self.pending_enemies.len()
                );
                self.enemies.push(robot);
            }
        }
    }

    /// Nothing left to fight or collect, and no orb still holds a robot
    pub fn level_complete(&self) -> bool {
        self.pending_enemies.is_empty()
            && self.fruits.is_empty()
            && self.enemies.is_empty()
            && self.pops.is_empty()
            && self.orbs.iter().all(|o| o.trapped.is_none())
    }
}
