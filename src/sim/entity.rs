//! Closed set of entity kinds
//!
//! The world stores each kind in its own collection so it can update them
//! in a fixed order. [`EntityRef`] is the uniform view over all of them for
//! drawing, liveness checks and inspection.

use glam::Vec2;

use super::bolt::Bolt;
use super::fruit::Fruit;
use super::orb::Orb;
use super::player::Player;
use super::pop::Pop;
use super::robot::Robot;

#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Fruit(&'a Fruit),
    Bolt(&'a Bolt),
    Robot(&'a Robot),
    Pop(&'a Pop),
    Orb(&'a Orb),
    Player(&'a Player),
}

impl EntityRef<'_> {
    /// Anchor position (centre, or centre-bottom for gravity bodies)
    pub fn pos(&self) -> Vec2 {
        match self {
            EntityRef::Fruit(f) => f.body.pos,
            EntityRef::Bolt(b) => b.body.pos,
            EntityRef::Robot(r) => r.body.pos,
            EntityRef::Pop(p) => p.pos,
            EntityRef::Orb(o) => o.body.pos,
            EntityRef::Player(p) => p.body.pos,
        }
    }

    /// Removal predicate; the end-of-tick sweep keeps only live entities
    pub fn is_alive(&self) -> bool {
        match self {
            EntityRef::Fruit(f) => f.is_alive(),
            EntityRef::Bolt(b) => b.active,
            EntityRef::Robot(r) => r.alive,
            EntityRef::Pop(p) => p.is_alive(),
            EntityRef::Orb(o) => !o.expired(),
            EntityRef::Player(_) => true,
        }
    }

    /// Sprite identifier for the current world tick
    pub fn image(&self, timer: i64) -> String {
        match self {
            EntityRef::Fruit(f) => f.image(timer),
            EntityRef::Bolt(b) => b.image(timer),
            EntityRef::Robot(r) => r.image(timer),
            EntityRef::Pop(p) => p.image(),
            EntityRef::Orb(o) => o.image(),
            EntityRef::Player(p) => p.image(timer),
        }
    }
}
