//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame, no wall-clock time
//! - Every random draw goes through the world's `Randomness`
//! - Stable update order (by entity kind, then insertion)
//! - No rendering, audio or platform dependencies

pub mod bolt;
pub mod collision;
pub mod context;
pub mod entity;
pub mod fruit;
pub mod gravity;
pub mod grid;
pub mod orb;
pub mod player;
pub mod pop;
pub mod rng;
pub mod robot;
pub mod state;
pub mod tick;

pub use bolt::Bolt;
pub use collision::{Anchor, Body};
pub use context::{SoundRequest, TickContext};
pub use entity::EntityRef;
pub use fruit::{Fruit, FruitKind};
pub use gravity::Gravity;
pub use grid::Grid;
pub use orb::Orb;
pub use player::{Player, PlayerState};
pub use pop::{Pop, PopKind};
pub use rng::{Randomness, SimRng};
pub use robot::{Robot, RobotKind};
pub use state::World;
pub use tick::TickInput;
