//! World state
//!
//! The world owns the level grid, every entity collection and the queue of
//! robots still to come. Entities never point back at it; the world lends
//! them what they need through a [`TickContext`] during each update.

use super::bolt::Bolt;
use super::context::{SoundRequest, TickContext};
use super::entity::EntityRef;
use super::fruit::Fruit;
use super::grid::Grid;
use super::orb::Orb;
use super::player::Player;
use super::pop::Pop;
use super::rng::{Randomness, shuffle};
use super::robot::{Robot, RobotKind};
use crate::consts::*;

/// Number of background palettes
pub const PALETTE_COUNT: u32 = 4;
/// Cap on robots alive at once, whatever the level
pub const MAX_ENEMIES_CAP: usize = 8;

pub struct World {
    pub grid: Grid,
    /// Zero-based level index
    pub level: u32,
    /// Background palette index
    pub level_colour: u32,
    /// Ticks since the level started (the first update brings it to 0)
    pub timer: i64,
    pub fruits: Vec<Fruit>,
    pub bolts: Vec<Bolt>,
    pub enemies: Vec<Robot>,
    pub pops: Vec<Pop>,
    pub orbs: Vec<Orb>,
    /// Robots still to spawn this level, taken from the back
    pub pending_enemies: Vec<RobotKind>,
    pub player: Option<Player>,
    pub(crate) rng: Box<dyn Randomness>,
    pub(crate) sounds: Vec<SoundRequest>,
    pub(crate) next_id: u32,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("level", &self.level)
            .field("timer", &self.timer)
            .field("fruits", &self.fruits.len())
            .field("bolts", &self.bolts.len())
            .field("enemies", &self.enemies.len())
            .field("pops", &self.pops.len())
            .field("orbs", &self.orbs.len())
            .field("pending_enemies", &self.pending_enemies.len())
            .field("player", &self.player.is_some())
            .finish()
    }
}

impl World {
    /// Create a world at level 0. Pass no player for the menu backdrop.
    pub fn new(player: Option<Player>, rng: Box<dyn Randomness>) -> Self {
        let mut world = Self {
            grid: Grid::for_level(0),
            level: 0,
            level_colour: 0,
            timer: -1,
            fruits: Vec::new(),
            bolts: Vec::new(),
            enemies: Vec::new(),
            pops: Vec::new(),
            orbs: Vec::new(),
            pending_enemies: Vec::new(),
            player,
            rng,
            sounds: Vec::new(),
            next_id: 1,
        };
        world.start_level();
        world
    }

    /// Move on to the next level, keeping the player's score and lives
    pub fn next_level(&mut self) {
        self.level_colour = (self.level_colour + 1) % PALETTE_COUNT;
        self.level += 1;
        self.start_level();
    }

    fn start_level(&mut self) {
        self.grid = Grid::for_level(self.level);
        self.timer = -1;

        if let Some(player) = self.player.as_mut() {
            player.reset();
        }

        self.fruits.clear();
        self.bolts.clear();
        self.enemies.clear();
        self.pops.clear();
        self.orbs.clear();

        let total = 10 + self.level as usize;
        let aggressive = 1 + (self.level as usize * 2) / 3;
        self.pending_enemies = std::iter::repeat_n(RobotKind::Aggressive, aggressive)
            .chain(std::iter::repeat_n(RobotKind::Normal, total - aggressive))
            .collect();
        shuffle(&mut *self.rng, &mut self.pending_enemies);

        log::info!(
            "Starting level {} ({} robots, {} aggressive)",
            self.level + 1,
            total,
            aggressive
        );
        self.play_sound("level", 1);
    }

    /// Robots allowed on screen at once
    pub fn max_enemies(&self) -> usize {
        ((self.level as usize + 6) / 2).min(MAX_ENEMIES_CAP)
    }

    /// Pick where the next robot drops in: the first open top-row column
    /// scanning right (with wraparound) from a random start.
    pub fn robot_spawn_x(&mut self) -> f32 {
        let start = self.rng.range(0, NUM_COLUMNS as i32 - 1) as usize;
        let open = (0..NUM_COLUMNS)
            .map(|i| (start + i) % NUM_COLUMNS)
            .find(|&col| self.grid.top_open(col));
        match open {
            Some(col) => (GRID_BLOCK_SIZE * col as i32 + LEVEL_X_OFFSET + 12) as f32,
            None => WIDTH as f32 / 2.0,
        }
    }

    /// Borrow the shared services for an entity update or spawn
    pub(crate) fn context(&mut self) -> TickContext<'_> {
        TickContext {
            grid: &self.grid,
            rng: &mut *self.rng,
            sounds: &mut self.sounds,
            audible: self.player.is_some(),
            level: self.level,
            next_id: &mut self.next_id,
        }
    }

    /// Queue a sound on behalf of the shell (silent without a player)
    pub fn play_sound(&mut self, name: &'static str, count: u32) {
        self.context().play_sound(name, count);
    }

    /// Take the sound requests queued since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.sounds)
    }

    /// Every entity in draw order: fruit, bolts, robots, pops, orbs, player
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.fruits
            .iter()
            .map(EntityRef::Fruit)
            .chain(self.bolts.iter().map(EntityRef::Bolt))
            .chain(self.enemies.iter().map(EntityRef::Robot))
            .chain(self.pops.iter().map(EntityRef::Pop))
            .chain(self.orbs.iter().map(EntityRef::Orb))
            .chain(self.player.iter().map(EntityRef::Player))
    }

    /// Has the player run out of lives?
    pub fn game_over(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.lives < 0)
    }
}
