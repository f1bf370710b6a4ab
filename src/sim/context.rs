//! Per-tick context handed to entity updates
//!
//! Entities never hold on to the world. Each update borrows the read-only
//! level data and the shared services (randomness, sound requests, id
//! allocation) through a [`TickContext`] built fresh by the world.

use serde::Serialize;

use super::grid::Grid;
use super::rng::{Randomness, choose};

/// A request to play one variant of a named sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundRequest {
    pub name: &'static str,
    pub variant: u32,
}

impl SoundRequest {
    /// Asset key, e.g. `pop2`
    pub fn key(&self) -> String {
        format!("{}{}", self.name, self.variant)
    }
}

pub struct TickContext<'a> {
    pub grid: &'a Grid,
    pub rng: &'a mut dyn Randomness,
    pub sounds: &'a mut Vec<SoundRequest>,
    /// Only worlds that own a player make noise
    pub audible: bool,
    pub level: u32,
    pub next_id: &'a mut u32,
}

impl TickContext<'_> {
    /// Queue a random variant in `0..count` of `name`
    pub fn play_sound(&mut self, name: &'static str, count: u32) {
        if !self.audible {
            return;
        }
        let variant = self.rng.range(0, count as i32 - 1) as u32;
        self.sounds.push(SoundRequest { name, variant });
    }

    pub fn alloc_id(&mut self) -> u32 {
        let id = *self.next_id;
        *self.next_id += 1;
        id
    }

    /// Per-tick chance that a ready robot fires, rising with level
    pub fn fire_probability(&self) -> f64 {
        0.001 + 0.0001 * f64::from(self.level.min(100))
    }

    pub fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        choose(&mut *self.rng, items)
    }
}

#[cfg(test)]
pub(crate) mod harness {
    use super::*;
    use crate::consts::NUM_ROWS;
    use crate::sim::rng::ScriptedRng;

    /// Owns everything a `TickContext` borrows
    pub struct Harness {
        pub grid: Grid,
        pub rng: ScriptedRng,
        pub sounds: Vec<SoundRequest>,
        pub next_id: u32,
        pub level: u32,
        pub audible: bool,
    }

    impl Harness {
        pub fn new(grid: Grid) -> Self {
            Self {
                grid,
                rng: ScriptedRng::new(),
                sounds: Vec::new(),
                next_id: 1,
                level: 0,
                audible: true,
            }
        }

        pub fn open() -> Self {
            Self::new(Grid::from_rows(vec![""; NUM_ROWS]))
        }

        pub fn ctx(&mut self) -> TickContext<'_> {
            TickContext {
                grid: &self.grid,
                rng: &mut self.rng,
                sounds: &mut self.sounds,
                audible: self.audible,
                level: self.level,
                next_id: &mut self.next_id,
            }
        }

        pub fn sound_names(&self) -> Vec<&'static str> {
            self.sounds.iter().map(|s| s.name).collect()
        }
    }
}
