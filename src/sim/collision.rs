//! Hit boxes and the collision-stepped mover
//!
//! Movement advances one pixel at a time so nothing ever embeds itself in a
//! block. The grid is only consulted when a step crosses into a new cell in
//! the direction of travel; this gated check is what gives the platforms
//! their one-way feel (you can jump up through them and land on top).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::*;

/// Which point of the box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Centre,
    CentreBottom,
}

/// Position plus an axis-aligned hit box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub anchor: Anchor,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, anchor: Anchor) -> Self {
        Self { pos, size, anchor }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        match self.anchor {
            Anchor::Centre => self.pos.y - self.size.y / 2.0,
            Anchor::CentreBottom => self.pos.y - self.size.y,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.size.x
    }

    /// Middle of the hit box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.top() + self.size.y / 2.0)
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Step up to `speed` pixels along `(dx, dy)`.
    ///
    /// Returns `true` if a bound or block stopped the move; the position is
    /// left at the last pixel that was clear.
    pub fn move_by(&mut self, grid: &Grid, dx: i32, dy: i32, speed: i32) -> bool {
        let mut new_x = self.pos.x as i32;
        let mut new_y = self.pos.y as i32;

        for _ in 0..speed {
            new_x += dx;
            new_y += dy;

            if !(MIN_X..=MAX_X).contains(&new_x) {
                return true;
            }

            let crossing = (dy > 0 && new_y.rem_euclid(GRID_BLOCK_SIZE) == 0)
                || (dx > 0 && new_x.rem_euclid(GRID_BLOCK_SIZE) == 0)
                || (dx < 0 && new_x.rem_euclid(GRID_BLOCK_SIZE) == GRID_BLOCK_SIZE - 1);
            if crossing && grid.occupied(new_x, new_y) {
                return true;
            }

            self.pos = Vec2::new(new_x as f32, new_y as f32);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open_grid() -> Grid {
        Grid::from_rows(vec![""; NUM_ROWS])
    }

    fn body_at(x: f32, y: f32) -> Body {
        let size = Vec2::new(56.0, 70.0);
        Body::new(Vec2::new(x, y), size, Anchor::CentreBottom)
    }

    #[test]
    fn test_edges() {
        let b = body_at(100.0, 200.0);
        assert_eq!(b.top(), 130.0);
        assert_eq!(b.bottom(), 200.0);
        assert_eq!(b.left(), 72.0);
        assert_eq!(b.center(), Vec2::new(100.0, 165.0));
        assert!(b.contains(Vec2::new(72.0, 130.0)));
        assert!(!b.contains(Vec2::new(128.0, 150.0)));
        assert!(!b.contains(Vec2::new(100.0, 200.0)));

        let orb = Body::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(70.0, 70.0),
            Anchor::Centre,
        );
        assert_eq!(orb.top(), 65.0);
        assert_eq!(orb.center(), orb.pos);
    }

    #[test]
    fn test_move_free() {
        let mut b = body_at(400.0, 60.0);
        assert!(!b.move_by(&open_grid(), 1, 0, 4));
        assert_eq!(b.pos, Vec2::new(404.0, 60.0));
    }

    #[test]
    fn test_move_stops_at_bound() {
        let mut b = body_at(727.0, 60.0);
        assert!(b.move_by(&open_grid(), 1, 0, 7));
        assert_eq!(b.pos.x, 730.0);

        let mut b = body_at(71.0, 60.0);
        assert!(b.move_by(&open_grid(), -1, 0, 4));
        assert_eq!(b.pos.x, 70.0);
    }

    #[test]
    fn test_lands_on_block_row() {
        let grid = Grid::for_level(0);
        // Row 5 (y 125..150) is solid at column 3 (x 125..150)
        let mut b = body_at(130.0, 118.0);
        assert!(b.move_by(&grid, 0, 1, 10));
        assert_eq!(b.pos.y, 124.0);
    }

    #[test]
    fn test_upward_motion_passes_through_blocks() {
        let grid = Grid::for_level(0);
        let mut b = body_at(130.0, 160.0);
        assert!(!b.move_by(&grid, 0, -1, 16));
        assert_eq!(b.pos.y, 144.0);
    }

    #[test]
    fn test_walks_into_wall() {
        let grid = Grid::for_level(0);
        // Row 13 is solid for columns 0..9 (x 50..275): walking left along y=330
        let mut b = body_at(285.0, 330.0);
        assert!(b.move_by(&grid, -1, 0, 20));
        assert_eq!(b.pos.x, 275.0);
    }

    #[test]
    fn test_zero_speed_leaves_fractional_position() {
        let mut b = body_at(100.5, 60.25);
        assert!(!b.move_by(&open_grid(), 0, 1, 0));
        assert_eq!(b.pos, Vec2::new(100.5, 60.25));
    }

    proptest! {
        #[test]
        fn prop_horizontal_move_stays_in_bounds(
            x in 70i32..=730,
            dir in prop::sample::select(vec![-1i32, 1]),
            speed in 0i32..40,
        ) {
            let mut b = body_at(x as f32, 60.0);
            let collided = b.move_by(&open_grid(), dir, 0, speed);
            prop_assert!(b.pos.x >= 70.0 && b.pos.x <= 730.0);
            let target = x + dir * speed;
            if (70..=730).contains(&target) {
                prop_assert!(!collided);
                prop_assert_eq!(b.pos.x, target as f32);
            } else {
                prop_assert!(collided);
                prop_assert_eq!(b.pos.x, if dir > 0 { 730.0 } else { 70.0 });
            }
        }
    }
}
