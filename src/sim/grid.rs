//! Level collision grid
//!
//! A level is a list of rows; each row is either empty (fully open) or a
//! string with one character per column, where anything but a space is a
//! solid block.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Level layouts, cycled by level index
pub const LEVELS: [[&str; 17]; 3] = [
    [
        "XXXXX     XXXXXXXX     XXXXX",
        "",
        "",
        "",
        "",
        "   XXXXXXX        XXXXXXX   ",
        "",
        "",
        "",
        "   XXXXXXXXXXXXXXXXXXXXXX   ",
        "",
        "",
        "",
        "XXXXXXXXX          XXXXXXXXX",
        "",
        "",
        "",
    ],
    [
        "XXXX    XXXXXXXXXXXX    XXXX",
        "",
        "",
        "",
        "",
        "    XXXXXXXXXXXXXXXXXXXX    ",
        "",
        "",
        "",
        "XXXXXX                XXXXXX",
        "      X              X      ",
        "       X            X       ",
        "        X          X        ",
        "         X        X         ",
        "",
        "",
        "",
    ],
    [
        "XXXX    XXXX    XXXX    XXXX",
        "",
        "",
        "",
        "",
        "  XXXXXXXX        XXXXXXXX  ",
        "",
        "",
        "",
        "XXXX      XXXXXXXX      XXXX",
        "",
        "",
        "",
        "    XXXXXX        XXXXXX    ",
        "",
        "",
        "",
    ],
];

/// Occupancy map for the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<String>,
}

impl Grid {
    /// Build the grid for a level. The top row is repeated at the bottom so
    /// things falling off the screen land on the same shape they wrap onto.
    pub fn for_level(level: u32) -> Self {
        let layout = &LEVELS[level as usize % LEVELS.len()];
        let mut rows: Vec<String> = layout.iter().map(|r| (*r).to_owned()).collect();
        rows.push(layout[0].to_owned());
        Self { rows }
    }

    /// Build a grid from arbitrary rows (no wrap row is added)
    pub fn from_rows<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Is there a block at pixel `(x, y)`?
    ///
    /// Row 0 is never solid for collision purposes; out-of-range cells are
    /// open.
    pub fn occupied(&self, x: i32, y: i32) -> bool {
        let grid_x = (x - LEVEL_X_OFFSET).div_euclid(GRID_BLOCK_SIZE);
        let grid_y = y.div_euclid(GRID_BLOCK_SIZE);

        if grid_y <= 0 || grid_y as usize >= self.rows.len() {
            return false;
        }
        if grid_x < 0 || grid_x as usize >= NUM_COLUMNS {
            return false;
        }

        let row = self.rows[grid_y as usize].as_bytes();
        if row.is_empty() {
            return false;
        }
        row.get(grid_x as usize).is_some_and(|c| *c != b' ')
    }

    /// Is column `col` of the top row open?
    pub fn top_open(&self, col: usize) -> bool {
        self.rows
            .first()
            .and_then(|r| r.as_bytes().get(col))
            .is_some_and(|c| *c == b' ')
    }

    /// Solid cells as `(column, row)` pairs, for drawing
    pub fn solid_cells(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .take(NUM_ROWS)
            .enumerate()
            .flat_map(|(y, row)| {
                row.bytes()
                    .enumerate()
                    .filter(|(_, c)| *c != b' ')
                    .map(move |(x, _)| (x, y))
            })
            .collect()
    }
}
