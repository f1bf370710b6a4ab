//! Render contract
//!
//! Nothing here draws. A [`RenderFrame`] lists every image to put on screen
//! this frame, by asset name and position, so any presentation layer (or a
//! JSON dump from the headless runner) can show the game.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{Player, World};

/// Width of the bitmap font's glyphs for 'A'..='Z'; everything else uses
/// the width of 'A'
pub const CHAR_WIDTH: [i32; 26] = [
    27, 26, 25, 26, 25, 25, 26, 25, 12, 26, 26, 25, 33, 25, 26, 25, 27, 26, 26, 25, 26, 26, 38, 25,
    25, 25,
];

/// Top of the status bar
pub const STATUS_Y: i32 = 450;
/// Baseline of status bar text
pub const STATUS_TEXT_Y: i32 = 451;
/// Where the "press space" prompt sits on the title screen
pub const PROMPT_POS: (i32, i32) = (130, 280);

/// An entity sprite placed by its anchor point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub image: String,
    pub x: f32,
    pub y: f32,
}

/// An image placed by its top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blit {
    pub image: String,
    pub x: i32,
    pub y: i32,
}

impl Blit {
    fn new(image: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            image: image.into(),
            x,
            y,
        }
    }
}

/// Status bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    /// One-based level number as shown to the player
    pub level: u32,
    pub lives: i32,
    pub health: i32,
    /// Life, plus and health icons, left to right
    pub icons: Vec<Blit>,
    /// Score and level text glyphs
    pub text: Vec<Blit>,
}

/// Screen-specific layer drawn over the world
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Title { prompt: Blit },
    Paused { text: Vec<Blit> },
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Background image, `bg{palette}`
    pub background: String,
    /// Block image used for every solid cell, `block{level % 4}`
    pub block_image: String,
    pub blocks: Vec<Blit>,
    /// Entities in draw order
    pub sprites: Vec<Sprite>,
    pub hud: Option<Hud>,
    pub overlay: Option<Overlay>,
}

impl World {
    /// Everything the world itself contributes to a frame
    pub fn frame(&self) -> RenderFrame {
        let block_image = format!("block{}", self.level % 4);
        let blocks = self
            .grid
            .solid_cells()
            .into_iter()
            .map(|(col, row)| {
                Blit::new(
                    block_image.clone(),
                    LEVEL_X_OFFSET + col as i32 * GRID_BLOCK_SIZE,
                    row as i32 * GRID_BLOCK_SIZE,
                )
            })
            .collect();

        let sprites = self
            .entities()
            .map(|e| {
                let pos = e.pos();
                Sprite {
                    image: e.image(self.timer),
                    x: pos.x,
                    y: pos.y,
                }
            })
            .collect();

        RenderFrame {
            background: format!("bg{}", self.level_colour),
            block_image,
            blocks,
            sprites,
            hud: self.player.as_ref().map(|p| hud(p, self.level)),
            overlay: None,
        }
    }
}

fn hud(player: &Player, level: u32) -> Hud {
    let score = player.score.to_string();
    let score_x = WIDTH - 2 - CHAR_WIDTH[0] * score.len() as i32;

    let mut text = layout_text(&score, STATUS_TEXT_Y, Some(score_x));
    let label = format!("LEVEL {}", level + 1);
    text.extend(layout_text(&label, STATUS_TEXT_Y, None));

    Hud {
        score: player.score,
        level: level + 1,
        lives: player.lives,
        health: player.health,
        icons: status_icons(player.lives, player.health),
        text,
    }
}

/// Up to two life icons, a plus when there are more, then one health icon
/// per point of health (hidden once the last life is gone)
pub fn status_icons(lives: i32, health: i32) -> Vec<Blit> {
    let mut names: Vec<&str> = vec!["life"; lives.clamp(0, 2) as usize];
    if lives > 2 {
        names.push("plus");
    }
    if lives >= 0 {
        names.extend(std::iter::repeat_n("health", health.max(0) as usize));
    }

    let mut x = 0;
    names
        .into_iter()
        .map(|name| {
            let blit = Blit::new(name, x, STATUS_Y);
            x += icon_width(name);
            blit
        })
        .collect()
}

fn icon_width(name: &str) -> i32 {
    match name {
        "life" => 44,
        _ => 40,
    }
}

pub fn char_width(c: char) -> i32 {
    let index = (c as i32 - 'A' as i32).max(0) as usize;
    CHAR_WIDTH.get(index).copied().unwrap_or(CHAR_WIDTH[0])
}

/// Glyphs for `text` at height `y`, starting at `x` or centred on screen
pub fn layout_text(text: &str, y: i32, x: Option<i32>) -> Vec<Blit> {
    let width: i32 = text.chars().map(char_width).sum();
    let mut x = x.unwrap_or((WIDTH - width) / 2);
    text.chars()
        .map(|c| {
            let glyph = Blit::new(format!("font0{}", c as u32), x, y);
            x += char_width(c);
            glyph
        })
        .collect()
}

/// Frame of the title screen's "press space" animation; holds on the last
/// frame for most of the cycle
pub fn prompt_frame(timer: i64) -> i64 {
    ((timer + 40).rem_euclid(160) / 4).min(9)
}

pub fn title_overlay(timer: i64) -> Overlay {
    let frame = prompt_frame(timer);
    Overlay::Title {
        prompt: Blit::new(format!("space{frame}"), PROMPT_POS.0, PROMPT_POS.1),
    }
}

pub fn pause_overlay() -> Overlay {
    Overlay::Paused {
        text: layout_text("PAUSED", HEIGHT / 2 - 20, None),
    }
}
