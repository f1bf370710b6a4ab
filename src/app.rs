//! Application shell
//!
//! [`App`] is the one object the frame loop holds. It owns the current
//! screen and its world, the master random source that seeds each new
//! world, and the audio manager that plays whatever the world asked for.

use serde::Serialize;

use crate::audio::AudioManager;
use crate::render::{self, Overlay, RenderFrame};
use crate::sim::{Player, SimRng, TickInput, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Title screen over a playerless world
    Menu,
    Play { paused: bool },
    /// Finished world kept on screen
    GameOver,
}

pub struct App {
    screen: Screen,
    world: World,
    rng: SimRng,
    audio: AudioManager,
}

impl App {
    pub fn new(seed: u64, mut audio: AudioManager) -> Self {
        let mut rng = SimRng::new(seed);
        let world = World::new(None, Box::new(SimRng::new(rng.next_seed())));
        audio.start_music();
        log::info!("Cavern started (seed {seed})");
        Self {
            screen: Screen::Menu,
            world,
            rng,
            audio,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn new_world(&mut self, player: Option<Player>) -> World {
        World::new(player, Box::new(SimRng::new(self.rng.next_seed())))
    }

    /// Run one frame
    pub fn update(&mut self, input: &TickInput) {
        match self.screen {
            Screen::Menu => {
                if input.fire_pressed {
                    log::info!("Starting game");
                    self.world = self.new_world(Some(Player::new()));
                    self.screen = Screen::Play { paused: false };
                } else {
                    self.world.update(None);
                }
            }
            Screen::Play { paused } => {
                let paused = paused != input.pause_pressed;
                self.screen = Screen::Play { paused };

                if !paused {
                    if self.world.game_over() {
                        let score = self.world.player.as_ref().map_or(0, |p| p.score);
                        log::info!(
                            "Game over on level {} with score {}",
                            self.world.level + 1,
                            score
                        );
                        self.world.play_sound("over", 1);
                        self.screen = Screen::GameOver;
                    } else {
                        self.world.update(Some(input));
                    }
                }
            }
            Screen::GameOver => {
                if input.fire_pressed {
                    log::info!("Back to menu");
                    self.world = self.new_world(None);
                    self.screen = Screen::Menu;
                }
            }
        }

        let sounds = self.world.drain_sounds();
        self.audio.play_all(&sounds);
    }

    /// The world's frame plus this screen's overlay
    pub fn frame(&self) -> RenderFrame {
        let mut frame = self.world.frame();
        frame.overlay = match self.screen {
            Screen::Menu => Some(render::title_overlay(self.world.timer)),
            Screen::Play { paused: true } => Some(render::pause_overlay()),
            Screen::Play { paused: false } => None,
            Screen::GameOver => Some(Overlay::GameOver),
        };
        frame
    }
}
