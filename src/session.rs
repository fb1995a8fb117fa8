//! Game session
//!
//! Owns one world plus its tuning, and turns host callbacks (key events,
//! animation frames) into simulation ticks and draw calls.

use glam::Vec2;

use crate::config::{ParkourConfig, TickMode};
use crate::consts::MAX_SUBSTEPS;
use crate::renderer::{Surface, render};
use crate::sim::{self, EndReason, Key, World};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// Stop the loop and show the game-over screen
    GameOver(EndReason),
}

pub struct GameSession {
    world: World,
    config: ParkourConfig,
    /// Unconsumed time in fixed tick mode (seconds)
    accumulator: f32,
}

impl GameSession {
    /// Start a run sized to the viewport
    pub fn launch(viewport_width: f32, viewport_height: f32, seed: u64, config: ParkourConfig) -> Self {
        let world = sim::reset(viewport_width, viewport_height, seed, &config);
        Self {
            world,
            config,
            accumulator: 0.0,
        }
    }

    /// Throw the current run away and start a fresh one
    pub fn reset(&mut self, seed: u64) {
        let Vec2 { x, y } = self.world.viewport;
        self.world = sim::reset(x, y, seed, &self.config);
        self.accumulator = 0.0;
    }

    /// Restart with a new viewport, e.g. after the canvas was resized
    pub fn reset_with_viewport(&mut self, viewport_width: f32, viewport_height: f32, seed: u64) {
        self.world = sim::reset(viewport_width, viewport_height, seed, &self.config);
        self.accumulator = 0.0;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for hosts and tests that script the world directly
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &ParkourConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    /// Raw DOM key-down. Unmapped keys are ignored.
    pub fn key_down(&mut self, dom_key: &str) {
        if let Some(key) = Key::from_dom_key(dom_key) {
            sim::key_down(&mut self.world, key, &self.config);
        }
    }

    /// Raw DOM key-up. Unmapped keys are ignored.
    pub fn key_up(&mut self, dom_key: &str) {
        if let Some(key) = Key::from_dom_key(dom_key) {
            sim::key_up(&mut self.world, key);
        }
    }

    /// Drop all held keys, e.g. when listeners are detached mid-press
    pub fn release_keys(&mut self) {
        self.world.keys.clear();
    }

    /// Run the ticks owed for a frame that took `dt` seconds. Returns the
    /// number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        match self.config.tick_mode {
            TickMode::PerFrame => {
                sim::tick(&mut self.world, &self.config);
                1
            }
            TickMode::Fixed { .. } => {
                let Some(step) = self.config.tick_mode.step() else {
                    return 0;
                };
                self.accumulator += dt.clamp(0.0, 0.1);

                let mut substeps = 0;
                while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                    sim::tick(&mut self.world, &self.config);
                    self.accumulator -= step;
                    substeps += 1;
                    if self.world.is_game_over() {
                        break;
                    }
                }
                substeps
            }
        }
    }

    /// One animation frame: update, draw, and report whether to continue
    pub fn frame(&mut self, dt: f32, surface: &mut impl Surface) -> FrameOutcome {
        if let Some(reason) = self.end_reason() {
            return FrameOutcome::GameOver(reason);
        }

        self.update(dt);
        render(&self.world, self.config.tick_mode.ticks_per_second(), surface);

        match self.end_reason() {
            Some(reason) => FrameOutcome::GameOver(reason),
            None => FrameOutcome::Continue,
        }
    }

    fn end_reason(&self) -> Option<EndReason> {
        if self.world.is_game_over() {
            self.world.end_reason
        } else {
            None
        }
    }
}
