//! World state and core simulation types

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only a full reset leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Touched an obstacle
    HitObstacle,
    /// Dropped below the bottom of the viewport
    FellOff,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::HitObstacle => "hit an obstacle",
            EndReason::FellOff => "fell off the world",
        }
    }
}

/// Axis-aligned rectangle used for platforms, walls and obstacles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Dash,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Anything else is ignored.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Jump),
            "Shift" => Some(Key::Dash),
            _ => None,
        }
    }
}

/// Which keys are currently held, written by input events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<Key, bool>,
}

impl KeyState {
    pub fn set(&mut self, key: Key, pressed: bool) {
        self.held.insert(key, pressed);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Either horizontal direction is held
    pub fn horizontal_held(&self) -> bool {
        self.is_held(Key::Left) || self.is_held(Key::Right)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub is_jumping: bool,
    pub is_wall_sliding: bool,
    /// -1 facing left, +1 facing right
    pub facing: i8,
    /// Ticks until dash is available again
    pub dash_cooldown: u32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
    trail_capacity: usize,
}

impl Player {
    /// Player at the spawn point, airborne and facing right
    pub fn spawn(trail_capacity: usize) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            is_jumping: true,
            is_wall_sliding: false,
            facing: 1,
            dash_cooldown: 0,
            trail: VecDeque::with_capacity(trail_capacity + 1),
            trail_capacity,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn facing_sign(&self) -> f32 {
        f32::from(self.facing)
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    /// Record current position to trail, dropping the oldest entry when full
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Seed the layout was generated from
    pub seed: u64,
    /// Viewport size the walls and fall-off line were built for
    pub viewport: Vec2,
    pub player: Player,
    pub platforms: Vec<Rect>,
    /// Left and right boundary walls
    pub walls: [Rect; 2],
    pub obstacles: Vec<Rect>,
    #[serde(skip)]
    pub keys: KeyState,
    /// Top-left of the visible area in world space
    pub camera: Vec2,
    pub score: i64,
    /// Ticks elapsed while running
    pub game_time: u64,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
}

impl World {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the run. The first reason wins; later calls are ignored.
    pub fn end(&mut self, reason: EndReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        log::info!(
            "Game over ({}): score {}, {} ticks",
            reason.as_str(),
            self.score,
            self.game_time
        );
    }

    /// Distance label shown in the HUD
    pub fn distance(&self) -> i64 {
        self.player.pos.x.floor() as i64
    }

    /// Whole seconds of play at the given tick rate
    pub fn elapsed_seconds(&self, ticks_per_second: f32) -> u64 {
        (self.game_time as f64 / f64::from(ticks_per_second)).floor() as u64
    }
}
