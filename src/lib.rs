//! Vector Parkour - a side-scrolling canvas platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, collisions)
//! - `renderer`: Draws a world onto an abstract 2D surface
//! - `session`: Owns one running world and drives it frame by frame
//! - `config`: Data-driven movement tuning
//! - `error`: Host and tuning errors

pub mod config;
pub mod error;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ParkourConfig, TickMode};
pub use error::ParkourError;
pub use session::{FrameOutcome, GameSession};

/// World layout constants
pub mod consts {
    /// Player spawn point
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Starting platform under the spawn point
    pub const START_PLATFORM_X: f32 = 0.0;
    pub const START_PLATFORM_Y: f32 = 400.0;
    pub const START_PLATFORM_WIDTH: f32 = 300.0;

    /// Scattered platforms (in addition to the starting one)
    pub const PLATFORM_COUNT: usize = 15;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 80.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 200.0;
    pub const PLATFORM_BASE_Y: f32 = 300.0;
    pub const PLATFORM_STEP_Y: f32 = 120.0;
    /// Horizontal scatter span, as a multiple of viewport width
    pub const PLATFORM_SPAN_FACTOR: f32 = 3.0;

    /// Obstacles (touching one ends the run)
    pub const OBSTACLE_COUNT: usize = 20;
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const OBSTACLE_BASE_X: f32 = 500.0;
    pub const OBSTACLE_STEP_X: f32 = 300.0;
    pub const OBSTACLE_JITTER_X: f32 = 200.0;
    pub const OBSTACLE_BASE_Y: f32 = 300.0;
    pub const OBSTACLE_STEP_Y: f32 = 100.0;

    /// Boundary walls flush to the viewport edges
    pub const WALL_THICKNESS: f32 = 20.0;

    /// World units per score point
    pub const SCORE_UNIT: f32 = 10.0;
    /// Assumed display refresh rate when ticking once per frame
    pub const PER_FRAME_TICK_RATE: f32 = 60.0;

    /// Canvas fraction of the browser window
    pub const CANVAS_WINDOW_FRACTION: f64 = 0.95;

    /// Maximum fixed-rate substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
