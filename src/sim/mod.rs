//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One `tick` per step, no wall-clock time
//! - No rendering or platform dependencies

pub mod collision;
pub mod generate;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{overlaps, overlaps_any};
pub use generate::{reset, reset_with_rng};
pub use input::{key_down, key_up};
pub use state::{EndReason, GamePhase, Key, KeyState, Player, Rect, World};
pub use tick::{score_for, tick};
