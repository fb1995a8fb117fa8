//! Error types
//!
//! The simulation itself never fails; a run ending is modelled as
//! `GamePhase::GameOver`. These errors cover tuning documents and the
//! browser host.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParkourError {
    /// Tuning JSON could not be parsed
    #[error("invalid tuning document: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Tuning parsed but a value is out of range
    #[error("invalid tuning value `{field}`: {reason}")]
    ConfigValue { field: &'static str, reason: String },

    /// Tuning file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// A required DOM element is missing
    #[error("element `#{0}` not found")]
    MissingElement(&'static str),

    /// The canvas has no 2D rendering context
    #[error("canvas has no 2d context")]
    MissingContext,

    /// A browser API call threw
    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, ParkourError>;
