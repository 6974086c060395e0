//! Error types
//!
//! Only [`EngineError`] is ever returned as a failure. Configuration
//! problems are recoverable: they are reported as a [`ConfigIssue`]
//! next to the value that was used instead.

use serde::Serialize;
use thiserror::Error;

/// Failures of the round engine
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Player action is not part of the game's legal set
    #[error("invalid action for {game}: {action}")]
    InvalidAction { game: &'static str, action: String },

    /// Parameter cannot be changed mid-session under the active preset
    #[error("{parameter} is fixed by the {preset} preset; apply parameters to change it")]
    LockedParameter {
        parameter: &'static str,
        preset: &'static str,
    },
}

impl EngineError {
    pub fn invalid_action(game: &'static str, action: impl ToString) -> Self {
        EngineError::InvalidAction {
            game,
            action: action.to_string(),
        }
    }
}

/// Recovered problem with raw configuration input
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    /// Input was missing or not a finite number; the default was used
    #[error("input is not a number, using default {default}")]
    InvalidInput { default: f64 },

    /// Input was numeric but outside the valid range; clamped to `bound`
    #[error("input {requested} is out of range, clamped to {bound}")]
    OutOfRange { requested: f64, bound: f64 },
}
