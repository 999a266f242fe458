use std::io;

use thiserror::Error;

/// Errors raised at the validating boundaries of the arcade.
///
/// Simulation steps themselves never fail: blocked moves and terminal states
/// are ordinary outcomes. These variants cover malformed input that must not
/// reach the simulation state.
#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("unknown direction `{0}` (expected up, down, left or right)")]
    InvalidDirection(String),

    #[error("unknown game `{0}` (expected crates or snake)")]
    UnknownGame(String),

    #[error("invalid board layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("invalid snake body: {reason}")]
    InvalidBody { reason: String },

    #[error("settings file {path}: {source}")]
    Settings {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ArcadeError {
    pub(crate) fn layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }

    pub(crate) fn body(reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            reason: reason.into(),
        }
    }
}
