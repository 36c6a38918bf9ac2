//! Load-time and configuration errors
//!
//! Gameplay death is not an error; it is a state transition handled by
//! `sim::tick::crash`. Everything here is rejected before play starts.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown obstacle type tag {tag} at descriptor {position}")]
    UnknownObstacleTag { tag: u8, position: usize },

    #[error("level index {index} out of range ({count} levels available)")]
    LevelOutOfRange { index: usize, count: usize },

    #[error("unknown tuning preset '{0}'")]
    UnknownPreset(String),

    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
