//! Error types for fretboard construction and pointer handling.

use thiserror::Error;

/// Everything that can go wrong while building or driving a fretboard.
#[derive(Error, Debug)]
pub enum FretboardError {
    /// Options that cannot produce a drawable fretboard (too few strings,
    /// an empty fret range, a non-positive canvas, ...).
    #[error("Invalid fretboard configuration: {0}")]
    InvalidConfiguration(String),

    /// The drawing surface could not report its screen transform, so a
    /// pointer position cannot be mapped into surface space.
    #[error("Pointer transform unavailable: {0}")]
    TransformUnavailable(String),

    /// Malformed options JSON, or a value that failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FretboardError>;
