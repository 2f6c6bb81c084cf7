//! Error types for the tween scheduler

use crate::ids::TweenId;
use crate::slot::TweenMode;

/// Errors surfaced by configuration and control calls.
///
/// Nothing on the per-frame path returns these; stepping is infallible.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TweenError {
    /// Loop count outside the one-byte range
    #[error("Invalid loop count: {0} (expected 0..=255)")]
    InvalidLoopCount(u32),

    /// Speed outside the one-byte range
    #[error("Invalid speed: {0} (expected 0..=255)")]
    InvalidSpeed(u32),

    /// Unknown easing code
    #[error("Unknown easing code: {0}")]
    UnknownEase(u8),

    /// Handle refers to a freed or reused slot
    #[error("Stale tween handle: {0:?}")]
    StaleHandle(TweenId),

    /// Timing source can no longer be switched
    #[error("Timing mode of {0:?} is fixed once the tween has started")]
    TimingLocked(TweenId),

    /// Operation does not apply to this tween's mode
    #[error("Tween {id:?} is {actual:?}, operation requires {expected}")]
    ModeMismatch {
        id: TweenId,
        actual: TweenMode,
        expected: &'static str,
    },

    /// Vector allocation requested for a non-vector mode
    #[error("{0:?} is not a vector mode")]
    NotVectorMode(TweenMode),

    /// Rejected configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tween scheduler result type
pub type Result<T> = core::result::Result<T, TweenError>;
