use crate::types::ParticipantId;

/// Result type for wheel operations
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors that can occur while rendering, targeting or managing the roster
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    #[error("Insufficient participants: need at least 2, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("No participant is eligible to win")]
    NoEligibleParticipants,

    #[error("Cannot render a wheel without participants")]
    EmptyWheel,

    #[error("Participant name must not be empty")]
    EmptyName,

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Roster cannot be changed while the wheel is spinning")]
    RosterLocked,

    #[error("Participant store failed: {0}")]
    Store(String),

    #[error("Audio playback failed: {0}")]
    Audio(String),
}

impl From<std::io::Error> for WheelError {
    fn from(e: std::io::Error) -> Self {
        WheelError::Store(e.to_string())
    }
}

impl From<serde_json::Error> for WheelError {
    fn from(e: serde_json::Error) -> Self {
        WheelError::Store(e.to_string())
    }
}
