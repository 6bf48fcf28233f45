use crate::types::{Participant, SpinId};
use serde::{Deserialize, Serialize};

/// Notifications pushed to hosts subscribed via `WheelApp::subscribe`.
///
/// `SpinStarted` deliberately carries no winner; it only becomes public
/// with `WinnerRevealed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum WheelEvent {
    RosterChanged {
        participants: Vec<Participant>,
    },
    SpinStarted {
        spin_id: SpinId,
        rotation: f64,
        duration_ms: u64,
    },
    WinnerRevealed {
        spin_id: SpinId,
        winner: Participant,
        /// RFC 3339 timestamp
        revealed_at: String,
    },
    WinnerDismissed,
    MuteChanged {
        muted: bool,
    },
}
