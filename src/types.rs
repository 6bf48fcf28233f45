use serde::{Deserialize, Serialize};

/// Opaque participant identifier, unique within the active roster
pub type ParticipantId = String;

/// Sequence number of a spin within one session
pub type SpinId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// CSS hex color taken from the palette at insertion time
    pub color: String,
}

impl Participant {
    /// Create a participant with a fresh id
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Observable wheel state handed to hosts.
///
/// `winner` is always `None` while `is_spinning` is true, and `rotation`
/// only ever grows over the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelState {
    /// Cumulative rotation in degrees, clockwise
    pub rotation: f64,
    pub is_spinning: bool,
    pub winner: Option<Participant>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            is_spinning: false,
            winner: None,
        }
    }
}

/// Result of targeting a single spin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpinPlan {
    pub winner_index: usize,
    pub winner: Participant,
    pub new_rotation: f64,
    /// Forward travel before the extra full turns, always in [180, 540)
    pub distance: f64,
    /// Offset from the sector bisector in degrees
    pub jitter: f64,
}
