//! Spin state machine: Idle -> Spinning -> Idle (with winner).
//!
//! The session is driven by discrete events (trigger, timer expiry,
//! dismissal) and owns rotation and winner. Timers live with the caller; the
//! session only hands out a [`SpinTicket`] whose id must be presented again
//! when the timer fires.

use crate::error::WheelError;
use crate::targeting::SpinTargetingEngine;
use crate::types::{Participant, SpinId, SpinPlan, WheelState};
use rand::Rng;

/// Why a spin trigger was ignored. Not an error: the trigger is simply a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpinRejected {
    #[error("Wheel is already spinning")]
    AlreadySpinning,

    #[error("Need at least 2 participants to spin, have {count}")]
    NotEnoughParticipants { count: usize },

    #[error("No participant is eligible to win")]
    NoEligibleParticipants,
}

#[derive(Debug, Clone, PartialEq)]
enum SpinPhase {
    Idle,
    Spinning {
        spin_id: SpinId,
        pending_winner: Participant,
    },
}

/// Handed out when a spin starts; present `spin_id` to [`SpinSession::finish_spin`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpinTicket {
    pub spin_id: SpinId,
    pub plan: SpinPlan,
}

#[derive(Debug, Clone)]
pub struct SpinSession {
    engine: SpinTargetingEngine,
    rotation: f64,
    phase: SpinPhase,
    winner: Option<Participant>,
    last_spin_id: SpinId,
}

impl Default for SpinSession {
    fn default() -> Self {
        Self::new(SpinTargetingEngine::default())
    }
}

impl SpinSession {
    pub fn new(engine: SpinTargetingEngine) -> Self {
        Self {
            engine,
            rotation: 0.0,
            phase: SpinPhase::Idle,
            winner: None,
            last_spin_id: 0,
        }
    }

    pub fn engine(&self) -> &SpinTargetingEngine {
        &self.engine
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. })
    }

    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref()
    }

    pub fn snapshot(&self) -> WheelState {
        WheelState {
            rotation: self.rotation,
            is_spinning: self.is_spinning(),
            winner: self.winner.clone(),
        }
    }

    /// Start a spin against the roster as it is right now.
    ///
    /// The winner is fixed here; later roster edits do not change who is
    /// revealed. The new rotation is stored immediately so the host can
    /// start animating.
    pub fn try_spin<R: Rng + ?Sized>(
        &mut self,
        participants: &[Participant],
        rng: &mut R,
    ) -> Result<SpinTicket, SpinRejected> {
        if self.is_spinning() {
            return Err(SpinRejected::AlreadySpinning);
        }
        if participants.len() < 2 {
            return Err(SpinRejected::NotEnoughParticipants {
                count: participants.len(),
            });
        }

        let plan = self
            .engine
            .compute_spin(participants, self.rotation, rng)
            .map_err(|e| match e {
                WheelError::InsufficientParticipants { count } => {
                    SpinRejected::NotEnoughParticipants { count }
                }
                _ => SpinRejected::NoEligibleParticipants,
            })?;

        self.last_spin_id += 1;
        let spin_id = self.last_spin_id;

        self.winner = None;
        self.rotation = plan.new_rotation;
        self.phase = SpinPhase::Spinning {
            spin_id,
            pending_winner: plan.winner.clone(),
        };

        Ok(SpinTicket { spin_id, plan })
    }

    /// Timer for `spin_id` elapsed: go back to Idle and reveal the winner
    /// captured at trigger time. Returns `None` for a stale or unknown id.
    pub fn finish_spin(&mut self, spin_id: SpinId) -> Option<Participant> {
        match &self.phase {
            SpinPhase::Spinning {
                spin_id: current,
                pending_winner,
            } if *current == spin_id => {
                let winner = pending_winner.clone();
                self.phase = SpinPhase::Idle;
                self.winner = Some(winner.clone());
                Some(winner)
            }
            _ => None,
        }
    }

    /// Clear the revealed winner. Rotation is left alone.
    pub fn dismiss_winner(&mut self) -> Option<Participant> {
        if self.is_spinning() {
            return None;
        }
        self.winner.take()
    }
}
