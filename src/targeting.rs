//! Spin targeting: which sector wins, and how far the wheel must turn so the
//! fixed pointer at 3 o'clock stops inside that sector.
//!
//! Sector `i` spans `[i * arc, (i + 1) * arc)` degrees clockwise from the
//! pointer when the wheel is at rest. Rotating the wheel clockwise by `θ`
//! moves sector content backwards relative to the pointer, so the angle that
//! has to line up with the pointer is the negated sector bisector.

use crate::error::{WheelError, WheelResult};
use crate::types::{Participant, SpinPlan};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Full extra turns added to every spin
pub const DEFAULT_MIN_ROTATIONS: u32 = 8;

/// Share of the sector width covered by jitter, centered on the bisector
pub const JITTER_SPAN: f64 = 0.3;

/// Forward travel below this gets one more full turn
const SHORT_SPIN_DEGREES: f64 = 180.0;

/// Decides which roster positions may be drawn as the winner.
///
/// Kept separate from the random draw and the geometry so the rule can be
/// audited or replaced on its own.
pub trait EligibilityPolicy: Send + Sync + fmt::Debug {
    fn is_eligible(&self, index: usize, participants: &[Participant]) -> bool;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}

/// Never lets the participant in the second roster position win.
///
/// NOTE: this is the product's default rule even though the wheel is shown
/// as a fair draw. Whoever currently sits at index 1 is rendered like
/// everyone else but can never be selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipSecondSlot;

impl EligibilityPolicy for SkipSecondSlot {
    fn is_eligible(&self, index: usize, _participants: &[Participant]) -> bool {
        index != 1
    }

    fn name(&self) -> &str {
        "skip_second_slot"
    }
}

/// Every participant can win
#[derive(Debug, Clone, Copy, Default)]
pub struct AllEligible;

impl EligibilityPolicy for AllEligible {
    fn is_eligible(&self, _index: usize, _participants: &[Participant]) -> bool {
        true
    }

    fn name(&self) -> &str {
        "all_eligible"
    }
}

/// Rotation computed for a fixed winner and jitter sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTarget {
    pub new_rotation: f64,
    pub distance: f64,
    pub jitter: f64,
}

#[derive(Debug, Clone)]
pub struct SpinTargetingEngine {
    policy: Arc<dyn EligibilityPolicy>,
    min_rotations: u32,
}

impl Default for SpinTargetingEngine {
    fn default() -> Self {
        Self::new(Arc::new(SkipSecondSlot), DEFAULT_MIN_ROTATIONS)
    }
}

impl SpinTargetingEngine {
    pub fn new(policy: Arc<dyn EligibilityPolicy>, min_rotations: u32) -> Self {
        Self {
            policy,
            min_rotations,
        }
    }

    pub fn min_rotations(&self) -> u32 {
        self.min_rotations
    }

    pub fn policy(&self) -> &dyn EligibilityPolicy {
        self.policy.as_ref()
    }

    /// Roster positions the policy allows to win, in list order
    pub fn eligible_indices(&self, participants: &[Participant]) -> Vec<usize> {
        (0..participants.len())
            .filter(|&i| self.policy.is_eligible(i, participants))
            .collect()
    }

    /// Pick a winner and compute the rotation that lands the pointer on it.
    ///
    /// Draws exactly two values from `rng`: the winner among eligible
    /// indices, then the jitter sample.
    pub fn compute_spin<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        current_rotation: f64,
        rng: &mut R,
    ) -> WheelResult<SpinPlan> {
        let count = participants.len();
        if count < 2 {
            return Err(WheelError::InsufficientParticipants { count });
        }

        let eligible = self.eligible_indices(participants);
        if eligible.is_empty() {
            return Err(WheelError::NoEligibleParticipants);
        }

        let winner_index = eligible[rng.random_range(0..eligible.len())];
        let target = target_rotation(
            current_rotation,
            winner_index,
            count,
            rng.random::<f64>(),
            self.min_rotations,
        );

        tracing::debug!(
            policy = self.policy.name(),
            count,
            winner_index,
            current_rotation,
            new_rotation = target.new_rotation,
            "Spin targeted"
        );

        Ok(SpinPlan {
            winner_index,
            winner: participants[winner_index].clone(),
            new_rotation: target.new_rotation,
            distance: target.distance,
            jitter: target.jitter,
        })
    }
}

/// Rotation that stops the pointer on `winner_index`.
///
/// `jitter_sample` is a uniform draw from `[0, 1)`; it moves the stop point
/// up to 15% of a sector width either side of the bisector.
pub fn target_rotation(
    current_rotation: f64,
    winner_index: usize,
    count: usize,
    jitter_sample: f64,
    min_rotations: u32,
) -> RotationTarget {
    let arc = 360.0 / count as f64;
    let current_angle = current_rotation.rem_euclid(360.0);

    let target_stop = (-(winner_index as f64 * arc + arc / 2.0)).rem_euclid(360.0);
    let jitter = arc * JITTER_SPAN * (jitter_sample - 0.5);
    let precise_target = target_stop + jitter;

    let mut distance = (precise_target - current_angle).rem_euclid(360.0);
    if distance < SHORT_SPIN_DEGREES {
        distance += 360.0;
    }

    RotationTarget {
        new_rotation: current_rotation + 360.0 * f64::from(min_rotations) + distance,
        distance,
        jitter,
    }
}

/// Sector sitting under the fixed pointer for a given cumulative rotation
pub fn sector_under_pointer(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let arc = 360.0 / count as f64;
    let angle = (-rotation).rem_euclid(360.0);
    let index = (angle / arc).floor() as usize;
    Some(index.min(count - 1))
}
