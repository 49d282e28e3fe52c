//! Leg activity under a barrier verdict.
//!
//! **Rule:**
//! - no barrier → active
//! - unknown direction or unknown verdict → active (absence of range
//!   evidence never deactivates a position)
//! - knock-out → active while the barrier has not been hit
//! - knock-in → active only once the barrier has been hit
//! - informational barriers never deactivate the leg

use crate::barrier::{BarrierMode, BarrierStatus, TriggerVerdict};
use crate::position::Leg;

/// Whether a leg still participates in payoff and rebate aggregation.
pub fn leg_is_active(leg: &Leg, status: &BarrierStatus) -> bool {
    let Some(terms) = leg.barrier else {
        return true;
    };
    let verdict = status.verdict(terms.direction);
    if verdict == TriggerVerdict::Unknown {
        return true;
    }
    match terms.mode {
        BarrierMode::KnockOut => !verdict.is_hit(),
        BarrierMode::KnockIn => verdict.is_hit(),
        BarrierMode::Informational => true,
    }
}
