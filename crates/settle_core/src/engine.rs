//! Settlement orchestration.
//!
//! Wires the barrier resolver and the payoff calculator. The two stages
//! communicate only through `BarrierStatus`; both are pure, so a batch of
//! independent operations settles in input order with no coordination.

use crate::barrier::{BarrierMetrics, BarrierOverride, BarrierStatus, resolve_barrier_status};
use crate::payoff::{SettlementMetrics, SettlementResult, compute_settlement};
use crate::position::{MarketSnapshot, Operation};

/// Aggregated metrics for the settlement engine.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub barrier: BarrierMetrics,
    pub settlement: SettlementMetrics,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of settling one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementOutcome {
    /// Per-direction barrier verdicts.
    pub barrier_status: BarrierStatus,
    /// Final cash settlement.
    pub result: SettlementResult,
}

/// Resolve barriers and settle one operation.
pub fn settle_operation(
    operation: &Operation,
    market: &MarketSnapshot,
    overrides: Option<&BarrierOverride>,
    metrics: &mut EngineMetrics,
) -> SettlementOutcome {
    let barrier_status = resolve_barrier_status(operation, market, overrides, &mut metrics.barrier);
    let result = compute_settlement(operation, market, &barrier_status, &mut metrics.settlement);
    SettlementOutcome {
        barrier_status,
        result,
    }
}

/// Settle a batch of independent operations in input order.
pub fn settle_batch<'a, I>(items: I, metrics: &mut EngineMetrics) -> Vec<SettlementOutcome>
where
    I: IntoIterator<Item = (&'a Operation, &'a MarketSnapshot, Option<&'a BarrierOverride>)>,
{
    items
        .into_iter()
        .map(|(operation, market, overrides)| settle_operation(operation, market, overrides, metrics))
        .collect()
}
