//! Final settlement computation.
//!
//! Consumes the operation, the market snapshot, and the barrier verdicts and
//! produces the cash settlement closing out the position: underlying sale
//! proceeds, intrinsic payoff of the still-active legs, dividend, coupon and
//! rebate flows, and the resulting net amount and return.
//!
//! Missing numeric inputs never fail the computation; they coerce to zero.
//! A non-finite result, or a zero-cost operation carrying an externally
//! supplied P&L, settles to that supplied value instead — the reporting
//! layer expects an amount for every operation, never an error.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::barrier::BarrierStatus;
use crate::position::{MarketSnapshot, Operation, OptionKind};

use super::leg_is_active;

// ─── Result ──────────────────────────────────────────────────────────────

/// How the net settlement was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementSource {
    /// Computed from spot, payoff and cash flows.
    Computed,
    /// Substituted from the operation's externally supplied P&L.
    SuppliedPl,
}

/// Cash settlement of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementResult {
    /// Spot used for settlement (close, else initial spot, else 0).
    pub settlement_spot: f64,
    /// Gross proceeds from selling the underlying position.
    pub sale_proceeds: f64,
    /// Total cost of the operation (quantity × unit cost).
    pub total_cost: f64,
    /// Intrinsic payoff summed over active legs.
    pub option_payoff: f64,
    /// Dividend cash flow over the holding period.
    pub dividend_flow: f64,
    /// Coupon cash flow on the total cost.
    pub coupon_flow: f64,
    /// Rebate cash flow from active legs.
    pub rebate_flow: f64,
    /// Final net settlement amount.
    pub net_settlement: f64,
    /// Gain, equal to the net settlement.
    pub gain: f64,
    /// Return relative to total cost (0 when the cost is 0).
    pub return_pct: f64,
    /// Whether the amount was computed or substituted.
    pub source: SettlementSource,
}

// ─── Metrics ─────────────────────────────────────────────────────────────

/// Observability metrics for settlement computation.
#[derive(Debug)]
pub struct SettlementMetrics {
    /// Total settlements computed.
    settled_total: u64,
    /// Settlements that substituted the supplied P&L.
    fallback_total: u64,
}

impl SettlementMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            settled_total: 0,
            fallback_total: 0,
        }
    }

    /// Record a settlement.
    pub fn record_settled(&mut self) {
        self.settled_total += 1;
    }

    /// Record a supplied-P&L substitution.
    pub fn record_fallback(&mut self) {
        self.fallback_total += 1;
    }

    /// Total settlements computed.
    pub fn settled_total(&self) -> u64 {
        self.settled_total
    }

    /// Total supplied-P&L substitutions.
    pub fn fallback_total(&self) -> u64 {
        self.fallback_total
    }
}

impl Default for SettlementMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static SETTLEMENT_FALLBACK_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of settlements that substituted the supplied P&L.
pub fn settlement_fallback_total() -> u64 {
    SETTLEMENT_FALLBACK_TOTAL.load(Ordering::Relaxed)
}

fn bump_fallback(operation_id: &str, computed: f64) {
    SETTLEMENT_FALLBACK_TOTAL.fetch_add(1, Ordering::Relaxed);
    let tail = format!("operation={operation_id}");
    super::emit_settlement_metric_line("settlement_fallback_total", &tail);
    tracing::debug!("SettlementFallback operation={operation_id} computed={computed}");
}

// ─── Calculator ──────────────────────────────────────────────────────────

/// Compute the cash settlement for an operation under a barrier status.
///
/// Legs aggregate in declaration order so floating-point summation is
/// reproducible across runs.
pub fn compute_settlement(
    operation: &Operation,
    market: &MarketSnapshot,
    status: &BarrierStatus,
    metrics: &mut SettlementMetrics,
) -> SettlementResult {
    metrics.record_settled();

    let quantity = operation.quantity;
    let total_cost = quantity * operation.unit_cost;
    let has_cost = total_cost != 0.0 && !total_cost.is_nan();

    let settlement_spot = market.close.or(operation.initial_spot).unwrap_or(0.0);
    let sale_proceeds = if quantity != 0.0 {
        settlement_spot * quantity
    } else {
        0.0
    };

    let mut option_payoff = 0.0;
    for leg in &operation.legs {
        if !leg_is_active(leg, status) {
            continue;
        }
        let leg_qty = leg.quantity.unwrap_or(quantity);
        if leg_qty == 0.0 {
            continue;
        }
        let strike = leg.strike.unwrap_or(0.0);
        let intrinsic = match leg.kind {
            OptionKind::Call => (settlement_spot - strike).max(0.0),
            OptionKind::Put => (strike - settlement_spot).max(0.0),
            OptionKind::Other => 0.0,
        };
        option_payoff += intrinsic * leg_qty * leg.side.sign();
    }

    let dividend_flow = market.dividends_total.unwrap_or(0.0) * quantity;
    let coupon_flow = if has_cost {
        operation.coupon_fraction() * total_cost
    } else {
        0.0
    };

    let mut rebate_flow = 0.0;
    for leg in &operation.legs {
        if leg.rebate == 0.0 || !leg_is_active(leg, status) {
            continue;
        }
        rebate_flow += leg.rebate * leg.quantity.unwrap_or(quantity);
    }

    let computed =
        sale_proceeds - total_cost + option_payoff + dividend_flow + coupon_flow + rebate_flow;

    let substitute = !computed.is_finite() || (!has_cost && operation.supplied_pl.is_some());
    let (net_settlement, source) = if substitute {
        metrics.record_fallback();
        bump_fallback(&operation.id, computed);
        (
            operation.supplied_pl.unwrap_or(0.0),
            SettlementSource::SuppliedPl,
        )
    } else {
        (computed, SettlementSource::Computed)
    };

    let gain = net_settlement;
    let return_pct = if has_cost { gain / total_cost } else { 0.0 };

    SettlementResult {
        settlement_spot,
        sale_proceeds,
        total_cost,
        option_payoff,
        dividend_flow,
        coupon_flow,
        rebate_flow,
        net_settlement,
        gain,
        return_pct,
        source,
    }
}
