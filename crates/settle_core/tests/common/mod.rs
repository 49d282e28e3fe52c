use settle_core::barrier::{BarrierDirection, BarrierMode, BarrierTerms};
use settle_core::position::{Leg, LegSide, MarketSnapshot, Operation, OptionKind};

/// Test helper: an operation shell with sane cash terms and the given legs.
///
/// quantity 100 × unit cost 10 → total cost 1000, initial spot 50.
pub fn operation(legs: Vec<Leg>) -> Operation {
    Operation {
        id: "op-1".to_string(),
        ticker: "ACME4".to_string(),
        initial_spot: Some(50.0),
        unit_cost: 10.0,
        quantity: 100.0,
        coupon: None,
        maturity_ms: None,
        legs,
        supplied_pl: None,
    }
}

/// Test helper: a bare long leg with no strike and no barrier.
pub fn leg(id: &str) -> Leg {
    Leg {
        id: id.to_string(),
        kind: OptionKind::Other,
        strike: None,
        quantity: None,
        side: LegSide::Long,
        barrier: None,
        rebate: 0.0,
    }
}

/// Test helper: attach classified barrier terms to a leg.
pub fn with_barrier(
    mut leg: Leg,
    level: f64,
    direction: BarrierDirection,
    mode: BarrierMode,
) -> Leg {
    leg.barrier = Some(BarrierTerms {
        level,
        direction,
        mode,
    });
    leg
}

/// Test helper: a market snapshot with a full range and no dividends.
pub fn market(close: f64, high: f64, low: f64) -> MarketSnapshot {
    MarketSnapshot {
        close: Some(close),
        high: Some(high),
        low: Some(low),
        dividends_total: None,
    }
}
