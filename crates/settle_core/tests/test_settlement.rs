//! Tests for the payoff calculator: intrinsic payoff, cash-flow
//! aggregation, and the supplied-P&L substitution.

mod common;

use common::{leg, market, operation, with_barrier};
use settle_core::barrier::{BarrierDirection, BarrierMode};
use settle_core::engine::{EngineMetrics, settle_operation};
use settle_core::payoff::SettlementSource;
use settle_core::position::{CouponRate, LegSide, MarketSnapshot, OptionKind};

// ─── End-to-end scenario ─────────────────────────────────────────────────

#[test]
fn test_coupon_call_scenario() {
    // Quantity 100 at unit cost 10 (cost 1000), 2% coupon, one long call
    // struck at 55, settling at close 60:
    //   payoff   = (60 - 55) * 100 = 500
    //   proceeds = 60 * 100 = 6000
    //   coupon   = 0.02 * 1000 = 20
    //   net      = 6000 - 1000 + 500 + 0 + 20 + 0 = 5520
    let mut call = leg("leg1");
    call.kind = OptionKind::Call;
    call.strike = Some(55.0);
    let mut op = operation(vec![call]);
    op.coupon = Some(CouponRate::Text("2%".to_string()));

    let snapshot = MarketSnapshot {
        close: Some(60.0),
        high: Some(60.0),
        low: Some(48.0),
        dividends_total: Some(0.0),
    };
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &snapshot, None, &mut metrics);
    let r = &outcome.result;

    assert!((r.settlement_spot - 60.0).abs() < 1e-9);
    assert!((r.sale_proceeds - 6000.0).abs() < 1e-9);
    assert!((r.total_cost - 1000.0).abs() < 1e-9);
    assert!((r.option_payoff - 500.0).abs() < 1e-9);
    assert!(r.dividend_flow.abs() < 1e-9);
    assert!((r.coupon_flow - 20.0).abs() < 1e-9);
    assert!(r.rebate_flow.abs() < 1e-9);
    assert!((r.net_settlement - 5520.0).abs() < 1e-9);
    assert!((r.gain - 5520.0).abs() < 1e-9);
    assert!((r.return_pct - 5.52).abs() < 1e-9);
    assert_eq!(r.source, SettlementSource::Computed);
    assert_eq!(metrics.settlement.settled_total(), 1);
    assert_eq!(metrics.settlement.fallback_total(), 0);
}

// ─── Intrinsic payoff ────────────────────────────────────────────────────

#[test]
fn test_short_put_reduces_settlement() {
    let mut put = leg("leg1");
    put.kind = OptionKind::Put;
    put.strike = Some(55.0);
    put.side = LegSide::Short;
    let op = operation(vec![put]);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &market(50.0, 52.0, 48.0), None, &mut metrics);
    let r = &outcome.result;

    // Intrinsic (55 - 50) * 100, signed short.
    assert!((r.option_payoff + 500.0).abs() < 1e-9);
    assert!((r.net_settlement - 3500.0).abs() < 1e-9);
}

#[test]
fn test_unknown_leg_type_has_no_intrinsic() {
    let mut stray = leg("leg1");
    stray.strike = Some(55.0);
    let op = operation(vec![stray]);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &market(60.0, 60.0, 48.0), None, &mut metrics);
    assert_eq!(outcome.result.option_payoff, 0.0);
}

#[test]
fn test_leg_quantity_overrides_operation_quantity() {
    let mut call = leg("leg1");
    call.kind = OptionKind::Call;
    call.strike = Some(55.0);
    call.quantity = Some(10.0);
    let op = operation(vec![call]);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &market(60.0, 60.0, 48.0), None, &mut metrics);
    assert!((outcome.result.option_payoff - 50.0).abs() < 1e-9);
}

#[test]
fn test_zero_quantity_leg_contributes_nothing() {
    let mut call = leg("leg1");
    call.kind = OptionKind::Call;
    call.strike = Some(55.0);
    call.quantity = Some(0.0);
    let op = operation(vec![call]);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &market(60.0, 60.0, 48.0), None, &mut metrics);
    assert_eq!(outcome.result.option_payoff, 0.0);
}

// ─── Barrier interaction ─────────────────────────────────────────────────

#[test]
fn test_knocked_out_leg_drops_payoff_and_rebate() {
    let mut ko = with_barrier(
        leg("leg1"),
        58.0,
        BarrierDirection::High,
        BarrierMode::KnockOut,
    );
    ko.kind = OptionKind::Call;
    ko.strike = Some(55.0);
    ko.rebate = 2.0;
    let op = operation(vec![ko]);
    let mut metrics = EngineMetrics::new();

    // Period high 60 breaches the 58 barrier.
    let outcome = settle_operation(&op, &market(60.0, 60.0, 48.0), None, &mut metrics);
    assert_eq!(outcome.result.option_payoff, 0.0);
    assert_eq!(outcome.result.rebate_flow, 0.0);
}

#[test]
fn test_active_leg_accrues_rebate() {
    let mut ko = with_barrier(
        leg("leg1"),
        58.0,
        BarrierDirection::High,
        BarrierMode::KnockOut,
    );
    ko.kind = OptionKind::Call;
    ko.strike = Some(55.0);
    ko.rebate = 2.0;
    let op = operation(vec![ko]);
    let mut metrics = EngineMetrics::new();

    // Period high 57 stays below the barrier.
    let outcome = settle_operation(&op, &market(57.0, 57.0, 48.0), None, &mut metrics);
    assert!((outcome.result.option_payoff - 200.0).abs() < 1e-9);
    assert!((outcome.result.rebate_flow - 200.0).abs() < 1e-9);
}

// ─── Cash flows ──────────────────────────────────────────────────────────

#[test]
fn test_dividend_flow_scales_with_quantity() {
    let op = operation(vec![]);
    let snapshot = MarketSnapshot {
        close: Some(50.0),
        high: Some(52.0),
        low: Some(48.0),
        dividends_total: Some(1.5),
    };
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &snapshot, None, &mut metrics);
    assert!((outcome.result.dividend_flow - 150.0).abs() < 1e-9);
    assert!((outcome.result.net_settlement - 4150.0).abs() < 1e-9);
}

#[test]
fn test_settlement_spot_falls_back_to_initial_spot() {
    let op = operation(vec![]);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &MarketSnapshot::default(), None, &mut metrics);
    assert_eq!(outcome.result.settlement_spot, 50.0);
    assert!((outcome.result.sale_proceeds - 5000.0).abs() < 1e-9);
}

#[test]
fn test_settlement_spot_defaults_to_zero() {
    let mut op = operation(vec![]);
    op.initial_spot = None;
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &MarketSnapshot::default(), None, &mut metrics);
    assert_eq!(outcome.result.settlement_spot, 0.0);
    assert_eq!(outcome.result.sale_proceeds, 0.0);
    // Cost is real, so the loss is computed, not substituted.
    assert!((outcome.result.net_settlement + 1000.0).abs() < 1e-9);
    assert_eq!(outcome.result.source, SettlementSource::Computed);
}

// ─── Supplied-P&L substitution ───────────────────────────────────────────

#[test]
fn test_supplied_pl_substitutes_for_zero_cost() {
    let mut op = operation(vec![]);
    op.quantity = 0.0;
    op.unit_cost = 0.0;
    op.initial_spot = None;
    op.supplied_pl = Some(300.0);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &MarketSnapshot::default(), None, &mut metrics);
    let r = &outcome.result;

    assert_eq!(r.net_settlement, 300.0);
    assert_eq!(r.gain, 300.0);
    assert_eq!(r.return_pct, 0.0);
    assert_eq!(r.source, SettlementSource::SuppliedPl);
    assert_eq!(metrics.settlement.fallback_total(), 1);
}

#[test]
fn test_non_finite_settlement_substitutes_supplied_pl() {
    let mut op = operation(vec![]);
    op.supplied_pl = Some(42.0);
    let snapshot = MarketSnapshot {
        close: Some(f64::INFINITY),
        ..MarketSnapshot::default()
    };
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &snapshot, None, &mut metrics);
    assert_eq!(outcome.result.net_settlement, 42.0);
    assert_eq!(outcome.result.source, SettlementSource::SuppliedPl);
}

#[test]
fn test_non_finite_settlement_without_pl_settles_zero() {
    let op = operation(vec![]);
    let snapshot = MarketSnapshot {
        close: Some(f64::INFINITY),
        ..MarketSnapshot::default()
    };
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &snapshot, None, &mut metrics);
    assert_eq!(outcome.result.net_settlement, 0.0);
    assert_eq!(outcome.result.source, SettlementSource::SuppliedPl);
}

#[test]
fn test_supplied_pl_ignored_when_cost_present() {
    let mut op = operation(vec![]);
    op.supplied_pl = Some(999.0);
    let mut metrics = EngineMetrics::new();

    let outcome = settle_operation(&op, &market(50.0, 52.0, 48.0), None, &mut metrics);
    assert!((outcome.result.net_settlement - 4000.0).abs() < 1e-9);
    assert_eq!(outcome.result.source, SettlementSource::Computed);
}
