//! Leg activity and settlement computation.

pub mod activity;
pub mod settle;

pub use activity::leg_is_active;
pub use settle::{
    SettlementMetrics, SettlementResult, SettlementSource, compute_settlement,
    settlement_fallback_total,
};

pub(crate) fn emit_settlement_metric_line(name: &str, tail: &str) {
    tracing::info!(target: "settle_metrics", "{name} {tail}");
}
