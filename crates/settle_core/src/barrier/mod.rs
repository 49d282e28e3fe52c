//! Barrier classification and trigger resolution.

pub mod classify;
pub mod status;

pub use classify::{BarrierDirection, BarrierMode, BarrierTerms, classify_direction, classify_mode};
pub use status::{
    AnnotatedBarrier, BarrierMetrics, BarrierOverride, BarrierStatus, OverrideChoice,
    TriggerVerdict, VerdictSource, barrier_override_applied_total, resolve_barrier_status,
};

pub(crate) fn emit_barrier_metric_line(name: &str, tail: &str) {
    tracing::info!(target: "settle_metrics", "{name} {tail}");
}
