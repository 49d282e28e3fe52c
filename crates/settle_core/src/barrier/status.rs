//! Barrier trigger resolution.
//!
//! Compares each classified barrier against the observed market range and
//! folds in reviewer overrides to produce a per-direction verdict.
//!
//! **Rule:**
//! - high verdict: hit iff any high-direction barrier level ≤ the period high
//! - low verdict: hit iff any low-direction barrier level ≥ the period low
//! - no barriers of a direction, or the relevant extreme missing → unknown
//! - a manual `hit`/`miss` override replaces the automatic verdict for its
//!   direction outright, regardless of market data, and tags the source as
//!   manual

use std::sync::atomic::{AtomicU64, Ordering};

use crate::position::{MarketSnapshot, Operation};

use super::classify::{BarrierDirection, BarrierMode};

// ─── Verdict ─────────────────────────────────────────────────────────────

/// Tri-state trigger verdict for one barrier direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerVerdict {
    /// The barrier was breached.
    Hit,
    /// Range data is available and no barrier was breached.
    NotHit,
    /// No barrier of this direction exists, or no range data is available.
    Unknown,
}

impl TriggerVerdict {
    fn from_breached(breached: bool) -> Self {
        if breached {
            TriggerVerdict::Hit
        } else {
            TriggerVerdict::NotHit
        }
    }

    /// Whether the verdict is a definite hit.
    pub fn is_hit(self) -> bool {
        self == TriggerVerdict::Hit
    }
}

/// Where a direction's verdict came from, for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// Computed from market range data.
    Auto,
    /// Forced by a reviewer override.
    Manual,
}

// ─── Overrides ───────────────────────────────────────────────────────────

/// Reviewer override for one barrier direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideChoice {
    /// Defer to automatic detection.
    #[default]
    Auto,
    /// Force the barrier as triggered.
    Hit,
    /// Force the barrier as not triggered.
    Miss,
}

/// Manual correction layer applied on top of automatic detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrierOverride {
    pub high: OverrideChoice,
    pub low: OverrideChoice,
}

// ─── Status ──────────────────────────────────────────────────────────────

/// One classified barrier carried on the status for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedBarrier {
    /// Owning leg identifier.
    pub leg_id: String,
    /// Barrier price level.
    pub level: f64,
    /// Resolved direction.
    pub direction: BarrierDirection,
    /// Resolved trigger mode.
    pub mode: BarrierMode,
}

/// Per-direction trigger verdicts for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierStatus {
    /// Verdict for the high direction.
    pub high: TriggerVerdict,
    /// Verdict for the low direction.
    pub low: TriggerVerdict,
    /// Source of the high verdict.
    pub high_source: VerdictSource,
    /// Source of the low verdict.
    pub low_source: VerdictSource,
    /// All classified barriers on the operation, in leg order.
    pub barriers: Vec<AnnotatedBarrier>,
}

impl BarrierStatus {
    /// Verdict for the given direction (`Unknown` for unclassified barriers).
    pub fn verdict(&self, direction: BarrierDirection) -> TriggerVerdict {
        match direction {
            BarrierDirection::High => self.high,
            BarrierDirection::Low => self.low,
            BarrierDirection::Unknown => TriggerVerdict::Unknown,
        }
    }
}

// ─── Metrics ─────────────────────────────────────────────────────────────

/// Observability metrics for barrier resolution.
#[derive(Debug)]
pub struct BarrierMetrics {
    /// Total resolutions performed.
    resolutions_total: u64,
    /// High verdicts forced by a reviewer.
    manual_high_total: u64,
    /// Low verdicts forced by a reviewer.
    manual_low_total: u64,
    /// Directions that resolved to an unknown verdict.
    unknown_verdict_total: u64,
}

impl BarrierMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            resolutions_total: 0,
            manual_high_total: 0,
            manual_low_total: 0,
            unknown_verdict_total: 0,
        }
    }

    /// Record one resolution.
    pub fn record_resolution(&mut self) {
        self.resolutions_total += 1;
    }

    /// Record a manually forced high verdict.
    pub fn record_manual_high(&mut self) {
        self.manual_high_total += 1;
    }

    /// Record a manually forced low verdict.
    pub fn record_manual_low(&mut self) {
        self.manual_low_total += 1;
    }

    /// Record a direction that resolved to unknown.
    pub fn record_unknown_verdict(&mut self) {
        self.unknown_verdict_total += 1;
    }

    /// Total resolutions performed.
    pub fn resolutions_total(&self) -> u64 {
        self.resolutions_total
    }

    /// Total manually forced high verdicts.
    pub fn manual_high_total(&self) -> u64 {
        self.manual_high_total
    }

    /// Total manually forced low verdicts.
    pub fn manual_low_total(&self) -> u64 {
        self.manual_low_total
    }

    /// Total unknown verdicts.
    pub fn unknown_verdict_total(&self) -> u64 {
        self.unknown_verdict_total
    }
}

impl Default for BarrierMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static BARRIER_OVERRIDE_APPLIED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of manual overrides applied in place of auto verdicts.
pub fn barrier_override_applied_total() -> u64 {
    BARRIER_OVERRIDE_APPLIED_TOTAL.load(Ordering::Relaxed)
}

fn bump_override_applied(direction: &str, verdict: TriggerVerdict) {
    BARRIER_OVERRIDE_APPLIED_TOTAL.fetch_add(1, Ordering::Relaxed);
    let tail = format!("direction={direction}");
    super::emit_barrier_metric_line("barrier_override_applied_total", &tail);
    tracing::debug!("BarrierOverride direction={direction} verdict={verdict:?}");
}

// ─── Resolver ────────────────────────────────────────────────────────────

/// Resolve the per-direction trigger verdicts for an operation.
///
/// Legs without a barrier contribute nothing. Barriers whose direction could
/// not be classified appear in the annotated list but join neither detection
/// set. Overrides replace the automatic verdict for their direction even
/// when that direction has no barriers at all.
pub fn resolve_barrier_status(
    operation: &Operation,
    market: &MarketSnapshot,
    overrides: Option<&BarrierOverride>,
    metrics: &mut BarrierMetrics,
) -> BarrierStatus {
    metrics.record_resolution();

    let barriers: Vec<AnnotatedBarrier> = operation
        .legs
        .iter()
        .filter_map(|leg| {
            leg.barrier.map(|terms| AnnotatedBarrier {
                leg_id: leg.id.clone(),
                level: terms.level,
                direction: terms.direction,
                mode: terms.mode,
            })
        })
        .collect();

    let high_levels: Vec<f64> = barriers
        .iter()
        .filter(|barrier| barrier.direction == BarrierDirection::High)
        .map(|barrier| barrier.level)
        .collect();
    let low_levels: Vec<f64> = barriers
        .iter()
        .filter(|barrier| barrier.direction == BarrierDirection::Low)
        .map(|barrier| barrier.level)
        .collect();

    // Any-of semantics: a single breached level triggers the direction.
    let auto_high = match market.high {
        Some(high) if !high_levels.is_empty() => {
            TriggerVerdict::from_breached(high_levels.iter().any(|level| high >= *level))
        }
        _ => TriggerVerdict::Unknown,
    };
    let auto_low = match market.low {
        Some(low) if !low_levels.is_empty() => {
            TriggerVerdict::from_breached(low_levels.iter().any(|level| low <= *level))
        }
        _ => TriggerVerdict::Unknown,
    };

    let overrides = overrides.copied().unwrap_or_default();
    let (high, high_source) = apply_override(overrides.high, auto_high, "high");
    let (low, low_source) = apply_override(overrides.low, auto_low, "low");

    if high == TriggerVerdict::Unknown {
        metrics.record_unknown_verdict();
    }
    if low == TriggerVerdict::Unknown {
        metrics.record_unknown_verdict();
    }
    if high_source == VerdictSource::Manual {
        metrics.record_manual_high();
    }
    if low_source == VerdictSource::Manual {
        metrics.record_manual_low();
    }

    BarrierStatus {
        high,
        low,
        high_source,
        low_source,
        barriers,
    }
}

fn apply_override(
    choice: OverrideChoice,
    auto: TriggerVerdict,
    direction: &str,
) -> (TriggerVerdict, VerdictSource) {
    match choice {
        OverrideChoice::Auto => (auto, VerdictSource::Auto),
        OverrideChoice::Hit => {
            bump_override_applied(direction, TriggerVerdict::Hit);
            (TriggerVerdict::Hit, VerdictSource::Manual)
        }
        OverrideChoice::Miss => {
            bump_override_applied(direction, TriggerVerdict::NotHit);
            (TriggerVerdict::NotHit, VerdictSource::Manual)
        }
    }
}
