//! Barrier code classification.
//!
//! Dashboard exports carry a free-form barrier type cell (`"UO"`, `"KI"`,
//! `"DOWN-IN"`, ...). Classification happens once, at ingestion, into a
//! `{direction, mode}` pair; the engine only ever operates on the enums.
//!
//! **Direction scan (first match wins):**
//! 1. code contains `UP`, `UO`, `UI`, or `KO` → high
//! 2. code contains `DOWN`, `DO`, `DI`, or `KI` → low
//! 3. barrier level and initial spot both known → high when level ≥ spot
//! 4. otherwise unknown
//!
//! **Mode scan:** `OUT`, `KO`, `UO`, or `DO` → knock-out; `IN`, `KI`, `UI`,
//! or `DI` → knock-in; otherwise informational.
//!
//! Both scans are case-insensitive substring matches in this literal order,
//! so a code matching keywords from both sets takes the first branch:
//! `DOWN-KO` resolves high, and `DOWN-IN` resolves knock-out via the `DO`
//! substring.

// ─── Direction ───────────────────────────────────────────────────────────

/// Side of the spot range a barrier watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierDirection {
    /// Compared against the period high.
    High,
    /// Compared against the period low.
    Low,
    /// Could not be classified; never contributes to automatic detection.
    Unknown,
}

// ─── Mode ────────────────────────────────────────────────────────────────

/// What a barrier breach does to its leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierMode {
    /// Leg activates only once the barrier is breached.
    KnockIn,
    /// Leg deactivates once the barrier is breached.
    KnockOut,
    /// Barrier is informational only; the leg never deactivates.
    Informational,
}

// ─── Keyword scan ────────────────────────────────────────────────────────

const HIGH_KEYWORDS: [&str; 4] = ["UP", "UO", "UI", "KO"];
const LOW_KEYWORDS: [&str; 4] = ["DOWN", "DO", "DI", "KI"];
const OUT_KEYWORDS: [&str; 4] = ["OUT", "KO", "UO", "DO"];
const IN_KEYWORDS: [&str; 4] = ["IN", "KI", "UI", "DI"];

fn contains_any(code: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| code.contains(keyword))
}

/// Classify the barrier direction from the raw type code.
///
/// `level` and `initial_spot` feed the comparison fallback used when the
/// code names no direction keyword.
pub fn classify_direction(
    code: &str,
    level: Option<f64>,
    initial_spot: Option<f64>,
) -> BarrierDirection {
    let upper = code.to_uppercase();
    if contains_any(&upper, &HIGH_KEYWORDS) {
        return BarrierDirection::High;
    }
    if contains_any(&upper, &LOW_KEYWORDS) {
        return BarrierDirection::Low;
    }
    if let (Some(level), Some(spot)) = (level, initial_spot) {
        return if level >= spot {
            BarrierDirection::High
        } else {
            BarrierDirection::Low
        };
    }
    BarrierDirection::Unknown
}

/// Classify the trigger mode from the raw type code.
pub fn classify_mode(code: &str) -> BarrierMode {
    let upper = code.to_uppercase();
    if contains_any(&upper, &OUT_KEYWORDS) {
        return BarrierMode::KnockOut;
    }
    if contains_any(&upper, &IN_KEYWORDS) {
        return BarrierMode::KnockIn;
    }
    BarrierMode::Informational
}

// ─── Classified barrier ──────────────────────────────────────────────────

/// A leg's barrier after one-time classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierTerms {
    /// Barrier price level.
    pub level: f64,
    /// Resolved direction.
    pub direction: BarrierDirection,
    /// Resolved trigger mode.
    pub mode: BarrierMode,
}

impl BarrierTerms {
    /// Classify a raw barrier cell pair into terms.
    ///
    /// Returns `None` when the leg carries no barrier level. A bare level
    /// with no type code still classifies via the level-vs-spot fallback.
    pub fn classify(
        code: Option<&str>,
        level: Option<f64>,
        initial_spot: Option<f64>,
    ) -> Option<Self> {
        let level = level?;
        let code = code.unwrap_or("");
        Some(Self {
            level,
            direction: classify_direction(code, Some(level), initial_spot),
            mode: classify_mode(code),
        })
    }
}
