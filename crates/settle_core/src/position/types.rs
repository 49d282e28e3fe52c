//! Value objects for structured operations.
//!
//! An `Operation` is a client position composed of option-like legs plus cash
//! terms (unit cost, coupon, optional externally supplied P&L). The engine
//! only ever reads these types; callers own them and they are never mutated
//! during a settlement call.

use crate::barrier::BarrierTerms;

// ─── Option kind ─────────────────────────────────────────────────────────

/// Option type of a leg.
///
/// Anything that is not exactly `CALL` or `PUT` (case-insensitive) settles
/// with zero intrinsic value but still participates in barrier and rebate
/// handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Call,
    Put,
    /// Unrecognized leg type — contributes no intrinsic payoff.
    Other,
}

impl OptionKind {
    /// Parse a free-form leg type cell.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "CALL" => OptionKind::Call,
            "PUT" => OptionKind::Put,
            _ => OptionKind::Other,
        }
    }
}

// ─── Leg side ────────────────────────────────────────────────────────────

/// Position side of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegSide {
    #[default]
    Long,
    Short,
}

impl LegSide {
    /// Parse a free-form side cell: `short` (any casing) is short, anything
    /// else is long.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("short") {
            LegSide::Short
        } else {
            LegSide::Long
        }
    }

    /// Sign applied to the leg's intrinsic contribution.
    pub fn sign(self) -> f64 {
        match self {
            LegSide::Long => 1.0,
            LegSide::Short => -1.0,
        }
    }
}

// ─── Coupon rate ─────────────────────────────────────────────────────────

/// Coupon rate as exported by the dashboard: either an already-numeric
/// fraction or a percent-formatted cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponRate {
    /// Numeric rate, used as-is (0.05 means 5%).
    Rate(f64),
    /// Raw text cell, parsed as a percentage.
    Text(String),
}

impl CouponRate {
    /// Resolve the rate to a plain fraction.
    ///
    /// Text cells strip any `%`, accept a comma decimal separator, and are
    /// divided by 100. The division applies to every text cell, with or
    /// without a literal `%`, so `"5"` and `"5%"` both resolve to 0.05.
    /// Unparseable text resolves to 0.
    pub fn fraction(&self) -> f64 {
        match self {
            CouponRate::Rate(value) => *value,
            CouponRate::Text(raw) => {
                let cleaned = raw.replace('%', "").replace(',', ".");
                match cleaned.trim().parse::<f64>() {
                    Ok(parsed) if !parsed.is_nan() => parsed / 100.0,
                    _ => 0.0,
                }
            }
        }
    }
}

// ─── Leg ─────────────────────────────────────────────────────────────────

/// One option-like component of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Leg identifier within the operation (e.g. "leg1").
    pub id: String,
    /// Option type.
    pub kind: OptionKind,
    /// Strike price. An absent strike settles as zero.
    pub strike: Option<f64>,
    /// Leg quantity. Absent quantities fall back to the operation quantity.
    pub quantity: Option<f64>,
    /// Position side.
    pub side: LegSide,
    /// Classified barrier, when the leg carries a barrier level.
    pub barrier: Option<BarrierTerms>,
    /// Cash rebate per unit, paid while the leg is active.
    pub rebate: f64,
}

// ─── Operation ───────────────────────────────────────────────────────────

/// A structured operation handed in by the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Operation identifier.
    pub id: String,
    /// Underlying ticker.
    pub ticker: String,
    /// Spot price at inception. Feeds the barrier-direction fallback and
    /// stands in for the settlement spot when no close is available.
    pub initial_spot: Option<f64>,
    /// Cost per unit.
    pub unit_cost: f64,
    /// Total quantity of the operation.
    pub quantity: f64,
    /// Coupon rate, when the operation pays one.
    pub coupon: Option<CouponRate>,
    /// Maturity timestamp in milliseconds, when known. Informational; the
    /// engine settles whatever it is handed.
    pub maturity_ms: Option<i64>,
    /// Option-like legs, in declaration order.
    pub legs: Vec<Leg>,
    /// Externally supplied P&L, substituted when the settlement cannot be
    /// computed from the other inputs.
    pub supplied_pl: Option<f64>,
}

impl Operation {
    /// Coupon rate resolved to a fraction (0 when absent).
    pub fn coupon_fraction(&self) -> f64 {
        self.coupon.as_ref().map(CouponRate::fraction).unwrap_or(0.0)
    }
}

// ─── Market snapshot ─────────────────────────────────────────────────────

/// Observed market data over the holding period.
///
/// Any field may be absent when the quote service could not supply it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketSnapshot {
    /// Final/close price at settlement.
    pub close: Option<f64>,
    /// Period high.
    pub high: Option<f64>,
    /// Period low.
    pub low: Option<f64>,
    /// Total per-share dividends paid over the period.
    pub dividends_total: Option<f64>,
}
