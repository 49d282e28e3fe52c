//! Raw dashboard export records.
//!
//! Field names mirror the dashboard's camelCase JSON export. Numeric cells
//! may arrive as JSON numbers or as locale-formatted strings
//! (`"1.234,56"`); `FlexValue` accepts both.

use serde::Deserialize;

// ─── Flexible numeric cell ───────────────────────────────────────────────

/// A numeric cell that may be a JSON number or a formatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexValue {
    Number(f64),
    Text(String),
}

impl FlexValue {
    /// Resolve the cell to a number.
    ///
    /// Strings are stripped to digits, separators and sign. When both comma
    /// and dot appear, the rightmost one is the decimal separator; a lone
    /// comma is a decimal separator. Empty, non-finite or unparseable cells
    /// resolve to `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FlexValue::Number(value) => value.is_finite().then_some(*value),
            FlexValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let mut cleaned: String = trimmed
                    .chars()
                    .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
                    .collect();
                if cleaned.is_empty() {
                    return None;
                }
                match (cleaned.rfind(','), cleaned.rfind('.')) {
                    (Some(comma), Some(dot)) if comma > dot => {
                        cleaned = cleaned.replace('.', "").replace(',', ".");
                    }
                    (Some(_), Some(_)) => {
                        cleaned = cleaned.replace(',', "");
                    }
                    (Some(_), None) => {
                        cleaned = cleaned.replace(',', ".");
                    }
                    _ => {}
                }
                cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
            }
        }
    }
}

/// Coupon cell preserved as exported; the engine applies its own parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CouponField {
    Number(f64),
    Text(String),
}

// ─── Leg record ──────────────────────────────────────────────────────────

/// One leg row of an exported operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegRecord {
    /// Leg identifier (e.g. "leg1").
    #[serde(default)]
    pub id: String,
    /// Free-form option type cell ("CALL", "Put", ...).
    #[serde(default, rename = "type")]
    pub leg_type: Option<String>,
    /// Strike price.
    #[serde(default)]
    pub strike: Option<FlexValue>,
    /// Leg quantity; absent rows inherit the operation quantity.
    #[serde(default)]
    pub quantity: Option<FlexValue>,
    /// "long" / "short"; absent means long.
    #[serde(default)]
    pub side: Option<String>,
    /// Barrier price level.
    #[serde(default)]
    pub barrier_level: Option<FlexValue>,
    /// Free-form barrier type code ("UO", "DOWN-IN", "KI", ...).
    #[serde(default)]
    pub barrier_type: Option<String>,
    /// Cash rebate per unit.
    #[serde(default)]
    pub rebate: Option<FlexValue>,
}

// ─── Operation record ────────────────────────────────────────────────────

/// One exported operation row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ticker: String,
    /// Spot price at inception.
    #[serde(default)]
    pub initial_spot: Option<FlexValue>,
    /// Cost per unit.
    #[serde(default)]
    pub unit_cost: Option<FlexValue>,
    /// Total quantity.
    #[serde(default)]
    pub quantity: Option<FlexValue>,
    /// Coupon cell: number or percent-formatted text.
    #[serde(default)]
    pub coupon: Option<CouponField>,
    /// Maturity timestamp in milliseconds.
    #[serde(default)]
    pub maturity_ms: Option<i64>,
    /// Leg rows, in sheet order.
    #[serde(default)]
    pub legs: Vec<LegRecord>,
    /// Externally computed P&L, when the exporter had one.
    #[serde(default)]
    pub pl: Option<FlexValue>,
}

// ─── Market record ───────────────────────────────────────────────────────

/// Market snapshot row from the quote service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    #[serde(default)]
    pub close: Option<FlexValue>,
    #[serde(default)]
    pub high: Option<FlexValue>,
    #[serde(default)]
    pub low: Option<FlexValue>,
    #[serde(default)]
    pub dividends_total: Option<FlexValue>,
}

// ─── Override record ─────────────────────────────────────────────────────

/// Reviewer override row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    /// "auto" / "hit" / "miss"; absent means auto.
    #[serde(default)]
    pub high: Option<String>,
    #[serde(default)]
    pub low: Option<String>,
}
