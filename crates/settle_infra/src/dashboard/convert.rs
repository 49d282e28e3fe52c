//! Record-to-engine conversion.
//!
//! Barrier codes, option kinds and sides are classified here, once; the
//! engine operates on the resulting enums only. Override cells parse
//! strictly: an unrecognized choice is an error rather than a silently
//! ignored correction.

use settle_core::barrier::{BarrierOverride, BarrierTerms, OverrideChoice};
use settle_core::position::{CouponRate, Leg, LegSide, MarketSnapshot, Operation, OptionKind};

use super::records::{
    CouponField, FlexValue, LegRecord, MarketRecord, OperationRecord, OverrideRecord,
};

// ─── Errors ──────────────────────────────────────────────────────────────

/// Conversion failure for a dashboard record.
#[derive(Debug)]
pub enum RecordError {
    /// Override cell is not one of `auto` / `hit` / `miss`.
    UnknownOverrideChoice {
        direction: &'static str,
        value: String,
    },
    /// Record payload is not valid JSON for the expected shape.
    Json(serde_json::Error),
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Json(err)
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────

fn opt_number(value: &Option<FlexValue>) -> Option<f64> {
    value.as_ref().and_then(FlexValue::as_number)
}

/// Convert one exported operation row into an engine operation.
pub fn operation_from_record(record: &OperationRecord) -> Operation {
    let initial_spot = opt_number(&record.initial_spot);
    let legs = record
        .legs
        .iter()
        .map(|leg| leg_from_record(leg, initial_spot))
        .collect();
    Operation {
        id: record.id.clone(),
        ticker: record.ticker.clone(),
        initial_spot,
        unit_cost: opt_number(&record.unit_cost).unwrap_or(0.0),
        quantity: opt_number(&record.quantity).unwrap_or(0.0),
        coupon: record.coupon.as_ref().map(|coupon| match coupon {
            CouponField::Number(value) => CouponRate::Rate(*value),
            CouponField::Text(raw) => CouponRate::Text(raw.clone()),
        }),
        maturity_ms: record.maturity_ms,
        legs,
        supplied_pl: opt_number(&record.pl),
    }
}

fn leg_from_record(record: &LegRecord, initial_spot: Option<f64>) -> Leg {
    let level = opt_number(&record.barrier_level);
    Leg {
        id: record.id.clone(),
        kind: record
            .leg_type
            .as_deref()
            .map(OptionKind::parse)
            .unwrap_or(OptionKind::Other),
        strike: opt_number(&record.strike),
        quantity: opt_number(&record.quantity),
        side: record
            .side
            .as_deref()
            .map(LegSide::parse)
            .unwrap_or_default(),
        barrier: BarrierTerms::classify(record.barrier_type.as_deref(), level, initial_spot),
        rebate: opt_number(&record.rebate).unwrap_or(0.0),
    }
}

/// Convert a market snapshot row.
pub fn market_from_record(record: &MarketRecord) -> MarketSnapshot {
    MarketSnapshot {
        close: opt_number(&record.close),
        high: opt_number(&record.high),
        low: opt_number(&record.low),
        dividends_total: opt_number(&record.dividends_total),
    }
}

fn parse_choice(
    direction: &'static str,
    value: Option<&str>,
) -> Result<OverrideChoice, RecordError> {
    let Some(raw) = value else {
        return Ok(OverrideChoice::Auto);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "auto" => Ok(OverrideChoice::Auto),
        "hit" => Ok(OverrideChoice::Hit),
        "miss" => Ok(OverrideChoice::Miss),
        _ => Err(RecordError::UnknownOverrideChoice {
            direction,
            value: raw.to_string(),
        }),
    }
}

/// Convert a reviewer override row. Unknown choices are rejected.
pub fn override_from_record(record: &OverrideRecord) -> Result<BarrierOverride, RecordError> {
    Ok(BarrierOverride {
        high: parse_choice("high", record.high.as_deref())?,
        low: parse_choice("low", record.low.as_deref())?,
    })
}

// ─── JSON helpers ────────────────────────────────────────────────────────

/// Parse an operation from its exported JSON payload.
pub fn operation_from_json(payload: &str) -> Result<Operation, RecordError> {
    let record: OperationRecord = serde_json::from_str(payload)?;
    Ok(operation_from_record(&record))
}

/// Parse a market snapshot from its exported JSON payload.
pub fn market_from_json(payload: &str) -> Result<MarketSnapshot, RecordError> {
    let record: MarketRecord = serde_json::from_str(payload)?;
    Ok(market_from_record(&record))
}

/// Parse a reviewer override from its exported JSON payload.
pub fn override_from_json(payload: &str) -> Result<BarrierOverride, RecordError> {
    let record: OverrideRecord = serde_json::from_str(payload)?;
    override_from_record(&record)
}
