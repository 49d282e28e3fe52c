//! Settlement input fingerprinting.
//!
//! `fingerprint = xxhash64(operation fields + legs + market + overrides)`
//!
//! Settlement is a pure function of its inputs, so equal fingerprints
//! certify equal results; reporting layers use the fingerprint as an audit
//! and dedup key for settlement runs. No wall-clock input ever enters the
//! hash.

use xxhash_rust::xxh64::xxh64;

use crate::barrier::{BarrierDirection, BarrierMode, BarrierOverride, OverrideChoice};
use crate::position::{CouponRate, Leg, LegSide, MarketSnapshot, Operation, OptionKind};

// Field separator byte. Cannot appear in UTF-8 strings, so field boundaries
// stay unambiguous.
const FIELD_SEP: u8 = 0xFF;

fn push_str(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(value.as_bytes());
    buf.push(FIELD_SEP);
}

fn push_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_le_bytes());
    buf.push(FIELD_SEP);
}

fn push_opt_f64(buf: &mut Vec<u8>, value: Option<f64>) {
    match value {
        Some(value) => {
            buf.push(1);
            buf.extend_from_slice(&value.to_le_bytes());
        }
        None => buf.push(0),
    }
    buf.push(FIELD_SEP);
}

fn kind_byte(kind: OptionKind) -> u8 {
    match kind {
        OptionKind::Call => 1,
        OptionKind::Put => 2,
        OptionKind::Other => 3,
    }
}

fn side_byte(side: LegSide) -> u8 {
    match side {
        LegSide::Long => 1,
        LegSide::Short => 2,
    }
}

fn direction_byte(direction: BarrierDirection) -> u8 {
    match direction {
        BarrierDirection::High => 1,
        BarrierDirection::Low => 2,
        BarrierDirection::Unknown => 3,
    }
}

fn mode_byte(mode: BarrierMode) -> u8 {
    match mode {
        BarrierMode::KnockIn => 1,
        BarrierMode::KnockOut => 2,
        BarrierMode::Informational => 3,
    }
}

fn choice_byte(choice: OverrideChoice) -> u8 {
    match choice {
        OverrideChoice::Auto => 0,
        OverrideChoice::Hit => 1,
        OverrideChoice::Miss => 2,
    }
}

fn push_leg(buf: &mut Vec<u8>, leg: &Leg) {
    push_str(buf, &leg.id);
    buf.push(kind_byte(leg.kind));
    push_opt_f64(buf, leg.strike);
    push_opt_f64(buf, leg.quantity);
    buf.push(side_byte(leg.side));
    match leg.barrier {
        Some(terms) => {
            buf.push(1);
            buf.extend_from_slice(&terms.level.to_le_bytes());
            buf.push(direction_byte(terms.direction));
            buf.push(mode_byte(terms.mode));
        }
        None => buf.push(0),
    }
    buf.push(FIELD_SEP);
    push_f64(buf, leg.rebate);
}

/// Compute the fingerprint for one settlement input triple.
pub fn settlement_fingerprint(
    operation: &Operation,
    market: &MarketSnapshot,
    overrides: Option<&BarrierOverride>,
) -> u64 {
    let mut buf = Vec::with_capacity(256);

    push_str(&mut buf, &operation.id);
    push_str(&mut buf, &operation.ticker);
    push_opt_f64(&mut buf, operation.initial_spot);
    push_f64(&mut buf, operation.unit_cost);
    push_f64(&mut buf, operation.quantity);
    match &operation.coupon {
        Some(CouponRate::Rate(rate)) => {
            buf.push(1);
            buf.extend_from_slice(&rate.to_le_bytes());
        }
        Some(CouponRate::Text(raw)) => {
            buf.push(2);
            buf.extend_from_slice(raw.as_bytes());
        }
        None => buf.push(0),
    }
    buf.push(FIELD_SEP);
    match operation.maturity_ms {
        Some(maturity) => {
            buf.push(1);
            buf.extend_from_slice(&maturity.to_le_bytes());
        }
        None => buf.push(0),
    }
    buf.push(FIELD_SEP);
    push_opt_f64(&mut buf, operation.supplied_pl);
    for leg in &operation.legs {
        push_leg(&mut buf, leg);
    }

    push_opt_f64(&mut buf, market.close);
    push_opt_f64(&mut buf, market.high);
    push_opt_f64(&mut buf, market.low);
    push_opt_f64(&mut buf, market.dividends_total);

    let overrides = overrides.copied().unwrap_or_default();
    buf.push(choice_byte(overrides.high));
    buf.push(choice_byte(overrides.low));

    xxh64(&buf, 0)
}

/// Format a fingerprint as a 16-hex-digit string.
pub fn format_fingerprint(hash: u64) -> String {
    format!("{hash:016x}")
}
