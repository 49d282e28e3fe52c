//! Structured-operation data model: operations, legs, market snapshots.

pub mod types;

pub use types::{CouponRate, Leg, LegSide, MarketSnapshot, Operation, OptionKind};
