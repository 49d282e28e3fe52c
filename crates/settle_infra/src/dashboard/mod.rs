//! Revenue-dashboard export adapter.
//!
//! Models the JSON records the dashboard exports and converts them into
//! engine types. Free-form cells (barrier codes, option kinds, sides,
//! coupon text) are classified here, once; the engine only sees tagged
//! enums.

pub mod convert;
pub mod records;

pub use convert::{
    RecordError, market_from_json, market_from_record, operation_from_json,
    operation_from_record, override_from_json, override_from_record,
};
pub use records::{CouponField, FlexValue, LegRecord, MarketRecord, OperationRecord, OverrideRecord};
