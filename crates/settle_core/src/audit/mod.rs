//! Audit fingerprints for settlement inputs.

pub mod fingerprint;

pub use fingerprint::{format_fingerprint, settlement_fingerprint};
