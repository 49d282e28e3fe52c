#![forbid(unsafe_code)]

pub mod dashboard;

pub fn infra_bootstrapped() -> bool {
    settle_core::crate_bootstrapped()
}
