#![forbid(unsafe_code)]

pub mod audit;
pub mod barrier;
pub mod engine;
pub mod payoff;
pub mod position;

pub fn crate_bootstrapped() -> bool {
    true
}
