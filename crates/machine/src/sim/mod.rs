//! Top-level machine and run loop.

/// Machine assembly and the run loop.
pub mod simulator;

pub use simulator::{Machine, RunReport};
