//! Common types shared across the simulator.
//!
//! This module provides the fundamental building blocks used by every other
//! component:
//! 1. **Constants:** system-wide widths and limits.
//! 2. **Error Handling:** the fatal-error taxonomy of the machine and codec.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for execution and decoding.
pub mod error;

pub use constants::{LIMB_COUNT, MAX_OPERANDS};
pub use error::{CodecError, MachineError};
