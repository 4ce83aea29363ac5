//! ISA tests.

/// Binary codec tests: decode, encode, error paths.
pub mod codec;

/// Listing-format rendering tests.
pub mod display;
