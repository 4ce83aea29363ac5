//! Datapath unit tests.



/// Memory and I/O device tests.
pub mod memory_io;

/// Register cell tests.
pub mod register;
