//! Control unit tests: per-opcode execution sequences and control flow.



/// Jumps, sequencing, and the fatal control-flow errors.
pub mod jumps;
