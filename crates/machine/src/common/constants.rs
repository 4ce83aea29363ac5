//! Common constants used throughout the simulator.

/// Number of 8-bit limbs in a 32-bit logical value.
///
/// Wide arithmetic (ADD, MOV4, the memory form of CMP) is built by iterating
/// the single-word ALU this many times with explicit carry propagation.
/// Limbs are stored least-significant-first in memory.
pub const LIMB_COUNT: usize = 4;

/// Maximum number of operands an instruction record can carry.
///
/// The binary format packs one 2-bit addressing-mode field per operand into a
/// single byte, which fixes the ceiling at four.
pub const MAX_OPERANDS: usize = 4;
