//! Instruction set: opcodes, operands, and the binary codec.

/// Bit-exact binary encode/decode.
pub mod codec;
/// Decoded instruction representation.
pub mod instruction;
/// Opcode table.
pub mod opcode;
/// Operands and addressing modes.
pub mod operand;

pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::{AddressingMode, Operand};
