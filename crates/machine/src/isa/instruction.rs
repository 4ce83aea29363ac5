//! Decoded instruction representation.

use std::fmt;

use crate::common::error::MachineError;

use super::opcode::Opcode;
use super::operand::Operand;

/// One decoded instruction.
///
/// `address` is the instruction's byte offset in the program stream. Encoded
/// records vary from 2 to 6 bytes, so consecutive instructions are generally
/// not at consecutive addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode.
    pub opcode: Opcode,
    /// Up to four operands, a contiguous prefix of the record's mode fields.
    pub operands: Vec<Operand>,
    /// Byte offset of this instruction in the program stream.
    pub address: u8,
}

impl Instruction {
    /// Creates an operand-less instruction.
    pub fn new(opcode: Opcode, address: u8) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
            address,
        }
    }

    /// Creates an instruction with operands.
    pub fn with_operands(opcode: Opcode, address: u8, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands,
            address,
        }
    }

    /// The operand in slot `index`, or a fatal error naming the slot.
    ///
    /// An absent operand means the translator violated the instruction's
    /// operand contract; execution cannot continue.
    pub fn operand(&self, index: usize) -> Result<Operand, MachineError> {
        self.operands
            .get(index)
            .copied()
            .ok_or(MachineError::MissingOperand {
                opcode: self.opcode,
                address: self.address,
                index,
            })
    }
}

impl fmt::Display for Instruction {
    /// Renders in assembly listing form, e.g. `MOV $05, .0a` or
    /// `ADD $10 <- $14, .02`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operands.as_slice() {
            [a] => write!(f, "{} {a}", self.opcode),
            [a, b] => write!(f, "{} {a}, {b}", self.opcode),
            [a, b, c] => write!(f, "{} {a} <- {b}, {c}", self.opcode),
            _ => write!(f, "{}", self.opcode),
        }
    }
}
