//! Operands and addressing modes.

use std::fmt;

/// How an operand's stored byte should be interpreted.
///
/// Encoded as a 2-bit field in the instruction's mode byte; the fourth
/// pattern (`0b00`) means "no operand" and is not a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AddressingMode {
    /// The byte is a memory address; the operand lives in that cell.
    Direct = 0b01,
    /// The byte is the literal value.
    Immediate = 0b10,
    /// The byte is a register index.
    Register = 0b11,
}

impl AddressingMode {
    /// Interprets a 2-bit mode field; `0b00` is the "no operand" marker.
    ///
    /// Only the low two bits are inspected.
    pub fn from_field(bits: u8) -> Option<Self> {
        match bits & 0b11 {
            0b01 => Some(Self::Direct),
            0b10 => Some(Self::Immediate),
            0b11 => Some(Self::Register),
            _ => None,
        }
    }

    /// The mode's 2-bit field encoding.
    pub fn field(self) -> u8 {
        self as u8
    }
}

/// One instruction operand: an addressing mode plus an 8-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    /// Interpretation of `value`.
    pub mode: AddressingMode,
    /// The stored byte.
    pub value: u8,
}

impl Operand {
    /// Creates an operand.
    pub fn new(mode: AddressingMode, value: u8) -> Self {
        Self { mode, value }
    }

    /// Memory-direct operand (`$xx`).
    pub fn direct(value: u8) -> Self {
        Self::new(AddressingMode::Direct, value)
    }

    /// Immediate operand (`.xx`).
    pub fn immediate(value: u8) -> Self {
        Self::new(AddressingMode::Immediate, value)
    }

    /// Register-direct operand (`Rxx`).
    pub fn register(value: u8) -> Self {
        Self::new(AddressingMode::Register, value)
    }
}

impl fmt::Display for Operand {
    /// Renders in assembly listing form: `$xx` memory-direct, `.xx`
    /// immediate, `Rxx` register-direct.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            AddressingMode::Direct => write!(f, "${:02x}", self.value),
            AddressingMode::Immediate => write!(f, ".{:02x}", self.value),
            AddressingMode::Register => write!(f, "R{:02x}", self.value),
        }
    }
}
