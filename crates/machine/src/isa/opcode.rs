//! Opcode table.
//!
//! Defines every code point of the binary format. The table is wider than
//! the executed set: several codes (OR, AND, MUL, DIV, SUB1, JA, JB, JBE) are
//! reserved by the format and accepted by the decoder, but the control unit
//! rejects them at execution time.

use std::fmt;

/// Instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// No operation.
    Nop = 0x00,
    /// Halt: clean terminal state.
    Hlt = 0x01,
    /// Register increment.
    Inc = 0x02,
    /// Register decrement.
    Dec = 0x03,
    /// Register-indirect load.
    Ld = 0x04,
    /// Register-indirect store.
    St = 0x05,
    /// Reserved: bitwise OR.
    Or = 0x06,
    /// Reserved: bitwise AND.
    And = 0x07,
    /// Shift left by immediate.
    Shl = 0x08,
    /// Shift right by immediate.
    Shr = 0x09,
    /// 32-bit memory addition.
    Add = 0x0A,
    /// Single-limb memory subtraction.
    Sub = 0x0B,
    /// Reserved: multiply.
    Mul = 0x0C,
    /// Reserved: divide.
    Div = 0x0D,
    /// Single-byte register += immediate.
    Add1 = 0x0E,
    /// Reserved: single-byte subtraction.
    Sub1 = 0x0F,
    /// Compare (SUB for flags only).
    Cmp = 0x10,
    /// Unconditional jump.
    Jmp = 0x11,
    /// Jump if Z == 1.
    Je = 0x12,
    /// Jump if Z == 0.
    Jne = 0x13,
    /// Reserved: jump if above.
    Ja = 0x14,
    /// Jump if N == 0.
    Jae = 0x15,
    /// Reserved: jump if below.
    Jb = 0x16,
    /// Reserved: jump if below or equal.
    Jbe = 0x17,
    /// Single-byte move.
    Mov = 0x20,
    /// 32-bit move.
    Mov4 = 0x21,
    /// Port input.
    In = 0x22,
    /// Port output.
    Out = 0x23,
}

impl Opcode {
    /// Looks up an opcode by its code byte.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => Self::Nop,
            0x01 => Self::Hlt,
            0x02 => Self::Inc,
            0x03 => Self::Dec,
            0x04 => Self::Ld,
            0x05 => Self::St,
            0x06 => Self::Or,
            0x07 => Self::And,
            0x08 => Self::Shl,
            0x09 => Self::Shr,
            0x0A => Self::Add,
            0x0B => Self::Sub,
            0x0C => Self::Mul,
            0x0D => Self::Div,
            0x0E => Self::Add1,
            0x0F => Self::Sub1,
            0x10 => Self::Cmp,
            0x11 => Self::Jmp,
            0x12 => Self::Je,
            0x13 => Self::Jne,
            0x14 => Self::Ja,
            0x15 => Self::Jae,
            0x16 => Self::Jb,
            0x17 => Self::Jbe,
            0x20 => Self::Mov,
            0x21 => Self::Mov4,
            0x22 => Self::In,
            0x23 => Self::Out,
            _ => return None,
        })
    }

    /// The opcode's code byte.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether records of this opcode carry an addressing-mode byte.
    ///
    /// HLT and NOP records end right after the opcode byte.
    pub fn has_operand_block(self) -> bool {
        !matches!(self, Self::Nop | Self::Hlt)
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Or => "OR",
            Self::And => "AND",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Add1 => "ADD1",
            Self::Sub1 => "SUB1",
            Self::Cmp => "CMP",
            Self::Jmp => "JMP",
            Self::Je => "JE",
            Self::Jne => "JNE",
            Self::Ja => "JA",
            Self::Jae => "JAE",
            Self::Jb => "JB",
            Self::Jbe => "JBE",
            Self::Mov => "MOV",
            Self::Mov4 => "MOV4",
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
