//! Arithmetic/logic unit with selective flag updates.
//!
//! The ALU is combinational: it reads the two input registers (INL, INR),
//! writes the output register (OUT), and updates only the status flags named
//! by the caller's mask. Flags persist across operations — they are never
//! auto-cleared between instructions, and the carry flag doubles as the
//! carry-in for ADD, which is what lets the control unit chain four 8-bit
//! limb additions into 32-bit arithmetic.
//!
//! The carry rule is `C = 1` iff the untruncated result exceeds `2^bits`
//! (strictly greater, not `>=`). This is a deliberate convention the
//! multi-limb ADD/SUB/CMP sequences depend on; do not normalize it.

use std::fmt;

use super::register::{RegId, RegisterFile};

/// ALU operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `left + right + C`.
    Add,
    /// `left + complement(right)` (two's-complement subtraction).
    Sub,
    /// Bitwise `left & right`.
    And,
    /// Bitwise `left | right`.
    Or,
    /// `left + 1`; flag mask forced to NZV.
    IncLeft,
    /// `right + 1`; flag mask forced to NZV.
    IncRight,
    /// `left - 1`; flag mask forced to NZV.
    DecLeft,
    /// `right - 1`; flag mask forced to NZV.
    DecRight,
    /// `left << right`; flag mask forced to C.
    Shl,
    /// `left >> right`; flag mask forced to C.
    Shr,
}

/// The four status flags, each 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative: sign bit of the truncated result.
    pub n: u8,
    /// Zero: truncated result equals zero.
    pub z: u8,
    /// Signed overflow: operand sign bits agree and differ from the result's.
    pub v: u8,
    /// Carry: untruncated result strictly exceeds `2^bits`.
    pub c: u8,
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N: {}, Z: {}, V: {}, C: {}",
            self.n, self.z, self.v, self.c
        )
    }
}

/// Subset of flags an operation is permitted to update.
///
/// Unnamed flags keep their prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMask {
    /// Update N.
    pub n: bool,
    /// Update Z.
    pub z: bool,
    /// Update V.
    pub v: bool,
    /// Update C.
    pub c: bool,
}

impl FlagMask {
    /// Update all four flags (the default for ADD/SUB/AND/OR).
    pub const ALL: Self = Self {
        n: true,
        z: true,
        v: true,
        c: true,
    };

    /// Update N, Z, V only; the mask increments and decrements force so the
    /// carry survives address stepping inside multi-limb sequences.
    pub const NZV: Self = Self {
        n: true,
        z: true,
        v: true,
        c: false,
    };

    /// Update C only (shifts).
    pub const CARRY: Self = Self {
        n: false,
        z: false,
        v: false,
        c: true,
    };
}

/// Combinational ALU over the INL/INR/OUT registers of a register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alu {
    bits: u32,
    flags: Flags,
}

impl Alu {
    /// Creates an ALU for `bits`-wide operands with all flags clear.
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            flags: Flags::default(),
        }
    }

    /// Current flag values.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Clears the carry flag.
    ///
    /// Callers do this explicitly before starting a carry-chained sequence;
    /// nothing clears flags implicitly.
    pub fn clear_carry(&mut self) {
        self.flags.c = 0;
    }

    /// Forces the Z flag (test hook for conditional-jump setup).
    pub fn set_zero(&mut self, z: u8) {
        self.flags.z = z;
    }

    /// Two's complement of `value` at the ALU width:
    /// `((value XOR (2^bits - 1)) + 1) mod 2^bits`.
    pub fn complement(&self, value: u64) -> u64 {
        let mask = (1u64 << self.bits) - 1;
        ((value & mask) ^ mask).wrapping_add(1) & mask
    }

    /// Executes `op` over INL/INR, writing OUT truncated to the ALU width and
    /// updating the flags selected by `mask`.
    ///
    /// The increment/decrement operations force the mask to NZV and the
    /// shifts force it to C, regardless of the caller's request.
    pub fn compute(&mut self, op: AluOp, regs: &mut RegisterFile, mask: FlagMask) {
        let left = regs.get(RegId::Inl);
        let right = regs.get(RegId::Inr);

        let (raw, mask) = match op {
            AluOp::Add => (
                u128::from(left) + u128::from(right) + u128::from(self.flags.c),
                mask,
            ),
            AluOp::Sub => (
                u128::from(left) + u128::from(self.complement(right)),
                mask,
            ),
            AluOp::And => (u128::from(left & right), mask),
            AluOp::Or => (u128::from(left | right), mask),
            AluOp::IncLeft => (u128::from(left) + 1, FlagMask::NZV),
            AluOp::IncRight => (u128::from(right) + 1, FlagMask::NZV),
            AluOp::DecLeft => (
                u128::from(left) + u128::from(self.complement(1)),
                FlagMask::NZV,
            ),
            AluOp::DecRight => (
                u128::from(right) + u128::from(self.complement(1)),
                FlagMask::NZV,
            ),
            AluOp::Shl => (Self::shifted_left(left, right), FlagMask::CARRY),
            AluOp::Shr => (
                u128::from(left.checked_shr(right as u32).unwrap_or(0)),
                FlagMask::CARRY,
            ),
        };

        let modulus = 1u128 << self.bits;
        regs.set(RegId::Out, (raw % modulus) as u64);
        self.update_flags(raw, left, right, mask);
    }

    /// Raw `left << right` without truncation.
    ///
    /// A shift amount at or past the host width mathematically yields a
    /// multiple of `2^64`: it truncates to zero at any word width and always
    /// overflows the word. Model that directly instead of relying on host
    /// shift behavior.
    fn shifted_left(left: u64, right: u64) -> u128 {
        if right < u64::from(u64::BITS) {
            u128::from(left) << right
        } else if left == 0 {
            0
        } else {
            1u128 << u64::BITS
        }
    }

    fn update_flags(&mut self, raw: u128, left: u64, right: u64, mask: FlagMask) {
        let modulus = 1u128 << self.bits;
        let sign = 1u128 << (self.bits - 1);

        if mask.n {
            self.flags.n = u8::from(raw & sign != 0);
        }
        if mask.z {
            self.flags.z = u8::from(raw % modulus == 0);
        }
        if mask.v {
            let l_bit = u128::from(left) & sign;
            let r_bit = u128::from(right) & sign;
            let o_bit = raw & sign;
            self.flags.v = u8::from(l_bit == r_bit && l_bit != o_bit);
        }
        if mask.c {
            // Strictly greater than 2^bits: a raw sum of exactly 2^bits does
            // not set the carry. Load-bearing for the limb-chaining callers.
            self.flags.c = u8::from(raw > modulus);
        }
    }
}
