//! Registers and the unified register file.
//!
//! This module provides:
//! 1. **`Register`:** a fixed-width storage cell with the two transient bus
//!    signals (`output_enable`, `input_enable`) used for tri-state
//!    arbitration.
//! 2. **`RegId`:** the closed set of bus-visible registers, so components can
//!    name registers without holding aliasing references into the datapath.
//! 3. **`RegisterFile`:** storage for all bus-visible registers, indexed by
//!    `RegId`.

use std::fmt;

/// A fixed-width storage cell with two bus-arbitration signals.
///
/// The stored value is always kept modulo `2^bits`: assignment truncates,
/// never sign-extends. Both signals are transient; callers open them just
/// before a bus transfer and close them immediately after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    name: &'static str,
    bits: u32,
    value: u64,
    output_enable: bool,
    input_enable: bool,
}

impl Register {
    /// Creates a register of the given width holding zero, signals closed.
    pub fn new(name: &'static str, bits: u32) -> Self {
        Self {
            name,
            bits,
            value: 0,
            output_enable: false,
            input_enable: false,
        }
    }

    /// Returns the register's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the register's width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the stored value.
    pub fn get(&self) -> u64 {
        self.value
    }

    /// Stores `value` truncated modulo `2^bits`.
    pub fn set(&mut self, value: u64) {
        self.value = value % (1u64 << self.bits);
    }

    /// Asserts the input signal: the next bus transfer latches into this
    /// register.
    pub fn open_in(&mut self) {
        self.input_enable = true;
    }

    /// Clears the input signal.
    pub fn close_in(&mut self) {
        self.input_enable = false;
    }

    /// Asserts the output signal: this register drives the next bus transfer.
    pub fn open_out(&mut self) {
        self.output_enable = true;
    }

    /// Clears the output signal.
    pub fn close_out(&mut self) {
        self.output_enable = false;
    }

    /// Whether the input signal is asserted.
    pub fn is_input_open(&self) -> bool {
        self.input_enable
    }

    /// Whether the output signal is asserted.
    pub fn is_output_open(&self) -> bool {
        self.output_enable
    }
}

impl fmt::Display for Register {
    /// Renders as `NAME: XX` with the value zero-padded to the register's
    /// width in hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.bits as usize).div_ceil(4);
        write!(f, "{}: {:0digits$X}", self.name, self.value)
    }
}

/// Identifier of a bus-visible register.
///
/// This is a closed set: the datapath is wired once at construction and the
/// control unit addresses registers by identity rather than by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegId {
    /// Accumulator.
    Ac,
    /// Buffer register.
    Br,
    /// Common register 0 (program-visible).
    R0,
    /// I/O data register shared by every port.
    Ior,
    /// ALU left input.
    Inl,
    /// ALU right input.
    Inr,
    /// ALU output.
    Out,
    /// Memory data register.
    Dr,
    /// Memory address register (data pointer).
    Dp,
}

impl RegId {
    /// Number of bus-visible registers.
    pub const COUNT: usize = 9;

    /// All identifiers, in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ac,
        Self::Br,
        Self::R0,
        Self::Ior,
        Self::Inl,
        Self::Inr,
        Self::Out,
        Self::Dr,
        Self::Dp,
    ];

    /// Returns the register's display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Br => "BR",
            Self::R0 => "R0",
            Self::Ior => "IOR",
            Self::Inl => "INL",
            Self::Inr => "INR",
            Self::Out => "OUT",
            Self::Dr => "DR",
            Self::Dp => "DP",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Ac => 0,
            Self::Br => 1,
            Self::R0 => 2,
            Self::Ior => 3,
            Self::Inl => 4,
            Self::Inr => 5,
            Self::Out => 6,
            Self::Dr => 7,
            Self::Dp => 8,
        }
    }
}

/// Storage for every bus-visible register, indexed by [`RegId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Register; RegId::COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register of width `bits`,
    /// zero-valued, signals closed.
    pub fn new(bits: u32) -> Self {
        let regs = RegId::ALL.map(|id| Register::new(id.name(), bits));
        Self { regs }
    }

    /// Immutable access to a register.
    pub fn reg(&self, id: RegId) -> &Register {
        &self.regs[id.index()]
    }

    /// Mutable access to a register.
    pub fn reg_mut(&mut self, id: RegId) -> &mut Register {
        &mut self.regs[id.index()]
    }

    /// Reads a register's value.
    pub fn get(&self, id: RegId) -> u64 {
        self.reg(id).get()
    }

    /// Writes a register's value (truncating to the register width).
    pub fn set(&mut self, id: RegId, value: u64) {
        self.reg_mut(id).set(value);
    }
}
