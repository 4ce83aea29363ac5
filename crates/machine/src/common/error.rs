//! Error types for execution and decoding.
//!
//! The simulator has no partial-failure or retry semantics: every variant
//! here is fatal and stops the run. Each carries enough context (offending
//! address, opcode, or byte offset) for an external driver to render a
//! diagnostic. Reaching HLT is *not* an error and is reported through
//! [`crate::sim::RunReport`] instead.

use thiserror::Error;

use crate::isa::opcode::Opcode;

/// Fatal errors raised while decoding the binary instruction stream.
///
/// Any of these indicates a truncated or corrupt artifact from the external
/// translator; the decoder cannot make progress past them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The stream ended in the middle of an instruction record.
    #[error("truncated instruction record at byte offset {offset}")]
    TruncatedRecord {
        /// Byte offset at which the missing byte was expected.
        offset: usize,
    },

    /// The opcode byte does not name any known instruction.
    #[error("unknown opcode byte {code:#04x} at byte offset {offset}")]
    UnknownOpcode {
        /// The unrecognized opcode byte.
        code: u8,
        /// Byte offset of the opcode byte.
        offset: usize,
    },
}

/// Fatal errors raised while executing a decoded program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The control unit fetched an address with no instruction behind it.
    ///
    /// Indicates a malformed program: a jump into a hole in the instruction
    /// stream.
    #[error("no instruction at address {address:#04x}")]
    MissingInstruction {
        /// The address that was fetched.
        address: u8,
    },

    /// Execution fell off the end of the program without reaching HLT.
    #[error("no instruction follows {address:#04x}; program ended without HLT")]
    NoSuccessor {
        /// Address of the last instruction executed.
        address: u8,
    },

    /// The instruction addresses were not strictly increasing at load time.
    ///
    /// The default "next instruction" rule is only well-defined over a
    /// program decoded in file order with ascending addresses.
    #[error("instruction addresses not strictly increasing: {prev:#04x} then {next:#04x}")]
    NonMonotonicAddress {
        /// The earlier address.
        prev: u8,
        /// The offending follow-up address.
        next: u8,
    },

    /// An operand combination the machine declares unsupported.
    ///
    /// Signals a translator/input contract violation; never silently coerced.
    #[error("unsupported operand combination for {opcode} at address {address:#04x}")]
    UnsupportedOperands {
        /// The instruction's opcode.
        opcode: Opcode,
        /// The instruction's address.
        address: u8,
    },

    /// The opcode is reserved in the code table but has no execution
    /// semantics (e.g. MUL, DIV).
    #[error("opcode {opcode} at address {address:#04x} has no execution semantics")]
    UnsupportedOpcode {
        /// The reserved opcode.
        opcode: Opcode,
        /// The instruction's address.
        address: u8,
    },

    /// An instruction referenced an operand slot it does not carry.
    #[error("{opcode} at address {address:#04x} is missing operand {index}")]
    MissingOperand {
        /// The instruction's opcode.
        opcode: Opcode,
        /// The instruction's address.
        address: u8,
        /// Zero-based operand slot that was requested.
        index: usize,
    },

    /// A register-direct operand named a register outside the register map.
    #[error("unknown register index {index} at address {address:#04x}")]
    UnknownRegister {
        /// The out-of-range register index.
        index: u8,
        /// The instruction's address.
        address: u8,
    },

    /// An IN/OUT instruction addressed a port with no device behind it.
    #[error("unknown I/O port {port} at address {address:#04x}")]
    UnknownPort {
        /// The unmapped port number.
        port: u8,
        /// The instruction's address.
        address: u8,
    },

    /// The binary instruction stream failed to decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
