//! Register-transfer-level simulator of an 8-bit accumulator machine.
//!
//! This crate implements a small fixed-width processor cycle-by-cycle over an
//! explicit datapath rather than by expression evaluation:
//! 1. **Datapath:** registers with tri-state bus signals, a shared bus, an
//!    8-bit ALU with selective flag updates, sparse memory, and port-mapped
//!    I/O devices.
//! 2. **Control:** a fetch-decode-execute unit that translates every opcode
//!    into an ordered sequence of register transfers and ALU invocations,
//!    including 32-bit arithmetic built from four chained 8-bit limb steps.
//! 3. **ISA:** the bit-exact binary instruction codec consumed by the control
//!    unit (and produced by an external translator).
//! 4. **Simulation:** a top-level machine owning the control unit, with a
//!    deterministic run loop and per-step tracing.

/// Common types shared across the simulator (errors, constants).
pub mod common;
/// Simulator configuration (word width, port assignment).
pub mod config;
/// Control unit (program table, fetch-decode-execute engine).
pub mod control;
/// Datapath (registers, bus, ALU, memory, I/O ports).
pub mod datapath;
/// Instruction set (opcodes, operands, binary codec).
pub mod isa;
/// Top-level machine and run loop.
pub mod sim;

/// Fatal execution errors (malformed programs, contract violations).
pub use crate::common::error::{CodecError, MachineError};
/// Root configuration type; use `MachineConfig::default()` or deserialize.
pub use crate::config::MachineConfig;
/// Fetch-decode-execute engine; owns the datapath and the program table.
pub use crate::control::ControlUnit;
/// Decoded program table with O(1) successor lookup.
pub use crate::control::program::Program;
/// The wired machine datapath; construct via `DataPath::new`.
pub use crate::datapath::DataPath;
/// Top-level simulator; construct with `Machine::new` and call `run`.
pub use crate::sim::{Machine, RunReport};
