//! Control unit: the fetch-decode-execute state machine.
//!
//! Per step the unit fetches the instruction at the current address (a hole
//! there is a fatal malformed-program error), dispatches on its opcode into a
//! closed set of executors, each of which issues the prescribed datapath
//! register transfers and ALU invocations and answers with a
//! [`ControlTransfer`], and finally applies that transfer to the instruction
//! pointer. No hidden state persists between steps beyond register contents
//! and the ALU flags.

/// Decoded program table.
pub mod program;

mod exec;

use crate::common::error::MachineError;
use crate::datapath::DataPath;
use crate::isa::instruction::Instruction;

use program::Program;

/// Where control goes after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTransfer {
    /// Fall through to the next instruction in file order.
    Advance,
    /// Jump to an absolute instruction address.
    JumpTo(u8),
    /// Terminate the run; a normal end condition, not an error.
    Halt,
}

/// The fetch-decode-execute engine; owns the datapath and the program.
#[derive(Debug)]
pub struct ControlUnit {
    datapath: DataPath,
    program: Program,
    pc: u8,
    steps: u64,
    halted: bool,
}

impl ControlUnit {
    /// Creates a control unit positioned at the program's first instruction.
    pub fn new(datapath: DataPath, program: Program) -> Self {
        let pc = program.entry().unwrap_or(0);
        Self {
            datapath,
            program,
            pc,
            steps: 0,
            halted: false,
        }
    }

    /// Executes one instruction.
    ///
    /// Returns the applied [`ControlTransfer`]; [`ControlTransfer::Halt`]
    /// marks the clean terminal state. Calling `step` again after a halt
    /// keeps returning `Halt` without touching the datapath.
    ///
    /// # Errors
    ///
    /// Any [`MachineError`]: a fetch from a hole in the program, an
    /// unsupported operand combination, a reserved opcode, and the rest of
    /// the fatal taxonomy. None of these are retryable.
    pub fn step(&mut self) -> Result<ControlTransfer, MachineError> {
        if self.halted {
            return Ok(ControlTransfer::Halt);
        }

        let instruction = self
            .program
            .fetch(self.pc)
            .ok_or(MachineError::MissingInstruction { address: self.pc })?
            .clone();

        let transfer = self.execute(&instruction)?;
        self.steps += 1;

        tracing::debug!(
            step = self.steps,
            address = u64::from(instruction.address),
            instruction = %instruction,
            state = %self.datapath.state_line(),
        );

        match transfer {
            ControlTransfer::Advance => {
                self.pc = self
                    .program
                    .successor(self.pc)
                    .ok_or(MachineError::NoSuccessor { address: self.pc })?;
            }
            // Target validity is checked by the next fetch, like hardware
            // loading an arbitrary value into the instruction pointer.
            ControlTransfer::JumpTo(address) => self.pc = address,
            ControlTransfer::Halt => self.halted = true,
        }

        Ok(transfer)
    }

    /// The current instruction address.
    pub fn pc(&self) -> u8 {
        self.pc
    }

    /// Number of instructions executed so far (HLT included).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether HLT has been reached.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The owned datapath.
    pub fn datapath(&self) -> &DataPath {
        &self.datapath
    }

    /// Mutable access to the datapath (test setup: preloading registers).
    pub fn datapath_mut(&mut self) -> &mut DataPath {
        &mut self.datapath
    }

    /// The decoded program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    fn execute(&mut self, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
        exec::execute(&mut self.datapath, instruction)
    }
}
