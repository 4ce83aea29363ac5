//! Machine: owns the control unit and drives the deterministic run loop.
//!
//! Given the same decoded program, initial memory image, and input sequence,
//! every intermediate register, flag, and output state is bit-for-bit
//! reproducible — acceptance testing compares full execution traces, so
//! nothing here may introduce nondeterminism.
//!
//! Infinite-loop protection is deliberately absent: a non-terminating
//! program is an expected input, and cutting it off is the embedding
//! driver's job.

use crate::common::error::MachineError;
use crate::config::MachineConfig;
use crate::control::{ControlTransfer, ControlUnit};
use crate::control::program::Program;
use crate::datapath::DataPath;

/// Final state of a run that reached HLT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of instructions executed, HLT included.
    pub steps: u64,
    /// Everything the output sink accumulated.
    pub output: String,
}

/// Top-level simulator: one control unit wired over one datapath.
#[derive(Debug)]
pub struct Machine {
    control: ControlUnit,
}

impl Machine {
    /// Assembles a machine from a decoded program, an initial memory image,
    /// and the preset input sequence.
    pub fn new(
        config: &MachineConfig,
        program: Program,
        memory_image: &[u8],
        input: &str,
    ) -> Self {
        let datapath = DataPath::new(config, memory_image, input);
        Self {
            control: ControlUnit::new(datapath, program),
        }
    }

    /// Assembles a machine straight from the translator's binary artifacts.
    ///
    /// # Errors
    ///
    /// Fails on a malformed instruction stream (truncated record, unknown
    /// opcode byte, non-monotonic addresses).
    pub fn from_binary(
        config: &MachineConfig,
        program_bytes: &[u8],
        memory_image: &[u8],
        input: &str,
    ) -> Result<Self, MachineError> {
        let program = Program::from_binary(program_bytes)?;
        Ok(Self::new(config, program, memory_image, input))
    }

    /// Executes one instruction; see [`ControlUnit::step`].
    ///
    /// # Errors
    ///
    /// Propagates any fatal [`MachineError`] from the control unit.
    pub fn step(&mut self) -> Result<ControlTransfer, MachineError> {
        self.control.step()
    }

    /// Runs until HLT.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal [`MachineError`]; the run stops entirely.
    pub fn run(&mut self) -> Result<RunReport, MachineError> {
        while self.control.step()? != ControlTransfer::Halt {}

        let report = RunReport {
            steps: self.control.steps(),
            output: self.control.datapath().output(),
        };
        tracing::info!(steps = report.steps, output = %report.output, "halted");
        Ok(report)
    }

    /// The output accumulated so far (live inspection mid-run).
    pub fn output(&self) -> String {
        self.control.datapath().output()
    }

    /// The control unit.
    pub fn control_unit(&self) -> &ControlUnit {
        &self.control
    }

    /// Mutable access to the control unit (test setup).
    pub fn control_unit_mut(&mut self) -> &mut ControlUnit {
        &mut self.control
    }
}
