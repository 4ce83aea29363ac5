//! Configuration system for the simulator.
//!
//! This module parameterizes the machine: the simulated word width and the
//! port numbers of the two memory-mapped I/O devices. Configuration is
//! supplied by the embedding driver (deserialized or built in code); use
//! `MachineConfig::default()` for the canonical 8-bit machine.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Width of every register and memory word, in bits.
    ///
    /// Also fixes the address-space size at `2^WORD_BITS` words, since the
    /// memory address register shares this width.
    pub const WORD_BITS: u32 = 8;

    /// Port number of the input source device.
    pub const INPUT_PORT: u8 = 0;

    /// Port number of the output sink device.
    pub const OUTPUT_PORT: u8 = 1;
}

/// Machine configuration.
///
/// All fields default to the canonical layout: an 8-bit word with the input
/// source on port 0 and the output sink on port 1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Width of every register and memory word, in bits.
    pub word_bits: u32,
    /// Port the input source device is mapped to.
    pub input_port: u8,
    /// Port the output sink device is mapped to.
    pub output_port: u8,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            word_bits: defaults::WORD_BITS,
            input_port: defaults::INPUT_PORT,
            output_port: defaults::OUTPUT_PORT,
        }
    }
}
