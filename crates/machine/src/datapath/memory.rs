//! Sparse data memory driven by the address and data registers.
//!
//! Memory is a sparse mapping from address to word: addresses that were never
//! written read as zero without being materialized. The address space size is
//! fixed by the width of the address register (DP), whose truncating
//! assignment keeps every access in range — there are no capacity errors.

use std::collections::HashMap;

use super::register::{RegId, RegisterFile};

/// Address-indexed word store.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    cells: HashMap<u64, u64>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an initial memory image at ascending addresses starting at 0.
    pub fn fill(&mut self, image: &[u8]) {
        for (addr, word) in image.iter().enumerate() {
            let _ = self.cells.insert(addr as u64, u64::from(*word));
        }
    }

    /// Read signal: DR ← memory[DP], or 0 if the cell was never written.
    pub fn read(&self, regs: &mut RegisterFile) {
        let addr = regs.get(RegId::Dp);
        let word = self.cells.get(&addr).copied().unwrap_or(0);
        regs.set(RegId::Dr, word);
    }

    /// Write signal: memory[DP] ← DR.
    pub fn write(&mut self, regs: &RegisterFile) {
        let addr = regs.get(RegId::Dp);
        let _ = self.cells.insert(addr, regs.get(RegId::Dr));
    }

    /// Direct cell inspection (testing and diagnostics); absent cells read 0.
    pub fn peek(&self, addr: u64) -> u64 {
        self.cells.get(&addr).copied().unwrap_or(0)
    }
}
