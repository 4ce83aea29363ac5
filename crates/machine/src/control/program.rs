//! Decoded program table.
//!
//! Instructions keep their file order (which is also strictly increasing
//! address order); an address-to-index map built once at load time gives O(1)
//! fetch and O(1) "next instruction" lookup instead of re-scanning.

use std::collections::HashMap;

use crate::common::error::MachineError;
use crate::isa::codec;
use crate::isa::instruction::Instruction;

/// A decoded program: file-ordered instructions plus an address index.
#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    index_of: HashMap<u8, usize>,
}

impl Program {
    /// Builds the table from decoded instructions.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::NonMonotonicAddress`] unless addresses are
    /// strictly increasing in file order — the successor rule is undefined
    /// otherwise.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, MachineError> {
        let mut index_of = HashMap::with_capacity(instructions.len());
        for (index, instruction) in instructions.iter().enumerate() {
            if index > 0 {
                let prev = instructions[index - 1].address;
                if instruction.address <= prev {
                    return Err(MachineError::NonMonotonicAddress {
                        prev,
                        next: instruction.address,
                    });
                }
            }
            let _ = index_of.insert(instruction.address, index);
        }
        Ok(Self {
            instructions,
            index_of,
        })
    }

    /// Decodes a binary instruction stream and builds the table.
    ///
    /// # Errors
    ///
    /// Propagates decode failures and the monotonicity check of
    /// [`Program::new`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self, MachineError> {
        Ok(Self::new(codec::decode_program(bytes)?)?)
    }

    /// Address of the first instruction, if the program is non-empty.
    pub fn entry(&self) -> Option<u8> {
        self.instructions.first().map(|i| i.address)
    }

    /// The instruction at `address`, if one was decoded there.
    pub fn fetch(&self, address: u8) -> Option<&Instruction> {
        self.index_of
            .get(&address)
            .map(|&index| &self.instructions[index])
    }

    /// Address of the instruction following `address` in file order.
    ///
    /// `None` if `address` is unknown or is the last instruction.
    pub fn successor(&self, address: u8) -> Option<u8> {
        let index = *self.index_of.get(&address)?;
        self.instructions.get(index + 1).map(|i| i.address)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions in file order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
