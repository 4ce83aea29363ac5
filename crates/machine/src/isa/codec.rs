//! Bit-exact binary instruction codec.
//!
//! Record grammar, one record per instruction:
//! 1. one address byte (the instruction's offset in the program stream);
//! 2. one opcode byte — HLT and NOP records end here;
//! 3. one mode byte: four 2-bit addressing-mode fields packed MSB-first,
//!    `00` none / `01` memory-direct / `10` immediate / `11` register-direct;
//! 4. one value byte per non-none field, in field order, stopping at the
//!    first none field (operands are a contiguous prefix).
//!
//! Decoding is strict: a stream that ends mid-record is a
//! [`CodecError::TruncatedRecord`], never a silent stop.

use crate::common::constants::MAX_OPERANDS;
use crate::common::error::CodecError;

use super::instruction::Instruction;
use super::opcode::Opcode;
use super::operand::{AddressingMode, Operand};

/// Width of one addressing-mode field in the mode byte.
const MODE_FIELD_BITS: u8 = 2;

/// Shift that aligns mode field `i` (MSB-first) to the low bits.
fn mode_field_shift(index: usize) -> u8 {
    (MAX_OPERANDS as u8 - 1 - index as u8) * MODE_FIELD_BITS
}

/// Decodes a complete instruction stream.
///
/// # Errors
///
/// Returns a [`CodecError`] on a truncated record or an opcode byte outside
/// the code table.
pub fn decode_program(bytes: &[u8]) -> Result<Vec<Instruction>, CodecError> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let address = bytes[offset];
        offset += 1;

        let code = *bytes
            .get(offset)
            .ok_or(CodecError::TruncatedRecord { offset })?;
        let opcode = Opcode::from_code(code).ok_or(CodecError::UnknownOpcode { code, offset })?;
        offset += 1;

        let mut instruction = Instruction::new(opcode, address);
        if !opcode.has_operand_block() {
            instructions.push(instruction);
            continue;
        }

        let mode_byte = *bytes
            .get(offset)
            .ok_or(CodecError::TruncatedRecord { offset })?;
        offset += 1;

        for index in 0..MAX_OPERANDS {
            let field = mode_byte >> mode_field_shift(index);
            let Some(mode) = AddressingMode::from_field(field) else {
                break;
            };
            let value = *bytes
                .get(offset)
                .ok_or(CodecError::TruncatedRecord { offset })?;
            offset += 1;
            instruction.operands.push(Operand::new(mode, value));
        }

        instructions.push(instruction);
    }

    Ok(instructions)
}

/// Encodes one instruction record, appending to `out`.
///
/// This is the output contract of the external translator, kept here so the
/// format round-trips in one place.
pub fn encode_instruction(instruction: &Instruction, out: &mut Vec<u8>) {
    out.push(instruction.address);
    out.push(instruction.opcode.code());

    if !instruction.opcode.has_operand_block() {
        return;
    }

    let mut mode_byte = 0u8;
    for (index, operand) in instruction.operands.iter().enumerate().take(MAX_OPERANDS) {
        mode_byte |= operand.mode.field() << mode_field_shift(index);
    }
    out.push(mode_byte);

    for operand in instruction.operands.iter().take(MAX_OPERANDS) {
        out.push(operand.value);
    }
}

/// Encodes a whole program as a contiguous record stream.
pub fn encode_program(instructions: &[Instruction]) -> Vec<u8> {
    let mut out = Vec::new();
    for instruction in instructions {
        encode_instruction(instruction, &mut out);
    }
    out
}
