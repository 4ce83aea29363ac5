//! Binary codec tests.
//!
//! Record layout under test: address byte, opcode byte, then (for
//! operand-bearing opcodes) one packed mode byte and a value byte per
//! operand.

use aulsim_core::CodecError;
use aulsim_core::isa::codec::{decode_program, encode_program};
use aulsim_core::isa::instruction::Instruction;
use aulsim_core::isa::opcode::Opcode;
use aulsim_core::isa::operand::{AddressingMode, Operand};
use pretty_assertions::assert_eq;

#[test]
fn hlt_and_nop_records_are_two_bytes() {
    let bytes = [0x00, 0x00, 0x02, 0x01]; // NOP @0, HLT @2
    let program = decode_program(&bytes).unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(program[0], Instruction::new(Opcode::Nop, 0));
    assert_eq!(program[1], Instruction::new(Opcode::Hlt, 2));
}

#[test]
fn decodes_mode_fields_msb_first() {
    // MOV @0 with operands $05 (01) and .0A (10): mode byte 0b01_10_00_00.
    let bytes = [0x00, 0x20, 0b0110_0000, 0x05, 0x0A];
    let program = decode_program(&bytes).unwrap();

    assert_eq!(
        program,
        vec![Instruction::with_operands(
            Opcode::Mov,
            0,
            vec![Operand::direct(0x05), Operand::immediate(0x0A)],
        )]
    );
}

#[test]
fn operands_stop_at_the_first_none_field() {
    // Mode byte 0b11_00_11_00: only the first field counts; the third is
    // unreachable behind the none field.
    let bytes = [0x00, 0x02, 0b1100_1100, 0x02];
    let program = decode_program(&bytes).unwrap();

    assert_eq!(program[0].operands, vec![Operand::register(0x02)]);
}

#[test]
fn decodes_a_full_four_operand_record() {
    let bytes = [0x07, 0x0A, 0b0110_1011, 0x01, 0x02, 0x03, 0x04];
    let program = decode_program(&bytes).unwrap();

    assert_eq!(
        program[0].operands,
        vec![
            Operand::direct(0x01),
            Operand::immediate(0x02),
            Operand::immediate(0x03),
            Operand::register(0x04),
        ]
    );
    assert_eq!(program[0].address, 0x07);
}

#[test]
fn truncated_after_address_byte_is_an_error() {
    assert_eq!(
        decode_program(&[0x00]),
        Err(CodecError::TruncatedRecord { offset: 1 })
    );
}

#[test]
fn truncated_before_mode_byte_is_an_error() {
    assert_eq!(
        decode_program(&[0x00, 0x20]),
        Err(CodecError::TruncatedRecord { offset: 2 })
    );
}

#[test]
fn truncated_operand_value_is_an_error() {
    // Mode byte promises two operands, stream carries one value byte.
    assert_eq!(
        decode_program(&[0x00, 0x20, 0b0101_0000, 0x01]),
        Err(CodecError::TruncatedRecord { offset: 4 })
    );
}

#[test]
fn unknown_opcode_byte_is_an_error() {
    assert_eq!(
        decode_program(&[0x00, 0xFF]),
        Err(CodecError::UnknownOpcode {
            code: 0xFF,
            offset: 1
        })
    );
}

#[test]
fn reserved_opcodes_decode() {
    let bytes = [0x00, 0x0C, 0b1111_0000, 0x00, 0x01]; // MUL R00, R01
    let program = decode_program(&bytes).unwrap();
    assert_eq!(program[0].opcode, Opcode::Mul);
}

#[test]
fn encode_emits_the_documented_layout() {
    let program = vec![
        Instruction::with_operands(
            Opcode::Mov,
            0,
            vec![Operand::direct(0x05), Operand::immediate(0x0A)],
        ),
        Instruction::new(Opcode::Hlt, 5),
    ];

    assert_eq!(
        encode_program(&program),
        vec![0x00, 0x20, 0b0110_0000, 0x05, 0x0A, 0x05, 0x01]
    );
}

#[test]
fn encode_of_an_operand_less_mov_still_carries_the_mode_byte() {
    let program = vec![Instruction::new(Opcode::Mov, 0)];
    let bytes = encode_program(&program);

    assert_eq!(bytes, vec![0x00, 0x20, 0x00]);
    assert_eq!(decode_program(&bytes).unwrap(), program);
}

#[test]
fn round_trips_every_mode_for_single_operand_records() {
    for mode in [
        AddressingMode::Direct,
        AddressingMode::Immediate,
        AddressingMode::Register,
    ] {
        let program = vec![Instruction::with_operands(
            Opcode::Inc,
            3,
            vec![Operand::new(mode, 0x7F)],
        )];
        let decoded = decode_program(&encode_program(&program)).unwrap();
        assert_eq!(decoded, program);
    }
}
