//! Listing-format rendering tests.

use aulsim_core::isa::instruction::Instruction;
use aulsim_core::isa::opcode::Opcode;
use aulsim_core::isa::operand::Operand;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(Operand::direct(0x05), "$05")]
#[case(Operand::immediate(0x0A), ".0a")]
#[case(Operand::register(0x02), "R02")]
#[case(Operand::direct(0xFF), "$ff")]
fn operands_render_with_mode_sigils(#[case] operand: Operand, #[case] expected: &str) {
    assert_eq!(operand.to_string(), expected);
}

#[test]
fn operand_less_instructions_render_as_the_bare_mnemonic() {
    assert_eq!(Instruction::new(Opcode::Hlt, 0).to_string(), "HLT");
    assert_eq!(Instruction::new(Opcode::Nop, 0).to_string(), "NOP");
}

#[test]
fn one_and_two_operand_instructions_render_comma_separated() {
    let inc = Instruction::with_operands(Opcode::Inc, 0, vec![Operand::register(0x00)]);
    assert_eq!(inc.to_string(), "INC R00");

    let mov = Instruction::with_operands(
        Opcode::Mov,
        0,
        vec![Operand::direct(0x05), Operand::immediate(0x0A)],
    );
    assert_eq!(mov.to_string(), "MOV $05, .0a");
}

#[test]
fn three_operand_instructions_render_with_the_destination_arrow() {
    let add = Instruction::with_operands(
        Opcode::Add,
        0,
        vec![
            Operand::direct(0x10),
            Operand::direct(0x14),
            Operand::immediate(0x02),
        ],
    );
    assert_eq!(add.to_string(), "ADD $10 <- $14, .02");
}

#[rstest]
#[case(Opcode::Mov4, "MOV4")]
#[case(Opcode::Add1, "ADD1")]
#[case(Opcode::Cmp, "CMP")]
#[case(Opcode::Jae, "JAE")]
#[case(Opcode::In, "IN")]
#[case(Opcode::Out, "OUT")]
fn mnemonics_match_the_listing_names(#[case] opcode: Opcode, #[case] expected: &str) {
    assert_eq!(opcode.to_string(), expected);
}
