//! Jumps, sequencing, and the fatal control-flow errors.

use aulsim_core::MachineError;
use aulsim_core::control::ControlTransfer;
use aulsim_core::control::program::Program;
use aulsim_core::datapath::RegId;
use aulsim_core::isa::instruction::Instruction;
use aulsim_core::isa::opcode::Opcode;
use aulsim_core::isa::operand::Operand;
use pretty_assertions::assert_eq;

use crate::common::harness::{address_of, machine};

#[test]
fn jmp_skips_the_intervening_instruction() {
    let items = [
        (Opcode::Jmp, vec![Operand::immediate(0)]), // patched below
        (
            Opcode::Add1,
            vec![Operand::register(0x02), Operand::immediate(0x01)],
        ),
        (Opcode::Hlt, vec![]),
    ];
    let mut items = items.to_vec();
    items[0].1 = vec![Operand::immediate(address_of(&items, 2))];

    let mut m = machine(&items);
    let report = m.run().unwrap();

    // The skipped ADD1 never ran.
    assert_eq!(m.control_unit().datapath().get(RegId::R0), 0);
    assert_eq!(report.steps, 2);
}

#[test]
fn jmp_to_address_zero_is_a_real_jump() {
    let items = [
        (Opcode::Nop, vec![]),
        (Opcode::Jmp, vec![Operand::immediate(0x00)]),
    ];
    let mut m = machine(&items);

    assert_eq!(m.step().unwrap(), ControlTransfer::Advance);
    assert_eq!(m.step().unwrap(), ControlTransfer::JumpTo(0));
    assert_eq!(m.control_unit().pc(), 0);

    // Back at the NOP: the loop really closed.
    assert_eq!(m.step().unwrap(), ControlTransfer::Advance);
    assert_eq!(m.control_unit().steps(), 3);
}

#[test]
fn je_follows_the_zero_flag() {
    let build = || {
        let items = [
            (Opcode::Je, vec![Operand::immediate(0)]), // patched below
            (
                Opcode::Add1,
                vec![Operand::register(0x02), Operand::immediate(0x01)],
            ),
            (Opcode::Hlt, vec![]),
        ];
        let mut items = items.to_vec();
        items[0].1 = vec![Operand::immediate(address_of(&items, 2))];
        machine(&items)
    };

    // Z = 1: taken, the ADD1 is skipped.
    let mut m = build();
    m.control_unit_mut().datapath_mut().alu_mut().set_zero(1);
    m.run().unwrap();
    assert_eq!(m.control_unit().datapath().get(RegId::R0), 0);

    // Z = 0: falls through into the ADD1.
    let mut m = build();
    m.run().unwrap();
    assert_eq!(m.control_unit().datapath().get(RegId::R0), 1);
}

#[test]
fn jne_is_the_complement_of_je() {
    let items = [
        (Opcode::Jne, vec![Operand::immediate(0)]), // patched below
        (
            Opcode::Add1,
            vec![Operand::register(0x02), Operand::immediate(0x01)],
        ),
        (Opcode::Hlt, vec![]),
    ];
    let mut items = items.to_vec();
    items[0].1 = vec![Operand::immediate(address_of(&items, 2))];

    let mut m = machine(&items);
    m.control_unit_mut().datapath_mut().alu_mut().set_zero(1);
    m.run().unwrap();

    // Z = 1 means "equal", so JNE falls through.
    assert_eq!(m.control_unit().datapath().get(RegId::R0), 1);
}

#[test]
fn jae_follows_the_negative_flag() {
    let items = [
        (Opcode::Jae, vec![Operand::immediate(0)]), // patched below
        (
            Opcode::Add1,
            vec![Operand::register(0x02), Operand::immediate(0x01)],
        ),
        (Opcode::Hlt, vec![]),
    ];
    let mut items = items.to_vec();
    items[0].1 = vec![Operand::immediate(address_of(&items, 2))];

    // N starts at 0 ("above or equal"): taken.
    let mut m = machine(&items);
    m.run().unwrap();
    assert_eq!(m.control_unit().datapath().get(RegId::R0), 0);
}

#[test]
fn jump_target_must_be_immediate() {
    let mut m = machine(&[
        (Opcode::Jmp, vec![Operand::direct(0x00)]),
        (Opcode::Hlt, vec![]),
    ]);

    assert_eq!(
        m.run(),
        Err(MachineError::UnsupportedOperands {
            opcode: Opcode::Jmp,
            address: 0,
        })
    );
}

#[test]
fn jump_into_a_hole_fails_at_the_next_fetch() {
    let mut m = machine(&[
        (Opcode::Jmp, vec![Operand::immediate(0x63)]),
        (Opcode::Hlt, vec![]),
    ]);

    // The jump itself succeeds; the bad target surfaces one step later.
    assert_eq!(m.step().unwrap(), ControlTransfer::JumpTo(0x63));
    assert_eq!(
        m.step(),
        Err(MachineError::MissingInstruction { address: 0x63 })
    );
}

#[test]
fn falling_off_the_end_without_hlt_is_an_error() {
    let mut m = machine(&[(Opcode::Nop, vec![])]);

    assert_eq!(m.step(), Err(MachineError::NoSuccessor { address: 0 }));
}

#[test]
fn stepping_after_halt_stays_halted() {
    let mut m = machine(&[(Opcode::Hlt, vec![])]);

    assert_eq!(m.step().unwrap(), ControlTransfer::Halt);
    assert!(m.control_unit().is_halted());
    assert_eq!(m.control_unit().steps(), 1);

    // Further steps are inert: still Halt, step count frozen.
    assert_eq!(m.step().unwrap(), ControlTransfer::Halt);
    assert_eq!(m.control_unit().steps(), 1);
}

#[test]
fn reserved_opcodes_fail_at_execution() {
    let mut m = machine(&[
        (
            Opcode::Mul,
            vec![Operand::register(0x00), Operand::register(0x01)],
        ),
        (Opcode::Hlt, vec![]),
    ]);

    assert_eq!(
        m.run(),
        Err(MachineError::UnsupportedOpcode {
            opcode: Opcode::Mul,
            address: 0,
        })
    );
}

#[test]
fn program_rejects_non_monotonic_addresses() {
    let error = Program::new(vec![
        Instruction::new(Opcode::Nop, 5),
        Instruction::new(Opcode::Hlt, 2),
    ])
    .unwrap_err();

    assert_eq!(error, MachineError::NonMonotonicAddress { prev: 5, next: 2 });
}

#[test]
fn entry_is_the_first_instruction_regardless_of_its_address() {
    let program = Program::new(vec![
        Instruction::new(Opcode::Nop, 4),
        Instruction::new(Opcode::Hlt, 6),
    ])
    .unwrap();

    assert_eq!(program.entry(), Some(4));
    assert_eq!(program.successor(4), Some(6));
    assert_eq!(program.successor(6), None);
}
