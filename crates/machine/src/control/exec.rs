//! Per-opcode register-transfer sequences.
//!
//! Each executor translates one instruction into the exact ordered sequence
//! of bus transfers, memory signals, and ALU invocations the machine
//! performs, then answers with a [`ControlTransfer`]. The multi-limb
//! sequences (MOV4, ADD, the memory form of CMP) lean on two conventions:
//! limbs are stored least-significant-first, and address stepping goes
//! through the ALU's increment/decrement operations, whose forced NZV mask
//! leaves the carry chain intact between limbs.

use crate::common::constants::LIMB_COUNT;
use crate::common::error::MachineError;
use crate::datapath::{AluOp, DataPath, FlagMask, RegId};
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;
use crate::isa::operand::{AddressingMode, Operand};

use super::ControlTransfer;

/// Maps a register-direct operand byte to a datapath register.
///
/// The program-visible register map is fixed: 0 = AC, 1 = BR, 2 = R0,
/// 3 = IOR.
fn register_by_index(index: u8, address: u8) -> Result<RegId, MachineError> {
    match index {
        0 => Ok(RegId::Ac),
        1 => Ok(RegId::Br),
        2 => Ok(RegId::R0),
        3 => Ok(RegId::Ior),
        _ => Err(MachineError::UnknownRegister { index, address }),
    }
}

/// Resolves an operand that must be register-direct.
fn register_operand(
    operand: Operand,
    instruction: &Instruction,
) -> Result<RegId, MachineError> {
    if operand.mode != AddressingMode::Register {
        return Err(unsupported(instruction));
    }
    register_by_index(operand.value, instruction.address)
}

/// Resolves an operand that must be immediate, yielding its literal byte.
fn immediate_operand(operand: Operand, instruction: &Instruction) -> Result<u8, MachineError> {
    if operand.mode != AddressingMode::Immediate {
        return Err(unsupported(instruction));
    }
    Ok(operand.value)
}

fn unsupported(instruction: &Instruction) -> MachineError {
    MachineError::UnsupportedOperands {
        opcode: instruction.opcode,
        address: instruction.address,
    }
}

/// Steps an address register forward by one through the ALU.
///
/// INCR forces the NZV mask, so the carry flag of an in-flight limb chain
/// survives the address bump.
fn step_address_up(dp: &mut DataPath, reg: RegId) {
    dp.transfer(reg, &[RegId::Inr]);
    dp.alu_compute(AluOp::IncRight, FlagMask::ALL);
    dp.transfer(RegId::Out, &[reg]);
}

/// Steps an address register back by one through the ALU.
fn step_address_down(dp: &mut DataPath, reg: RegId) {
    dp.transfer(reg, &[RegId::Inr]);
    dp.alu_compute(AluOp::DecRight, FlagMask::ALL);
    dp.transfer(RegId::Out, &[reg]);
}

/// Dispatches one instruction to its executor.
pub(super) fn execute(
    dp: &mut DataPath,
    instruction: &Instruction,
) -> Result<ControlTransfer, MachineError> {
    match instruction.opcode {
        Opcode::Nop => Ok(ControlTransfer::Advance),
        Opcode::Hlt => Ok(ControlTransfer::Halt),
        Opcode::Mov => mov(dp, instruction),
        Opcode::Mov4 => mov4(dp, instruction),
        Opcode::Add1 => add1(dp, instruction),
        Opcode::Add => add(dp, instruction),
        Opcode::Sub => sub(dp, instruction),
        Opcode::Cmp => cmp(dp, instruction),
        Opcode::Shl => shift(dp, instruction, AluOp::Shl),
        Opcode::Shr => shift(dp, instruction, AluOp::Shr),
        Opcode::Inc => inc_dec(dp, instruction, AluOp::IncLeft),
        Opcode::Dec => inc_dec(dp, instruction, AluOp::DecLeft),
        Opcode::Ld => load(dp, instruction),
        Opcode::St => store(dp, instruction),
        Opcode::In => port_in(dp, instruction),
        Opcode::Out => port_out(dp, instruction),
        Opcode::Jmp => jump(dp, instruction, |_| true),
        Opcode::Je => jump(dp, instruction, |dp| dp.flags().z == 1),
        Opcode::Jne => jump(dp, instruction, |dp| dp.flags().z == 0),
        Opcode::Jae => jump(dp, instruction, |dp| dp.flags().n == 0),
        Opcode::Or
        | Opcode::And
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Sub1
        | Opcode::Ja
        | Opcode::Jb
        | Opcode::Jbe => Err(MachineError::UnsupportedOpcode {
            opcode: instruction.opcode,
            address: instruction.address,
        }),
    }
}

/// MOV: single-byte move, routed through AC (source side) and BR
/// (destination address side).
fn mov(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = instruction.operand(0)?;
    let src = instruction.operand(1)?;

    match src.mode {
        AddressingMode::Immediate => dp.set(RegId::Ac, u64::from(src.value)),
        AddressingMode::Direct => {
            dp.set(RegId::Ac, u64::from(src.value));
            dp.read_mem(RegId::Ac, RegId::Ac);
        }
        AddressingMode::Register => return Err(unsupported(instruction)),
    }

    match dst.mode {
        // An immediate destination is treated as an immediate-addressed
        // memory cell, same routing as memory-direct.
        AddressingMode::Immediate | AddressingMode::Direct => {
            dp.set(RegId::Br, u64::from(dst.value));
            dp.write_mem(RegId::Br, RegId::Ac);
        }
        AddressingMode::Register => {
            let reg = register_by_index(dst.value, instruction.address)?;
            dp.transfer(RegId::Ac, &[reg]);
        }
    }

    Ok(ControlTransfer::Advance)
}

/// MOV4: 32-bit move into a memory block, from an immediate (low byte plus
/// three zero limbs) or another memory block.
fn mov4(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = instruction.operand(0)?;
    let src = instruction.operand(1)?;

    if dst.mode != AddressingMode::Direct {
        return Err(unsupported(instruction));
    }

    match src.mode {
        AddressingMode::Immediate => {
            dp.set(RegId::Ac, u64::from(src.value));
            dp.set(RegId::Br, u64::from(dst.value));
            dp.write_mem(RegId::Br, RegId::Ac);

            // Remaining limbs are zero-filled.
            dp.set(RegId::Ac, 0);
            for _ in 1..LIMB_COUNT {
                step_address_up(dp, RegId::Br);
                dp.write_mem(RegId::Br, RegId::Ac);
            }
        }
        AddressingMode::Direct => {
            dp.set(RegId::Ac, u64::from(src.value));
            dp.transfer(RegId::Ac, &[RegId::R0]);
            dp.set(RegId::Br, u64::from(dst.value));

            for _ in 0..LIMB_COUNT {
                dp.read_mem(RegId::R0, RegId::Ac);
                dp.write_mem(RegId::Br, RegId::Ac);
                step_address_up(dp, RegId::R0);
                step_address_up(dp, RegId::Br);
            }
        }
        AddressingMode::Register => return Err(unsupported(instruction)),
    }

    Ok(ControlTransfer::Advance)
}

/// ADD1: single-byte `register += immediate` with the carry pre-cleared.
///
/// The destination register doubles as the staging cell for the immediate on
/// its way to INR before the result overwrites it.
fn add1(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = register_operand(instruction.operand(0)?, instruction)?;
    let value = immediate_operand(instruction.operand(1)?, instruction)?;

    dp.alu_mut().clear_carry();
    dp.transfer(dst, &[RegId::Inl]);
    dp.set(dst, u64::from(value));
    dp.transfer(dst, &[RegId::Inr]);
    dp.alu_compute(AluOp::Add, FlagMask::ALL);
    dp.transfer(RegId::Out, &[dst]);

    Ok(ControlTransfer::Advance)
}

/// ADD: 32-bit addition into a memory block.
///
/// Four limb additions chained through the carry flag (cleared once up
/// front, never between limbs). An immediate source contributes its byte as
/// the low limb and zeros afterwards instead of walking memory.
fn add(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = instruction.operand(0)?;
    let lhs = instruction.operand(1)?;
    let rhs = instruction.operand(2)?;

    if dst.mode != AddressingMode::Direct {
        return Err(unsupported(instruction));
    }
    let expand_lhs = match lhs.mode {
        AddressingMode::Immediate => true,
        AddressingMode::Direct => false,
        AddressingMode::Register => return Err(unsupported(instruction)),
    };
    let expand_rhs = match rhs.mode {
        AddressingMode::Immediate => true,
        AddressingMode::Direct => false,
        AddressingMode::Register => return Err(unsupported(instruction)),
    };

    dp.alu_mut().clear_carry();
    dp.set(RegId::Ac, u64::from(dst.value));

    dp.set(RegId::Br, u64::from(lhs.value));
    if expand_lhs {
        dp.set(RegId::Inl, u64::from(lhs.value));
    } else {
        dp.read_mem(RegId::Br, RegId::Inl);
    }

    dp.set(RegId::R0, u64::from(rhs.value));
    if expand_rhs {
        dp.set(RegId::Inr, u64::from(rhs.value));
    } else {
        dp.read_mem(RegId::R0, RegId::Inr);
    }

    for _ in 0..LIMB_COUNT {
        dp.alu_compute(AluOp::Add, FlagMask::ALL);
        dp.write_mem(RegId::Ac, RegId::Out);
        step_address_up(dp, RegId::Ac);

        if expand_lhs {
            dp.set(RegId::Inl, 0);
        } else {
            step_address_up(dp, RegId::Br);
            dp.read_mem(RegId::Br, RegId::Inl);
        }

        if expand_rhs {
            dp.set(RegId::Inr, 0);
        } else {
            step_address_up(dp, RegId::R0);
            dp.read_mem(RegId::R0, RegId::Inr);
        }
    }

    Ok(ControlTransfer::Advance)
}

/// SUB: single-limb subtraction into a memory cell.
///
/// Deliberately asymmetric: only an immediate left operand with a
/// memory-direct right operand (low byte only) is implemented. Other
/// combinations are contract violations, not coerced.
fn sub(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = instruction.operand(0)?;
    let lhs = instruction.operand(1)?;
    let rhs = instruction.operand(2)?;

    if dst.mode != AddressingMode::Direct
        || lhs.mode != AddressingMode::Immediate
        || rhs.mode != AddressingMode::Direct
    {
        return Err(unsupported(instruction));
    }

    dp.set(RegId::Ac, u64::from(dst.value));
    dp.set(RegId::Inl, u64::from(lhs.value));
    dp.set(RegId::R0, u64::from(rhs.value));
    dp.read_mem(RegId::R0, RegId::Inr);
    dp.alu_compute(AluOp::Sub, FlagMask::ALL);
    dp.write_mem(RegId::Ac, RegId::Out);

    Ok(ControlTransfer::Advance)
}

/// CMP: flag-only comparison.
///
/// Memory/memory compares two 32-bit blocks from the most significant limb
/// down, stopping at the first unequal limb; register/immediate is a single
/// SUB. Anything else is unsupported.
fn cmp(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let lhs = instruction.operand(0)?;
    let rhs = instruction.operand(1)?;

    match (lhs.mode, rhs.mode) {
        (AddressingMode::Direct, AddressingMode::Direct) => {
            dp.set(RegId::Ac, u64::from(lhs.value));
            dp.set(RegId::Br, u64::from(rhs.value));

            // Point both address registers at the most significant limb.
            for _ in 0..LIMB_COUNT - 1 {
                step_address_up(dp, RegId::Ac);
                step_address_up(dp, RegId::Br);
            }

            for limb in 0..LIMB_COUNT {
                dp.read_mem(RegId::Ac, RegId::Inl);
                dp.read_mem(RegId::Br, RegId::Inr);
                dp.alu_compute(AluOp::Sub, FlagMask::ALL);

                if dp.flags().z == 0 || limb == LIMB_COUNT - 1 {
                    break;
                }
                step_address_down(dp, RegId::Ac);
                step_address_down(dp, RegId::Br);
            }
        }
        (AddressingMode::Register, AddressingMode::Immediate) => {
            let reg = register_by_index(lhs.value, instruction.address)?;
            dp.transfer(reg, &[RegId::Inl]);

            // Stage the immediate in whichever of AC/BR is not the operand.
            if reg == RegId::Ac {
                dp.set(RegId::Br, u64::from(rhs.value));
                dp.transfer(RegId::Br, &[RegId::Inr]);
            } else {
                dp.set(RegId::Ac, u64::from(rhs.value));
                dp.transfer(RegId::Ac, &[RegId::Inr]);
            }
            dp.alu_compute(AluOp::Sub, FlagMask::ALL);
        }
        _ => return Err(unsupported(instruction)),
    }

    Ok(ControlTransfer::Advance)
}

/// SHL/SHR: register-direct operand shifted by an immediate amount; only the
/// carry flag is updated.
fn shift(
    dp: &mut DataPath,
    instruction: &Instruction,
    op: AluOp,
) -> Result<ControlTransfer, MachineError> {
    let reg = register_operand(instruction.operand(0)?, instruction)?;
    let amount = immediate_operand(instruction.operand(1)?, instruction)?;

    dp.transfer(reg, &[RegId::Inl]);
    dp.set(RegId::Ac, u64::from(amount));
    dp.transfer(RegId::Ac, &[RegId::Inr]);
    dp.alu_compute(op, FlagMask::CARRY);
    dp.transfer(RegId::Out, &[reg]);

    Ok(ControlTransfer::Advance)
}

/// INC/DEC: register-direct operand plus or minus one.
fn inc_dec(
    dp: &mut DataPath,
    instruction: &Instruction,
    op: AluOp,
) -> Result<ControlTransfer, MachineError> {
    let reg = register_operand(instruction.operand(0)?, instruction)?;

    dp.transfer(reg, &[RegId::Inl]);
    dp.alu_compute(op, FlagMask::ALL);
    dp.transfer(RegId::Out, &[reg]);

    Ok(ControlTransfer::Advance)
}

/// LD: register-indirect load, `dst ← memory[addr_reg]`.
fn load(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let dst = register_operand(instruction.operand(0)?, instruction)?;
    let addr = register_operand(instruction.operand(1)?, instruction)?;

    dp.read_mem(addr, dst);
    Ok(ControlTransfer::Advance)
}

/// ST: register-indirect store, `memory[addr_reg] ← src`.
fn store(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let addr = register_operand(instruction.operand(0)?, instruction)?;
    let src = register_operand(instruction.operand(1)?, instruction)?;

    dp.write_mem(addr, src);
    Ok(ControlTransfer::Advance)
}

/// IN: device register → IOR through the port table.
fn port_in(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let port = immediate_operand(instruction.operand(0)?, instruction)?;
    if !dp.io_in(port) {
        return Err(MachineError::UnknownPort {
            port,
            address: instruction.address,
        });
    }
    Ok(ControlTransfer::Advance)
}

/// OUT: IOR → device register through the port table.
fn port_out(dp: &mut DataPath, instruction: &Instruction) -> Result<ControlTransfer, MachineError> {
    let port = immediate_operand(instruction.operand(0)?, instruction)?;
    if !dp.io_out(port) {
        return Err(MachineError::UnknownPort {
            port,
            address: instruction.address,
        });
    }
    Ok(ControlTransfer::Advance)
}

/// Conditional and unconditional jumps to an immediate absolute address.
fn jump(
    dp: &mut DataPath,
    instruction: &Instruction,
    taken: impl Fn(&DataPath) -> bool,
) -> Result<ControlTransfer, MachineError> {
    let target = immediate_operand(instruction.operand(0)?, instruction)?;
    if taken(dp) {
        Ok(ControlTransfer::JumpTo(target))
    } else {
        Ok(ControlTransfer::Advance)
    }
}
