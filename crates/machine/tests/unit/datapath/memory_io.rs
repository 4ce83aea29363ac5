//! Memory and I/O device tests.

use aulsim_core::datapath::{IoDevice, Memory, RegId, RegisterFile};
use pretty_assertions::assert_eq;

#[test]
fn unwritten_cells_read_as_zero() {
    let memory = Memory::new();
    let mut regs = RegisterFile::new(8);
    regs.set(RegId::Dp, 0x42);
    regs.set(RegId::Dr, 0xFF);

    memory.read(&mut regs);

    assert_eq!(regs.get(RegId::Dr), 0);
    assert_eq!(memory.peek(0x42), 0);
}

#[test]
fn write_then_read_through_the_register_pair() {
    let mut memory = Memory::new();
    let mut regs = RegisterFile::new(8);

    regs.set(RegId::Dp, 0x10);
    regs.set(RegId::Dr, 0x99);
    memory.write(&regs);

    regs.set(RegId::Dr, 0);
    memory.read(&mut regs);
    assert_eq!(regs.get(RegId::Dr), 0x99);
}

#[test]
fn fill_loads_the_image_at_ascending_addresses() {
    let mut memory = Memory::new();
    memory.fill(&[10, 20, 30]);

    assert_eq!(memory.peek(0), 10);
    assert_eq!(memory.peek(1), 20);
    assert_eq!(memory.peek(2), 30);
    assert_eq!(memory.peek(3), 0);
}

#[test]
fn source_preloads_the_first_character_at_construction() {
    let device = IoDevice::source("stdin", 8, "ab");
    assert_eq!(device.register().get(), u64::from(b'a'));
}

#[test]
fn source_advances_on_each_access_then_sticks_at_zero() {
    let mut device = IoDevice::source("stdin", 8, "ab");

    device.after_access();
    assert_eq!(device.register().get(), u64::from(b'b'));

    device.after_access();
    assert_eq!(device.register().get(), 0);

    // Exhaustion is terminal: further accesses keep yielding zero.
    device.after_access();
    device.after_access();
    assert_eq!(device.register().get(), 0);
}

#[test]
fn empty_source_yields_zero_from_the_start() {
    let device = IoDevice::source("stdin", 8, "");
    assert_eq!(device.register().get(), 0);
}

#[test]
fn sink_appends_the_character_for_each_presented_value() {
    let mut device = IoDevice::sink("stdout", 8);

    device.register_mut().set(u64::from(b'H'));
    device.after_access();
    device.register_mut().set(u64::from(b'i'));
    device.after_access();

    assert_eq!(device.log(), "Hi");
}
