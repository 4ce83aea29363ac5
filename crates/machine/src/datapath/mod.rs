//! The wired machine datapath.
//!
//! Composes the leaves into one machine: nine bus-visible registers, the
//! shared bus, the ALU, sparse data memory driven by the DP/DR register pair,
//! and the I/O port table. The control unit drives everything through the
//! register-transfer primitives exposed here:
//! 1. **`transfer`:** the atomic open-signals/bus-transfer/close-signals move.
//! 2. **`read_mem` / `write_mem`:** single-word memory access through DP/DR.
//! 3. **`alu_compute`:** one ALU invocation over INL/INR/OUT.
//! 4. **`io_in` / `io_out`:** port access through the shared IOR register.

/// Arithmetic/logic unit and status flags.
pub mod alu;
/// Shared tri-state bus.
pub mod bus;
/// Port-mapped I/O devices.
pub mod io;
/// Sparse data memory.
pub mod memory;
/// Registers and the register file.
pub mod register;

pub use alu::{Alu, AluOp, FlagMask, Flags};
pub use bus::Bus;
pub use io::{IoDevice, IoKind, PortMap};
pub use memory::Memory;
pub use register::{RegId, Register, RegisterFile};

use crate::config::MachineConfig;

/// The complete datapath: registers, bus, ALU, memory, and ports.
///
/// Constructed once per simulation run and exclusively owned by one control
/// unit; nothing is shared across runs.
#[derive(Debug, Clone)]
pub struct DataPath {
    regs: RegisterFile,
    bus: Bus,
    alu: Alu,
    memory: Memory,
    ports: PortMap,
    output_port: u8,
}

impl DataPath {
    /// Wires a datapath from the configuration, an initial memory image, and
    /// the preset input sequence for the source device.
    pub fn new(config: &MachineConfig, memory_image: &[u8], input: &str) -> Self {
        let bits = config.word_bits;
        let regs = RegisterFile::new(bits);

        // Bus registration order decides which register wins arbitration if a
        // caller ever opens two outputs; keep OUT first.
        let bus = Bus::new(vec![
            RegId::Out,
            RegId::Ac,
            RegId::Br,
            RegId::R0,
            RegId::Dr,
            RegId::Dp,
            RegId::Ior,
            RegId::Inl,
            RegId::Inr,
        ]);

        let mut memory = Memory::new();
        memory.fill(memory_image);

        let mut ports = PortMap::new();
        ports.attach(config.input_port, IoDevice::source("stdin", bits, input));
        ports.attach(config.output_port, IoDevice::sink("stdout", bits));

        Self {
            regs,
            bus,
            alu: Alu::new(bits),
            memory,
            ports,
            output_port: config.output_port,
        }
    }

    /// Atomic register transfer: open the source's output and every
    /// destination's input, perform one bus transfer, close all signals.
    pub fn transfer(&mut self, src: RegId, dsts: &[RegId]) {
        self.regs.reg_mut(src).open_out();
        for &dst in dsts {
            self.regs.reg_mut(dst).open_in();
        }

        self.bus.transfer(&mut self.regs);

        self.regs.reg_mut(src).close_out();
        for &dst in dsts {
            self.regs.reg_mut(dst).close_in();
        }
    }

    /// Loads `dst` with the memory word addressed by `addr_src`.
    ///
    /// Routes the address through DP, raises the memory read signal, then
    /// moves DR to `dst`.
    pub fn read_mem(&mut self, addr_src: RegId, dst: RegId) {
        self.transfer(addr_src, &[RegId::Dp]);
        self.memory.read(&mut self.regs);
        self.transfer(RegId::Dr, &[dst]);
    }

    /// Stores the value of `data_src` at the memory word addressed by
    /// `addr_src`, through the DP/DR pair.
    pub fn write_mem(&mut self, addr_src: RegId, data_src: RegId) {
        self.transfer(addr_src, &[RegId::Dp]);
        self.transfer(data_src, &[RegId::Dr]);
        self.memory.write(&self.regs);
    }

    /// One ALU invocation over INL/INR, writing OUT.
    pub fn alu_compute(&mut self, op: AluOp, mask: FlagMask) {
        self.alu.compute(op, &mut self.regs, mask);
    }

    /// IN: device register → IOR, then the device's post-access hook.
    ///
    /// Returns `false` if no device is mapped at `port`.
    pub fn io_in(&mut self, port: u8) -> bool {
        let Some(device) = self.ports.device_mut(port) else {
            return false;
        };
        let value = device.register().get();
        self.regs.set(RegId::Ior, value);
        device.after_access();
        true
    }

    /// OUT: IOR → device register, then the device's post-access hook.
    ///
    /// Returns `false` if no device is mapped at `port`.
    pub fn io_out(&mut self, port: u8) -> bool {
        let value = self.regs.get(RegId::Ior);
        let Some(device) = self.ports.device_mut(port) else {
            return false;
        };
        device.register_mut().set(value);
        device.after_access();
        true
    }

    /// Reads a register's value.
    pub fn get(&self, id: RegId) -> u64 {
        self.regs.get(id)
    }

    /// Writes a register's value directly (control-unit immediate loads).
    pub fn set(&mut self, id: RegId, value: u64) {
        self.regs.set(id, value);
    }

    /// Immutable access to the register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Current ALU flags.
    pub fn flags(&self) -> Flags {
        self.alu.flags()
    }

    /// Mutable access to the ALU (flag clearing before carry chains).
    pub fn alu_mut(&mut self) -> &mut Alu {
        &mut self.alu
    }

    /// Direct memory inspection (testing and diagnostics).
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The port table.
    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    /// The output accumulated by the sink device so far.
    pub fn output(&self) -> String {
        self.ports
            .device(self.output_port)
            .map(|device| device.log().to_owned())
            .unwrap_or_default()
    }

    /// One-line state dump: every bus register (sorted by name) plus the
    /// flags, as emitted by the per-step trace.
    pub fn state_line(&self) -> String {
        let mut cells: Vec<String> = self
            .bus
            .members()
            .iter()
            .map(|&id| self.regs.reg(id).to_string())
            .collect();
        cells.sort();
        cells.push(self.alu.flags().to_string());
        cells.join(" | ")
    }
}
