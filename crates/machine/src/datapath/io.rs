//! Port-mapped I/O devices.
//!
//! The port set is closed and small, so devices are a tagged variant rather
//! than an open-ended trait: a *source* yields a preset character sequence
//! (then sticky zeros), a *sink* accumulates everything presented to it. Each
//! device owns one register off the bus; IN/OUT copy between that register
//! and the shared IOR register, then fire the device's post-access hook.

use std::collections::BTreeMap;

use super::register::Register;

/// Behavior payload of an I/O device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoKind {
    /// Input stream: a preset character sequence and a cursor.
    Source {
        /// The preset input, in order.
        data: Vec<char>,
        /// Next character to present; saturates at `data.len()`.
        cursor: usize,
    },
    /// Output sink: unbounded log of every value presented, as characters.
    Sink {
        /// Accumulated output.
        log: String,
    },
}

/// One port-mapped device: a register plus its behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoDevice {
    register: Register,
    kind: IoKind,
}

impl IoDevice {
    /// Creates a source device over `input`.
    ///
    /// The hook runs once at construction so the device register already
    /// holds the first character before the program's first IN.
    pub fn source(name: &'static str, bits: u32, input: &str) -> Self {
        let mut device = Self {
            register: Register::new(name, bits),
            kind: IoKind::Source {
                data: input.chars().collect(),
                cursor: 0,
            },
        };
        device.after_access();
        device
    }

    /// Creates a sink device with an empty log.
    pub fn sink(name: &'static str, bits: u32) -> Self {
        Self {
            register: Register::new(name, bits),
            kind: IoKind::Sink { log: String::new() },
        }
    }

    /// The device register.
    pub fn register(&self) -> &Register {
        &self.register
    }

    /// Mutable access to the device register.
    pub fn register_mut(&mut self) -> &mut Register {
        &mut self.register
    }

    /// Post-transfer side effect.
    ///
    /// Source: load the character at the cursor (as its code point, truncated
    /// to the register width) and advance; once the input is exhausted the
    /// register is pinned to zero and the cursor stops — terminal and sticky.
    /// Sink: append the character for the current register value to the log.
    pub fn after_access(&mut self) {
        match &mut self.kind {
            IoKind::Source { data, cursor } => {
                if *cursor >= data.len() {
                    self.register.set(0);
                } else {
                    self.register.set(u64::from(data[*cursor] as u32));
                    *cursor += 1;
                }
            }
            IoKind::Sink { log } => {
                // Register values fit the word width, so the cast to a code
                // point cannot produce a surrogate.
                if let Some(ch) = char::from_u32(self.register.get() as u32) {
                    log.push(ch);
                }
            }
        }
    }

    /// The accumulated output of a sink; empty for a source.
    pub fn log(&self) -> &str {
        match &self.kind {
            IoKind::Sink { log } => log,
            IoKind::Source { .. } => "",
        }
    }
}

/// Fixed mapping from port numbers to devices.
#[derive(Debug, Clone, Default)]
pub struct PortMap {
    devices: BTreeMap<u8, IoDevice>,
}

impl PortMap {
    /// Creates an empty port table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `port` to `device`, replacing any previous mapping.
    pub fn attach(&mut self, port: u8, device: IoDevice) {
        let _ = self.devices.insert(port, device);
    }

    /// The device behind `port`, if any.
    pub fn device(&self, port: u8) -> Option<&IoDevice> {
        self.devices.get(&port)
    }

    /// Mutable access to the device behind `port`, if any.
    pub fn device_mut(&mut self, port: u8) -> Option<&mut IoDevice> {
        self.devices.get_mut(&port)
    }
}
