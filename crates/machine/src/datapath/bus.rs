//! Shared tri-state bus.
//!
//! A single value channel connecting a fixed set of registers. Correctness
//! depends on callers asserting exactly one driver per transfer; the bus does
//! not check for multiple drivers, exactly like the hardware it models.

use super::register::{RegId, RegisterFile};

/// Shared bus over a fixed membership of registers.
///
/// Membership and its order are fixed at construction. The `value` field is
/// only the last driven value, kept for debugging; no state carries between
/// transfers.
#[derive(Debug, Clone)]
pub struct Bus {
    members: Vec<RegId>,
    value: u64,
}

impl Bus {
    /// Creates a bus over `members`, scanned in the given registration order.
    pub fn new(members: Vec<RegId>) -> Self {
        Self { members, value: 0 }
    }

    /// Performs one transfer.
    ///
    /// The first member (in registration order) with its output signal open
    /// drives the bus; if no register drives, the call is a no-op and nothing
    /// is assigned. Every member with its input signal open then latches the
    /// driven value, in registration order (fan-out broadcast).
    pub fn transfer(&mut self, regs: &mut RegisterFile) {
        let Some(value) = self
            .members
            .iter()
            .find(|&&id| regs.reg(id).is_output_open())
            .map(|&id| regs.get(id))
        else {
            return;
        };
        self.value = value;

        for &id in &self.members {
            if regs.reg(id).is_input_open() {
                regs.set(id, value);
            }
        }
    }

    /// The value driven by the most recent transfer (debugging aid).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The bus membership, in registration order.
    pub fn members(&self) -> &[RegId] {
        &self.members
    }
}
