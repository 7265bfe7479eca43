use std::fmt;

use crate::constants::REGISTER_COUNT;

/// Where the dispatcher is in its fetch/decode/execute loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Fetching and executing instructions
    #[default]
    Running,
    /// Suspended on FX0A until a key is pressed; the key goes into V`register`
    WaitingForKey { register: u8 },
    /// Stopped by a fatal error. Only `reset` leaves this state.
    Halted,
}

/// The parts of the machine worth showing in a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u16,
    pub v: [u8; REGISTER_COUNT],
}

/// What a single `step` did.
///
/// Purely diagnostic: built fresh every cycle and handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleResult {
    pub opcode: u16,
    /// Opcode pattern, e.g. `0x8XY4`
    pub category: &'static str,
    /// C-like pseudo-code, e.g. `V1 += V2`
    pub pseudo: String,
    pub before: Snapshot,
    pub after: Snapshot,
    /// Dispatcher state once the cycle finished
    pub state: RunState,
}

impl fmt::Display for CycleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:03X}> (0x{:04X}) {:<24} v{:02X?}",
            self.before.pc, self.opcode, self.pseudo, self.after.v
        )?;
        if let RunState::WaitingForKey { .. } = self.state {
            write!(f, " [waiting for key]")?;
        }
        Ok(())
    }
}
