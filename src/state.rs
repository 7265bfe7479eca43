use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::display::Display;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::quirks::Quirks;
use crate::registers::Registers;
use crate::timers::Timers;

/// # State
/// Everything an instruction can read or mutate, owned in one place and
/// handed to each operation by exclusive reference.
///
/// ## CPU
/// - `registers` V0..VF, I, the program counter and the call stack
/// - `timers` the 60Hz delay and sound timers
///
/// ## Memory
/// - 4096 bytes with the sprite sheet at 0x000 and programs at 0x200
///
/// ## I/O
/// - `display` the 64x32 frame buffer
/// - `keypad` the pressed status of keys 0..F
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub display: Display,
    pub keypad: Keypad,
    pub timers: Timers,
    pub quirks: Quirks,
    pub(crate) rng: StdRng,
}

impl State {
    pub fn new(quirks: Quirks, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            timers: Timers::new(),
            quirks,
            rng,
        }
    }
}
