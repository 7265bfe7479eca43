use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::constants::{MAX_PC, PROGRAM_START};
use crate::cycle::{CycleResult, RunState, Snapshot};
use crate::display::{Display, FrameBuffer};
use crate::error::EmulationError;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::operations::{self, Next};
use crate::quirks::Quirks;
use crate::registers::Registers;
use crate::state::State;
use crate::trace::{NullSink, TraceSink};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the machine `state` (memory, registers, display, keypad and timers)
///  - where the dispatcher is in its `RunState`
///  - a pending beep for the host to pick up
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU, which also drives the 60Hz timers
/// - inspecting its frame buffer for rendering by some display
///
/// Every cycle is reported to the `TraceSink` `T`.
pub struct Chip8<T: TraceSink = NullSink> {
    state: State,
    run_state: RunState,
    beep: bool,
    beep_sender: Option<SyncSender<()>>,
    trace: T,
}

/// Configures a `Chip8` before it is built
pub struct Chip8Builder<T: TraceSink = NullSink> {
    quirks: Quirks,
    seed: Option<u64>,
    trace: T,
}

impl Chip8Builder<NullSink> {
    fn new() -> Self {
        Chip8Builder {
            quirks: Quirks::default(),
            seed: None,
            trace: NullSink,
        }
    }
}

impl<T: TraceSink> Chip8Builder<T> {
    pub fn quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Seed CXNN's random number generator so runs are reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn trace<U: TraceSink>(self, trace: U) -> Chip8Builder<U> {
        Chip8Builder {
            quirks: self.quirks,
            seed: self.seed,
            trace,
        }
    }

    pub fn build(self) -> Chip8<T> {
        Chip8 {
            state: State::new(self.quirks, self.seed),
            run_state: RunState::Running,
            beep: false,
            beep_sender: None,
            trace: self.trace,
        }
    }
}

impl Chip8 {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> Chip8Builder {
        Chip8Builder::new()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TraceSink> Chip8<T> {
    /// Load a rom into memory at 0x200 and point the program counter at it.
    ///
    /// Only the program region and the program counter are reinitialised.
    /// A halted machine stays halted until `reset`.
    ///
    /// # Arguments
    /// * `rom` raw Chip-8 machine code, at most 3584 bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), EmulationError> {
        self.state.memory.load_rom(rom)?;
        self.state.registers.set_pc(PROGRAM_START);
        if let RunState::WaitingForKey { .. } = self.run_state {
            self.run_state = RunState::Running;
        }
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Return to the power-on state: registers, stack, display, keypad and
    /// timers cleared, the program region zeroed and the font in place.
    /// Quirks, the random number generator and the trace sink are kept.
    pub fn reset(&mut self) {
        self.state.memory = Memory::new();
        self.state.registers = Registers::new();
        self.state.display = Display::new();
        self.state.keypad.release_all();
        self.state.timers.delay = 0;
        self.state.timers.sound = 0;
        self.state.timers.restart();
        self.run_state = RunState::Running;
        self.beep = false;
        debug!("machine reset");
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the keypad key 0x0..=0xF
    /// * `pressed` whether it is down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if !self.state.keypad.set(key, pressed) {
            warn!("ignoring key {:#X}; the keypad only has keys 0x0..=0xF", key);
        }
    }

    /// Runs one cycle, using the current time to drive the timers
    pub fn step(&mut self) -> Result<CycleResult, EmulationError> {
        self.step_at(Instant::now())
    }

    /// Runs one cycle as if the wall clock read `now`.
    /// - ticks the 60Hz timers if a period has elapsed
    /// - while waiting for a key, resumes if one is pressed and otherwise does nothing
    /// - otherwise fetches, decodes and executes the opcode at the pc
    ///
    /// Any error other than `Halted` halts the machine.
    pub fn step_at(&mut self, now: Instant) -> Result<CycleResult, EmulationError> {
        let pc = self.state.registers.pc();
        if self.run_state == RunState::Halted {
            return Err(EmulationError::Halted { pc });
        }

        if self.state.timers.tick(now) {
            self.raise_beep();
        }

        let before = self.snapshot();
        let (opcode, instruction) = match self.run_state {
            RunState::WaitingForKey { register } => {
                self.resume_on_key(register);
                (self.state.memory.read_word(pc), Instruction::WaitKey { x: register })
            }
            _ => self.execute_next().map_err(|e| self.halt(e))?,
        };

        let result = CycleResult {
            opcode,
            category: instruction.category(),
            pseudo: instruction.to_string(),
            before,
            after: self.snapshot(),
            state: self.run_state,
        };
        self.trace.record(&result);
        Ok(result)
    }

    /// Fetch, decode and execute the opcode at the pc
    fn execute_next(&mut self) -> Result<(u16, Instruction), EmulationError> {
        let pc = self.state.registers.pc();
        if pc > MAX_PC {
            return Err(EmulationError::ProgramCounterOutOfBounds { pc });
        }
        let opcode = self.state.memory.read_word(pc);
        let instruction =
            Instruction::decode(opcode).ok_or(EmulationError::UnknownOpcode { pc, opcode })?;

        match operations::execute(instruction, &mut self.state)? {
            Next::Advance => self.state.registers.set_pc(pc.wrapping_add(0x2)),
            Next::Skip => self.state.registers.set_pc(pc.wrapping_add(0x4)),
            Next::Jump(address) => self.state.registers.set_pc(address),
            Next::WaitForKey(register) => self.run_state = RunState::WaitingForKey { register },
        }
        Ok((opcode, instruction))
    }

    /// Takes the lowest pressed key, if any, and continues past FX0A
    fn resume_on_key(&mut self, register: u8) {
        if let Some(key) = self.state.keypad.consume_any() {
            self.state.registers.set_v(register, key);
            let pc = self.state.registers.pc();
            self.state.registers.set_pc(pc.wrapping_add(0x2));
            self.run_state = RunState::Running;
        }
    }

    fn halt(&mut self, error: EmulationError) -> EmulationError {
        error!("halting: {}", error);
        self.run_state = RunState::Halted;
        error
    }

    fn raise_beep(&mut self) {
        self.beep = true;
        if let Some(sender) = &self.beep_sender {
            match sender.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Disconnected(())) => self.beep_sender = None,
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.state.registers.pc(),
            v: self.state.registers.v_all(),
        }
    }

    /// Returns the FrameBuffer if the display should be redrawn, lowering the
    /// redraw flag
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.display.take_redraw() {
            Some(self.state.display.frame_buffer())
        } else {
            None
        }
    }

    /// A copy of the frame buffer, whether or not it changed
    pub fn frame_buffer(&self) -> FrameBuffer {
        self.state.display.frame_buffer()
    }

    /// Whether the screen changed since the last call
    pub fn needs_redraw(&mut self) -> bool {
        self.state.display.take_redraw()
    }

    /// True once for every time the sound timer ran down from 1 to 0
    pub fn poll_beep(&mut self) -> bool {
        std::mem::take(&mut self.beep)
    }

    /// A channel that receives `()` whenever the sound timer runs down.
    ///
    /// Sending never blocks the dispatcher: a beep that arrives while the
    /// previous one is still unread is dropped. Subscribing again replaces
    /// the previous channel.
    pub fn subscribe_beep(&mut self) -> Receiver<()> {
        let (sender, receiver) = mpsc::sync_channel(1);
        self.beep_sender = Some(sender);
        receiver
    }

    /// Whether the sound timer is still counting down
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound > 0
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.state.keypad.is_pressed(key)
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn quirks(&self) -> Quirks {
        self.state.quirks
    }

    pub fn trace_sink(&self) -> &T {
        &self.trace
    }

    pub fn trace_sink_mut(&mut self) -> &mut T {
        &mut self.trace
    }
}
