//! A CHIP-8 virtual machine: fetch/decode/execute over 4KiB of memory, a
//! 64x32 monochrome display, a 16 key hex keypad and two 60Hz timers.
//!
//! Rendering, audio and keyboard handling belong to the host; see the
//! `display` and `chip8` workspace members for an SDL2 one.

pub use chip8::{Chip8, Chip8Builder};
pub use cycle::{CycleResult, RunState, Snapshot};
pub use display::FrameBuffer;
pub use error::EmulationError;
pub use instruction::Instruction;
pub use quirks::{Quirks, ShiftSource, SpriteEdges};
pub use trace::{LogSink, NullSink, TraceSink};

mod chip8;
pub mod constants;
mod cycle;
pub mod display;
mod error;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
mod quirks;
pub mod registers;
mod state;
pub mod timers;
mod trace;
