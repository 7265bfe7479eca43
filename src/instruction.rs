use std::fmt;

use crate::opcode::Opcode;

/// A decoded Chip-8 instruction with its operands.
///
/// Decoding is pure; executing an `Instruction` against the machine lives in
/// `operations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump { nnn: u16 },
    /// 2NNN
    Call { nnn: u16 },
    /// 3XNN
    SkipEqImmediate { x: u8, nn: u8 },
    /// 4XNN
    SkipNeImmediate { x: u8, nn: u8 },
    /// 5XY0
    SkipEqRegister { x: u8, y: u8 },
    /// 6XNN
    LoadImmediate { x: u8, nn: u8 },
    /// 7XNN
    AddImmediate { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddRegister { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8, y: u8 },
    /// 8XY7
    SubReverse { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0
    SkipNeRegister { x: u8, y: u8 },
    /// ANNN
    LoadIndex { nnn: u16 },
    /// BNNN
    JumpOffset { nnn: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipKeyPressed { x: u8 },
    /// EXA1
    SkipKeyNotPressed { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddIndex { x: u8 },
    /// FX29
    LoadGlyph { x: u8 },
    /// FX33
    Bcd { x: u8 },
    /// FX55
    StoreRegisters { x: u8 },
    /// FX65
    LoadRegisters { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode, or None if the opcode is
    /// not part of the Chip-8 instruction set.
    ///
    /// Groups 0x5 and 0x9 ignore their last nibble.
    pub fn decode(op: u16) -> Option<Self> {
        let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Self::Clear,
            (0x0, 0x0, 0xE, 0xE) => Self::Return,
            (0x1, ..) => Self::Jump { nnn },
            (0x2, ..) => Self::Call { nnn },
            (0x3, ..) => Self::SkipEqImmediate { x, nn },
            (0x4, ..) => Self::SkipNeImmediate { x, nn },
            (0x5, ..) => Self::SkipEqRegister { x, y },
            (0x6, ..) => Self::LoadImmediate { x, nn },
            (0x7, ..) => Self::AddImmediate { x, nn },
            (0x8, .., 0x0) => Self::Move { x, y },
            (0x8, .., 0x1) => Self::Or { x, y },
            (0x8, .., 0x2) => Self::And { x, y },
            (0x8, .., 0x3) => Self::Xor { x, y },
            (0x8, .., 0x4) => Self::AddRegister { x, y },
            (0x8, .., 0x5) => Self::Sub { x, y },
            (0x8, .., 0x6) => Self::ShiftRight { x, y },
            (0x8, .., 0x7) => Self::SubReverse { x, y },
            (0x8, .., 0xE) => Self::ShiftLeft { x, y },
            (0x9, ..) => Self::SkipNeRegister { x, y },
            (0xA, ..) => Self::LoadIndex { nnn },
            (0xB, ..) => Self::JumpOffset { nnn },
            (0xC, ..) => Self::Random { x, nn },
            (0xD, ..) => Self::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Self::SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => Self::SkipKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => Self::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Self::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Self::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Self::SetSound { x },
            (0xF, _, 0x1, 0xE) => Self::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Self::LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Self::Bcd { x },
            (0xF, _, 0x5, 0x5) => Self::StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => Self::LoadRegisters { x },
            _ => return None,
        };
        Some(instruction)
    }

    /// The opcode pattern this instruction was decoded from, e.g. `0x8XY4`
    pub fn category(&self) -> &'static str {
        match self {
            Self::Clear => "0x00E0",
            Self::Return => "0x00EE",
            Self::Jump { .. } => "0x1NNN",
            Self::Call { .. } => "0x2NNN",
            Self::SkipEqImmediate { .. } => "0x3XNN",
            Self::SkipNeImmediate { .. } => "0x4XNN",
            Self::SkipEqRegister { .. } => "0x5XY0",
            Self::LoadImmediate { .. } => "0x6XNN",
            Self::AddImmediate { .. } => "0x7XNN",
            Self::Move { .. } => "0x8XY0",
            Self::Or { .. } => "0x8XY1",
            Self::And { .. } => "0x8XY2",
            Self::Xor { .. } => "0x8XY3",
            Self::AddRegister { .. } => "0x8XY4",
            Self::Sub { .. } => "0x8XY5",
            Self::ShiftRight { .. } => "0x8XY6",
            Self::SubReverse { .. } => "0x8XY7",
            Self::ShiftLeft { .. } => "0x8XYE",
            Self::SkipNeRegister { .. } => "0x9XY0",
            Self::LoadIndex { .. } => "0xANNN",
            Self::JumpOffset { .. } => "0xBNNN",
            Self::Random { .. } => "0xCXNN",
            Self::Draw { .. } => "0xDXYN",
            Self::SkipKeyPressed { .. } => "0xEX9E",
            Self::SkipKeyNotPressed { .. } => "0xEXA1",
            Self::LoadDelay { .. } => "0xFX07",
            Self::WaitKey { .. } => "0xFX0A",
            Self::SetDelay { .. } => "0xFX15",
            Self::SetSound { .. } => "0xFX18",
            Self::AddIndex { .. } => "0xFX1E",
            Self::LoadGlyph { .. } => "0xFX29",
            Self::Bcd { .. } => "0xFX33",
            Self::StoreRegisters { .. } => "0xFX55",
            Self::LoadRegisters { .. } => "0xFX65",
        }
    }
}

/// C-like pseudo-code for the instruction
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Clear => write!(f, "disp_clear()"),
            Self::Return => write!(f, "return;"),
            Self::Jump { nnn } => write!(f, "goto 0x{:03X};", nnn),
            Self::Call { nnn } => write!(f, "*(0x{:03X})()", nnn),
            Self::SkipEqImmediate { x, nn } => write!(f, "if(V{:X}==0x{:02X})", x, nn),
            Self::SkipNeImmediate { x, nn } => write!(f, "if(V{:X}!=0x{:02X})", x, nn),
            Self::SkipEqRegister { x, y } => write!(f, "if(V{:X}==V{:X})", x, y),
            Self::LoadImmediate { x, nn } => write!(f, "V{:X} = 0x{:02X}", x, nn),
            Self::AddImmediate { x, nn } => write!(f, "V{:X} += 0x{:02X}", x, nn),
            Self::Move { x, y } => write!(f, "V{:X} = V{:X}", x, y),
            Self::Or { x, y } => write!(f, "V{:X} |= V{:X}", x, y),
            Self::And { x, y } => write!(f, "V{:X} &= V{:X}", x, y),
            Self::Xor { x, y } => write!(f, "V{:X} ^= V{:X}", x, y),
            Self::AddRegister { x, y } => write!(f, "V{:X} += V{:X}", x, y),
            Self::Sub { x, y } => write!(f, "V{:X} -= V{:X}", x, y),
            Self::ShiftRight { x, y } => write!(f, "V{:X} = V{:X} >> 1", x, y),
            Self::SubReverse { x, y } => write!(f, "V{:X} = V{:X} - V{:X}", x, y, x),
            Self::ShiftLeft { x, y } => write!(f, "V{:X} = V{:X} << 1", x, y),
            Self::SkipNeRegister { x, y } => write!(f, "if(V{:X}!=V{:X})", x, y),
            Self::LoadIndex { nnn } => write!(f, "I = 0x{:03X}", nnn),
            Self::JumpOffset { nnn } => write!(f, "PC = V0 + 0x{:03X}", nnn),
            Self::Random { x, nn } => write!(f, "V{:X} = rand() & 0x{:02X}", x, nn),
            Self::Draw { x, y, n } => write!(f, "draw(V{:X},V{:X},{})", x, y, n),
            Self::SkipKeyPressed { x } => write!(f, "if(key()==V{:X})", x),
            Self::SkipKeyNotPressed { x } => write!(f, "if(key()!=V{:X})", x),
            Self::LoadDelay { x } => write!(f, "V{:X} = get_delay()", x),
            Self::WaitKey { x } => write!(f, "V{:X} = get_key()", x),
            Self::SetDelay { x } => write!(f, "delay_timer(V{:X})", x),
            Self::SetSound { x } => write!(f, "sound_timer(V{:X})", x),
            Self::AddIndex { x } => write!(f, "I += V{:X}", x),
            Self::LoadGlyph { x } => write!(f, "I = sprite_addr[V{:X}]", x),
            Self::Bcd { x } => write!(f, "set_BCD(V{:X})", x),
            Self::StoreRegisters { x } => write!(f, "reg_dump(V{:X}, &I)", x),
            Self::LoadRegisters { x } => write!(f, "reg_load(V{:X}, &I)", x),
        }
    }
}
