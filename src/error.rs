use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// `RomTooLarge` is recoverable; every other variant halts the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulationError {
    #[error("ROM is {size} bytes but at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unknown opcode {opcode:#06X} at pc={pc:#05X}")]
    UnknownOpcode { pc: u16, opcode: u16 },

    #[error("stack overflow calling a subroutine at pc={pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from a subroutine at pc={pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("program counter {pc:#06X} is outside of memory")]
    ProgramCounterOutOfBounds { pc: u16 },

    #[error("instruction at pc={pc:#05X} tried to write to reserved address {address:#05X}")]
    ReservedWrite { pc: u16, address: u16 },

    #[error("machine halted at pc={pc:#05X}; reset it before stepping again")]
    Halted { pc: u16 },
}

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn test_rom_too_large_message() {
        let error = EmulationError::RomTooLarge {
            size: 4000,
            max: 3584,
        };
        assert_eq!(
            error.to_string(),
            "ROM is 4000 bytes but at most 3584 bytes fit in memory"
        );
    }

    #[test]
    fn test_messages_name_the_address() {
        let error = EmulationError::UnknownOpcode {
            pc: 0x2A4,
            opcode: 0x5121,
        };
        assert_eq!(error.to_string(), "unknown opcode 0x5121 at pc=0x2A4");
    }
}
