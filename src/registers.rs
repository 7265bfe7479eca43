use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT, STACK_SIZE};
use crate::error::EmulationError;

/// # Register file
/// - (v) 16 8-bit registers V0..VF; VF doubles as the flag register
/// - (i) a 16-bit index register; only the low 12 bits address memory
/// - (pc) a 16-bit program counter
/// - (stack, sp) 16 return addresses and a pointer to the next free slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    stack: [u16; STACK_SIZE],
    sp: usize,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_SIZE],
            sp: 0,
        }
    }

    /// Vx; only the low nibble of `x` is used
    pub fn v(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    pub fn set_v(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    pub fn v_all(&self) -> [u8; REGISTER_COUNT] {
        self.v
    }

    /// VF = 1 if `flag` else 0
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn stack_depth(&self) -> usize {
        self.sp
    }

    /// STACK.push(address)
    pub fn push(&mut self, address: u16) -> Result<(), EmulationError> {
        if self.sp == STACK_SIZE {
            return Err(EmulationError::StackOverflow { pc: self.pc });
        }
        self.stack[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    /// STACK.pop()
    pub fn pop(&mut self) -> Result<u16, EmulationError> {
        if self.sp == 0 {
            return Err(EmulationError::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_registers {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let registers = Registers::new();
        assert_eq!(registers.pc(), 0x200);
        assert_eq!(registers.i(), 0x0);
        assert_eq!(registers.v_all(), [0; 16]);
        assert_eq!(registers.stack_depth(), 0);
    }

    #[test]
    fn test_set_flag() {
        let mut registers = Registers::new();
        registers.set_flag(true);
        assert_eq!(registers.v(0xF), 0x1);
        registers.set_flag(false);
        assert_eq!(registers.v(0xF), 0x0);
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut registers = Registers::new();
        registers.push(0x123).unwrap();
        registers.push(0x456).unwrap();
        assert_eq!(registers.stack_depth(), 2);
        assert_eq!(registers.pop(), Ok(0x456));
        assert_eq!(registers.pop(), Ok(0x123));
        assert_eq!(registers.stack_depth(), 0);
    }

    #[test]
    fn test_push_when_full_overflows() {
        let mut registers = Registers::new();
        for address in 0..16 {
            registers.push(address).unwrap();
        }
        assert_eq!(
            registers.push(0xABC),
            Err(EmulationError::StackOverflow { pc: 0x200 })
        );
        assert_eq!(registers.stack_depth(), 16);
    }

    #[test]
    fn test_pop_when_empty_underflows() {
        let mut registers = Registers::new();
        assert_eq!(
            registers.pop(),
            Err(EmulationError::StackUnderflow { pc: 0x200 })
        );
        assert_eq!(registers.stack_depth(), 0);
    }
}
