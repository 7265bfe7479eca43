use crate::constants::{FONT_ADDRESS, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::EmulationError;

/// Mask applied to every address; CHIP-8 addresses are 12 bits wide
const ADDRESS_MASK: u16 = 0x0FFF;

/// A write below `PROGRAM_START` was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedAddress(pub u16);

/// # Memory
/// 4096 bytes laid out as:
/// ```text
/// 0x000-0x04F  built-in sprite sheet (hex digits 0..F)
/// 0x050-0x1FF  reserved for the interpreter
/// 0x200-0xFFF  program ROM and work RAM
/// ```
/// Only `new` may touch the reserved region; instruction writes below 0x200
/// are rejected.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[FONT_ADDRESS..FONT_ADDRESS + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copy a ROM into the program region.
    ///
    /// Whatever the previous program left behind is cleared first; the font is
    /// never touched. An oversized ROM leaves memory as it was.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), EmulationError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(EmulationError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..].fill(0);
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[(address & ADDRESS_MASK) as usize]
    }

    /// Big-endian word at `address`. The caller guarantees `address <= 0xFFE`.
    pub fn read_word(&self, address: u16) -> u16 {
        u16::from(self.read(address)) << 8 | u16::from(self.read(address.wrapping_add(1)))
    }

    /// Fill `buffer` with consecutive bytes starting at `address`, wrapping
    /// at the top of memory.
    pub fn read_into(&self, address: u16, buffer: &mut [u8]) {
        for (offset, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read(address.wrapping_add(offset as u16));
        }
    }

    pub fn write(&mut self, address: u16, value: u8) -> Result<(), ReservedAddress> {
        let address = address & ADDRESS_MASK;
        if address < PROGRAM_START {
            return Err(ReservedAddress(address));
        }
        self.bytes[address as usize] = value;
        Ok(())
    }

    /// Write `values` to consecutive addresses starting at `address`.
    /// Nothing is written unless every target address is writable.
    pub fn write_all(&mut self, address: u16, values: &[u8]) -> Result<(), ReservedAddress> {
        if let Some(reserved) = (0..values.len() as u16)
            .map(|offset| address.wrapping_add(offset) & ADDRESS_MASK)
            .find(|target| *target < PROGRAM_START)
        {
            return Err(ReservedAddress(reserved));
        }
        for (offset, value) in values.iter().enumerate() {
            self.write(address.wrapping_add(offset as u16), *value)?;
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_memory {
    use super::*;

    #[test]
    fn test_font_is_loaded() {
        let memory = Memory::new();
        assert_eq!(memory.as_slice()[..80], SPRITE_SHEET);
    }

    #[test]
    fn test_program_region_is_zeroed() {
        let memory = Memory::new();
        assert!(memory.as_slice()[0x200..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_load_rom_at_0x200() {
        let mut memory = Memory::new();
        memory.load_rom(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_load_rom_clears_previous_program() {
        let mut memory = Memory::new();
        memory.load_rom(&[0xAA; 8]).unwrap();
        memory.load_rom(&[0xBB; 2]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x208], [0xBB, 0xBB, 0, 0, 0, 0, 0, 0]);
        assert_eq!(memory.as_slice()[..80], SPRITE_SHEET);
    }

    #[test]
    fn test_load_rom_that_exactly_fits() {
        let mut memory = Memory::new();
        assert!(memory.load_rom(&[0x1; MAX_ROM_SIZE]).is_ok());
        assert_eq!(memory.read(0xFFF), 0x1);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut memory = Memory::new();
        let rom = vec![0xFF; MAX_ROM_SIZE + 1];
        assert_eq!(
            memory.load_rom(&rom),
            Err(EmulationError::RomTooLarge {
                size: 3585,
                max: 3584
            })
        );
        assert!(memory.as_slice()[0x200..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut memory = Memory::new();
        memory.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.read_word(0x200), 0xAABB);
    }

    #[test]
    fn test_read_masks_to_12_bits() {
        let memory = Memory::new();
        assert_eq!(memory.read(0x1000), SPRITE_SHEET[0]);
    }

    #[test]
    fn test_write_below_program_start_is_rejected() {
        let mut memory = Memory::new();
        assert_eq!(memory.write(0x1FF, 0x1), Err(ReservedAddress(0x1FF)));
        assert_eq!(memory.write(0x000, 0x1), Err(ReservedAddress(0x000)));
        assert_eq!(memory.as_slice()[..80], SPRITE_SHEET);
    }

    #[test]
    fn test_write_all_is_all_or_nothing() {
        let mut memory = Memory::new();
        // 0xFFF then wraps to 0x000
        assert_eq!(
            memory.write_all(0xFFF, &[0x1, 0x2]),
            Err(ReservedAddress(0x000))
        );
        assert_eq!(memory.read(0xFFF), 0x0);
    }

    #[test]
    fn test_read_into_wraps() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x42).unwrap();
        let mut buffer = [0; 2];
        memory.read_into(0xFFF, &mut buffer);
        assert_eq!(buffer, [0x42, SPRITE_SHEET[0]]);
    }
}
