use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a 16-key hexadecimal keypad.
///
/// The host sets and clears keys as they go down and up. Instructions that
/// observe a pressed key consume it, so one physical press satisfies one
/// check; hosts that want auto-repeat must re-assert held keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `key` is not on the keypad
    pub fn set(&mut self, key: u8, pressed: bool) -> bool {
        match self.pressed.get_mut(key as usize) {
            Some(state) => {
                *state = pressed;
                true
            }
            None => false,
        }
    }

    /// Only the low nibble of `key` is used
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    /// Returns whether `key` was pressed and releases it
    pub fn consume(&mut self, key: u8) -> bool {
        std::mem::take(&mut self.pressed[(key & 0xF) as usize])
    }

    /// Releases and returns the lowest-numbered pressed key
    pub fn consume_any(&mut self) -> Option<u8> {
        let key = self.pressed.iter().position(|pressed| *pressed)?;
        self.pressed[key] = false;
        Some(key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

#[cfg(test)]
mod test_keypad {
    use super::*;

    #[test]
    fn test_set_and_release() {
        let mut keypad = Keypad::new();
        assert!(keypad.set(0xE, true));
        assert!(keypad.is_pressed(0xE));
        assert!(keypad.set(0xE, false));
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_rejects_keys_off_the_pad() {
        let mut keypad = Keypad::new();
        assert!(!keypad.set(0x10, true));
        assert_eq!(keypad, Keypad::new());
    }

    #[test]
    fn test_consume_clears() {
        let mut keypad = Keypad::new();
        keypad.set(0x3, true);
        assert!(keypad.consume(0x3));
        assert!(!keypad.consume(0x3));
        assert!(!keypad.is_pressed(0x3));
    }

    #[test]
    fn test_consume_any_picks_lowest() {
        let mut keypad = Keypad::new();
        keypad.set(0x9, true);
        keypad.set(0x4, true);
        assert_eq!(keypad.consume_any(), Some(0x4));
        assert_eq!(keypad.consume_any(), Some(0x9));
        assert_eq!(keypad.consume_any(), None);
    }
}
