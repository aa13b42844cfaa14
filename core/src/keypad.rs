use crate::constants::KEY_COUNT;
use crate::error::{Chip8Error, Result};

/// # Keypad
/// Latches the state of the 16 key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Every key down edge is stamped with a monotonically increasing counter so
/// that `Fx0A` can ask whether any key went down after it started waiting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    pressed_at: [u64; KEY_COUNT],
    edges: u64,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    fn index(code: u8) -> Result<usize> {
        if (code as usize) < KEY_COUNT {
            Ok(code as usize)
        } else {
            Err(Chip8Error::InvalidKeyCode(code))
        }
    }

    /// Set the pressed status of key
    ///
    /// Pressing a key that is already down is not a new edge.
    pub fn key_down(&mut self, code: u8) -> Result<()> {
        let key = Self::index(code)?;
        if !self.pressed[key] {
            self.edges += 1;
            self.pressed[key] = true;
            self.pressed_at[key] = self.edges;
        }
        Ok(())
    }

    /// Unset the pressed status of key
    pub fn key_up(&mut self, code: u8) -> Result<()> {
        let key = Self::index(code)?;
        self.pressed[key] = false;
        Ok(())
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }

    /// Whether the key is held; codes outside 0..F read as released
    pub fn is_down(&self, code: u8) -> bool {
        Self::index(code).map_or(false, |key| self.pressed[key])
    }

    /// A marker to hand back to `any_down_since`
    pub fn poll(&self) -> u64 {
        self.edges
    }

    /// The key with the latest down edge after `poll`, whether or not it has
    /// been released since
    pub fn any_down_since(&self, poll: u64) -> Option<u8> {
        (0..KEY_COUNT)
            .filter(|&key| self.pressed_at[key] > poll)
            .max_by_key(|&key| self.pressed_at[key])
            .map(|key| key as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_and_up() {
        let mut keypad = Keypad::new();
        keypad.key_down(0xE).unwrap();
        assert!(keypad.is_down(0xE));
        keypad.key_up(0xE).unwrap();
        assert!(!keypad.is_down(0xE));
    }

    #[test]
    fn test_key_edges_are_idempotent() {
        let mut keypad = Keypad::new();
        keypad.key_down(0x1).unwrap();
        let poll = keypad.poll();
        keypad.key_down(0x1).unwrap();
        assert_eq!(keypad.poll(), poll);
        keypad.key_up(0x1).unwrap();
        keypad.key_up(0x1).unwrap();
        assert!(!keypad.is_down(0x1));
    }

    #[test]
    fn test_invalid_key_codes_are_rejected() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.key_down(0x10), Err(Chip8Error::InvalidKeyCode(0x10)));
        assert_eq!(keypad.key_up(0xFF), Err(Chip8Error::InvalidKeyCode(0xFF)));
        assert_eq!(keypad, Keypad::new());
        assert!(!keypad.is_down(0x10));
    }

    #[test]
    fn test_any_down_since_ignores_held_keys() {
        let mut keypad = Keypad::new();
        keypad.key_down(0x3).unwrap();
        let poll = keypad.poll();
        assert_eq!(keypad.any_down_since(poll), None);
        keypad.key_down(0xA).unwrap();
        assert_eq!(keypad.any_down_since(poll), Some(0xA));
    }

    #[test]
    fn test_any_down_since_prefers_latest_press() {
        let mut keypad = Keypad::new();
        let poll = keypad.poll();
        keypad.key_down(0x7).unwrap();
        keypad.key_down(0x2).unwrap();
        assert_eq!(keypad.any_down_since(poll), Some(0x2));
    }

    #[test]
    fn test_any_down_since_keeps_released_taps() {
        let mut keypad = Keypad::new();
        let poll = keypad.poll();
        keypad.key_down(0x7).unwrap();
        keypad.key_up(0x7).unwrap();
        assert!(!keypad.is_down(0x7));
        assert_eq!(keypad.any_down_since(poll), Some(0x7));
        assert_eq!(keypad.any_down_since(keypad.poll()), None);
    }

    #[test]
    fn test_release_all() {
        let mut keypad = Keypad::new();
        keypad.key_down(0x0).unwrap();
        keypad.key_down(0xF).unwrap();
        keypad.release_all();
        assert!((0..16).all(|key| !keypad.is_down(key)));
    }
}
