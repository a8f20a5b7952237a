use crate::constants::KEY_COUNT;
use crate::error::Fault;

/// # Keypad
/// Input is generated with a 16 key hexadecimal keypad:
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Written by the host between cycles, read by the key skip and key wait instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; keys past 0xF are ignored
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = pressed;
        }
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool, Fault> {
        self.pressed
            .get(key as usize)
            .copied()
            .ok_or(Fault::KeyOutOfRange { key })
    }

    /// The lowest numbered key currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|&p| p).map(|key| key as u8)
    }
}
