/// # Timers
/// Two 8-bit counters, each decremented once per cycle while above zero.
/// The sound timer ticking down from 1 is the beep signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrement both timers. Returns true if a beep should sound.
    pub fn tick(&mut self) -> bool {
        if self.delay > 0 {
            self.delay -= 1;
        }

        let beep = self.sound == 1;
        if self.sound > 0 {
            self.sound -= 1;
        }
        beep
    }
}
