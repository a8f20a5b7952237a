use crate::framebuffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// A snapshot of the machine's internal state
///
/// ## CPU
/// - `registers`: V0..VF, I, the program counter and the call stack
/// - `timers`: delay & sound, decremented once per cycle
///
/// ## Memory
/// - 4096 bytes of addressable memory, font at 0x000 and program at 0x200
/// - 64x32 byte frame buffer with its redraw flag
///
/// ## Input
/// - pressed status of keys 0..F, owned by the host
#[derive(Clone, Default)]
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub keypad: Keypad,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }
}
