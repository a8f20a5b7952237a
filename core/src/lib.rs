pub use chip8::{Chip8, Cycle};
pub use constants::CLOCK_HZ;
pub use error::{Fault, LoadError};
pub use framebuffer::FrameBuffer;
pub use keypad::Keypad;
pub use memory::Memory;
pub use random::{RandomByte, SeededRandom};

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod random;
mod registers;
mod state;
mod timers;

pub use registers::Registers;
pub use timers::Timers;
