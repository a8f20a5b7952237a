use crate::constants::{PROGRAM_START, STACK_SIZE};
use crate::error::Fault;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is overwritten by arithmetic, shifts and draws
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - (sp) an index into a 16 slot return address stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    sp: u8,
    stack: [u16; STACK_SIZE],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
        }
    }

    /// The flag register
    pub fn vf(&self) -> u8 {
        self.v[0xF]
    }

    pub fn set_vf(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Occupied return addresses, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[1..=self.sp as usize]
    }

    /// Bumps sp, then stores at the new slot
    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.sp as usize + 1 >= STACK_SIZE {
            return Err(Fault::StackOverflow);
        }
        self.sp += 1;
        self.stack[self.sp as usize] = addr;
        Ok(())
    }

    /// Reads the current slot, then drops sp
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        let addr = self.stack[self.sp as usize];
        self.sp -= 1;
        Ok(addr)
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
