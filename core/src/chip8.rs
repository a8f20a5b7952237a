use std::io::Read;

use log::{debug, error, info, trace};

use crate::error::{Fault, LoadError};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::{self, Step};
use crate::random::{RandomByte, SeededRandom};
use crate::registers::Registers;
use crate::state::State;
use crate::timers::Timers;

/// What the host should know after a cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cycle {
    /// Fx0A is waiting; press a key and cycle again
    pub awaiting_key: bool,
    /// The sound timer just ran out
    pub beep: bool,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `random` source behind Cxkk, seeded once per session
///  - the `fault` that halted it, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the machine one cycle at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R: RandomByte = SeededRandom> {
    state: State,
    random: R,
    fault: Option<Fault>,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::with_random(SeededRandom::from_entropy())
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomByte> Chip8<R> {
    pub fn with_random(random: R) -> Self {
        Chip8 {
            state: State::new(),
            random,
            fault: None,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let len = self.state.memory.load_from(reader)?;
        info!("loaded {} byte program", len);
        Ok(())
    }

    /// Load a rom that is already in memory
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(program)?;
        info!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.redraw_requested() {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn redraw_requested(&self) -> bool {
        self.state.frame_buffer.redraw_requested()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.release(key);
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.state.keypad
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    pub fn memory(&self) -> &[u8] {
        self.state.memory.as_bytes()
    }

    /// The fault that halted the machine, if any
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Advances the machine by a single cycle
    /// - gets the opcode at pc and moves pc past it
    /// - clears the redraw flag
    /// - executes the opcode
    /// - decrements the timers
    ///
    /// A fault halts the machine; every later call returns the same fault.
    pub fn cycle(&mut self) -> Result<Cycle, Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.step().map_err(|fault| {
            error!("halting: {}", fault);
            self.fault = Some(fault);
            fault
        })
    }

    fn step(&mut self) -> Result<Cycle, Fault> {
        let op = self.get_op()?;
        let registers = &self.state.registers;
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            registers.v,
            registers.i,
            registers.pc
        );

        self.state.registers.pc += 2;
        self.state.frame_buffer.clear_redraw();

        let step = operations::execute(Instruction::from(op), &mut self.state, &mut self.random)?;

        let beep = self.state.timers.tick();
        if beep {
            debug!("beep");
        }

        Ok(Cycle {
            awaiting_key: step == Step::AwaitingKey,
            beep,
        })
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode, Fault> {
        let pc = self.state.registers.pc;
        match self.state.memory.slice(pc as usize, 2) {
            Ok(&[high, low]) => Ok(Opcode::from_bytes(high, low)),
            _ => Err(Fault::PcOutOfRange { pc }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out bytes from a list, then zeros
    struct Sequence(Vec<u8>);

    impl RandomByte for Sequence {
        fn random_byte(&mut self) -> u8 {
            if self.0.is_empty() {
                0
            } else {
                self.0.remove(0)
            }
        }
    }

    fn chip8_with(program: &[u8]) -> Chip8<Sequence> {
        let mut chip8 = Chip8::with_random(Sequence(vec![]));
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Ok(Opcode(0xAABB)));
    }

    #[test]
    fn test_cycle_advances_pc() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        let starting_pc = chip8.state.registers.pc;
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_redraw_flag_is_one_shot() {
        // CLS; LD V0, 1
        let mut chip8 = chip8_with(&[0x00, 0xE0, 0x60, 0x01]);
        chip8.cycle().unwrap();
        assert!(chip8.get_frame().is_some());
        chip8.cycle().unwrap();
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_timers_tick_every_cycle() {
        // LD V0, 3; LD DT, V0; LD ST, V0
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.timers().delay, 2);
        chip8.cycle().unwrap();
        assert_eq!(chip8.timers().delay, 1);
        assert_eq!(chip8.timers().sound, 2);
    }

    #[test]
    fn test_beep_when_sound_runs_out() {
        // LD V0, 1; LD ST, V0
        let mut chip8 = chip8_with(&[0x60, 0x01, 0xF0, 0x18]);
        assert!(!chip8.cycle().unwrap().beep);
        assert!(chip8.cycle().unwrap().beep);
        assert_eq!(chip8.timers().sound, 0);
    }

    #[test]
    fn test_waits_for_key_across_cycles() {
        // LD V3, K
        let mut chip8 = chip8_with(&[0xF3, 0x0A]);
        for _ in 0..3 {
            assert!(chip8.cycle().unwrap().awaiting_key);
            assert_eq!(chip8.state.registers.pc, 0x200);
        }
        chip8.key_press(0x7);
        assert!(!chip8.cycle().unwrap().awaiting_key);
        assert_eq!(chip8.state.registers.v[0x3], 0x7);
        assert_eq!(chip8.state.registers.pc, 0x202);
    }

    #[test]
    fn test_random_source_is_injected() {
        // RND V0, 0xFF
        let mut chip8 = Chip8::with_random(Sequence(vec![0x42]));
        chip8.load_program(&[0xC0, 0xFF]).unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().v[0x0], 0x42);
    }

    #[test]
    fn test_fault_halts() {
        // RET with nothing on the stack
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        assert_eq!(chip8.cycle(), Err(Fault::StackUnderflow));
        let pc = chip8.state.registers.pc;
        assert_eq!(chip8.cycle(), Err(Fault::StackUnderflow));
        assert_eq!(chip8.state.registers.pc, pc);
        assert_eq!(chip8.fault(), Some(Fault::StackUnderflow));
    }

    #[test]
    fn test_pc_past_memory_faults() {
        // JP 0xFFF
        let mut chip8 = chip8_with(&[0x1F, 0xFF]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.cycle(), Err(Fault::PcOutOfRange { pc: 0xFFF }));
    }

    #[test]
    fn test_oversized_rom_rejected() {
        let mut chip8 = Chip8::with_random(Sequence(vec![]));
        let mut rom: &[u8] = &[0x12; 4000];
        assert!(matches!(
            chip8.load_rom(&mut rom),
            Err(LoadError::TooLarge { len: 3585, max: 3584 })
        ));
        assert!(chip8.memory()[0x200..].iter().all(|&b| b == 0));
    }

    /// Fails every read
    struct Unreadable;

    impl Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no such rom"))
        }
    }

    #[test]
    fn test_unreadable_rom_rejected() {
        let mut chip8 = Chip8::with_random(Sequence(vec![]));
        assert!(matches!(
            chip8.load_rom(&mut Unreadable),
            Err(LoadError::Io(_))
        ));
        assert!(chip8.memory()[0x200..].iter().all(|&b| b == 0));
        assert_eq!(chip8.registers().pc, 0x200);
    }
}
