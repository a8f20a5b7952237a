use log::warn;

use crate::constants::GLYPH_SIZE;
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::random::RandomByte;
use crate::state::State;

/// How an instruction left the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Done,
    /// Fx0A found no key held; pc points back at the instruction
    AwaitingKey,
}

/// Executes one decoded instruction. The program counter has already been advanced past it.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    random: &mut dyn RandomByte,
) -> Result<Step, Fault> {
    use Instruction::*;

    let v = &mut state.registers.v;
    match instruction {
        Clr => state.frame_buffer.clear(),
        Rts => state.registers.pc = state.registers.pop()?,
        Jump { addr } => state.registers.pc = addr,
        Call { addr } => call(state, addr)?,
        Ske { x, kk } => skip_if(&mut state.registers.pc, v[x] == kk),
        Skne { x, kk } => skip_if(&mut state.registers.pc, v[x] != kk),
        Skre { x, y } => skip_if(&mut state.registers.pc, v[x] == v[y]),
        Load { x, kk } => v[x] = kk,
        Add { x, kk } => v[x] = v[x].wrapping_add(kk),
        Mv { x, y } => v[x] = v[y],
        Or { x, y } => v[x] |= v[y],
        And { x, y } => v[x] &= v[y],
        Xor { x, y } => v[x] ^= v[y],
        Addr { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        Shr { x } => shr(state, x),
        Subn { x, y } => subn(state, x, y),
        Shl { x } => shl(state, x),
        Skrne { x, y } => skip_if(&mut state.registers.pc, v[x] != v[y]),
        Loadi { addr } => state.registers.i = addr,
        Jumpi { addr } => state.registers.pc = addr + u16::from(v[0x0]),
        Rand { x, kk } => v[x] = random.random_byte() & kk,
        Draw { x, y, n } => draw(state, x, y, n)?,
        Skpr { x } => {
            let pressed = state.keypad.is_pressed(v[x])?;
            skip_if(&mut state.registers.pc, pressed)
        }
        Skup { x } => {
            let pressed = state.keypad.is_pressed(v[x])?;
            skip_if(&mut state.registers.pc, !pressed)
        }
        Moved { x } => v[x] = state.timers.delay,
        Keyd { x } => return Ok(keyd(state, x)),
        Loads { x } => state.timers.delay = v[x],
        Ld { x } => state.timers.sound = v[x],
        Addi { x } => state.registers.i = state.registers.i.wrapping_add(u16::from(v[x])),
        Ldspr { x } => state.registers.i = u16::from(v[x]) * GLYPH_SIZE,
        Bcd { x } => bcd(state, x)?,
        Stor { x } => stor(state, x)?,
        Read { x } => read(state, x)?,
        Unknown(op) => warn!("unknown opcode {} at {:04X}", op, state.registers.pc - 2),
    }
    Ok(Step::Done)
}

/// pc += 2 if `condition`
fn skip_if(pc: &mut u16, condition: bool) {
    if condition {
        *pc += 2;
    }
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<(), Fault> {
    let registers = &mut state.registers;
    registers.push(registers.pc)?;
    registers.pc = addr;
    Ok(())
}

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: usize, y: usize) {
    let registers = &mut state.registers;
    let sum = u16::from(registers.v[x]) + u16::from(registers.v[y]);
    registers.v[x] = sum as u8;
    registers.set_vf(sum > 0xFF);
}

// The flag is written before the result for sub, shr, subn and shl, so an operand in VF
// is read after the flag lands.

/// VF = Vx > Vy; Vx -= Vy
fn sub(state: &mut State, x: usize, y: usize) {
    let registers = &mut state.registers;
    registers.set_vf(registers.v[x] > registers.v[y]);
    registers.v[x] = registers.v[x].wrapping_sub(registers.v[y]);
}

/// VF = lsb(Vx); Vx >>= 1
fn shr(state: &mut State, x: usize) {
    let registers = &mut state.registers;
    registers.v[0xF] = registers.v[x] & 0x1;
    registers.v[x] >>= 1;
}

/// VF = Vy > Vx; Vx = Vy - Vx
fn subn(state: &mut State, x: usize, y: usize) {
    let registers = &mut state.registers;
    registers.set_vf(registers.v[y] > registers.v[x]);
    registers.v[x] = registers.v[y].wrapping_sub(registers.v[x]);
}

/// VF = msb(Vx); Vx <<= 1
fn shl(state: &mut State, x: usize) {
    let registers = &mut state.registers;
    registers.v[0xF] = (registers.v[x] >> 7) & 0x1;
    registers.v[x] <<= 1;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at mem[I..I+n] onto the FrameBuffer with wrapping.
fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<(), Fault> {
    let (px, py) = (state.registers.v[x], state.registers.v[y]);
    let sprite = state
        .memory
        .slice(state.registers.i as usize, n as usize)?;
    let flag = state.frame_buffer.draw_sprite(px, py, sprite);
    state.registers.set_vf(flag);
    Ok(())
}

/// Vx = first pressed key, or rewind and wait for one
fn keyd(state: &mut State, x: usize) -> Step {
    match state.keypad.first_pressed() {
        Some(key) => {
            state.registers.v[x] = key;
            Step::Done
        }
        None => {
            state.registers.pc -= 2;
            Step::AwaitingKey
        }
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) -> Result<(), Fault> {
    let vx = state.registers.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .memory
        .write_slice(state.registers.i as usize, &digits)
}

/// mem[I..I+x] = V0..Vx, Vx itself excluded
fn stor(state: &mut State, x: usize) -> Result<(), Fault> {
    state
        .memory
        .write_slice(state.registers.i as usize, &state.registers.v[..x])
}

/// V0..Vx = mem[I..I+x], Vx itself excluded
fn read(state: &mut State, x: usize) -> Result<(), Fault> {
    let bytes = state.memory.slice(state.registers.i as usize, x)?;
    state.registers.v[..x].copy_from_slice(bytes);
    Ok(())
}
