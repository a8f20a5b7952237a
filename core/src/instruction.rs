use crate::opcode::Opcode;

/// A decoded opcode. `x` and `y` index registers, `kk` is an immediate byte,
/// `addr` a 12-bit address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clr,
    /// 00EE
    Rts,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    Ske { x: usize, kk: u8 },
    /// 4xkk
    Skne { x: usize, kk: u8 },
    /// 5xy0
    Skre { x: usize, y: usize },
    /// 6xkk
    Load { x: usize, kk: u8 },
    /// 7xkk
    Add { x: usize, kk: u8 },
    /// 8xy0
    Mv { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    Addr { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    Shr { x: usize },
    /// 8xy7
    Subn { x: usize, y: usize },
    /// 8xyE
    Shl { x: usize },
    /// 9xy0
    Skrne { x: usize, y: usize },
    /// Annn
    Loadi { addr: u16 },
    /// Bnnn
    Jumpi { addr: u16 },
    /// Cxkk
    Rand { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    Skpr { x: usize },
    /// ExA1
    Skup { x: usize },
    /// Fx07
    Moved { x: usize },
    /// Fx0A
    Keyd { x: usize },
    /// Fx15
    Loads { x: usize },
    /// Fx18
    Ld { x: usize },
    /// Fx1E
    Addi { x: usize },
    /// Fx29
    Ldspr { x: usize },
    /// Fx33
    Bcd { x: usize },
    /// Fx55
    Stor { x: usize },
    /// Fx65
    Read { x: usize },
    /// Anything else; executes as a no-op
    Unknown(Opcode),
}

impl From<Opcode> for Instruction {
    /// Selects the correct Instruction for a given Opcode
    fn from(op: Opcode) -> Self {
        use Instruction::*;

        let x = op.x() as usize;
        let y = op.y() as usize;
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clr,
            (0x0, 0x0, 0xE, 0xE) => Rts,
            (0x1, ..) => Jump { addr: op.addr() },
            (0x2, ..) => Call { addr: op.addr() },
            (0x3, ..) => Ske { x, kk: op.kk() },
            (0x4, ..) => Skne { x, kk: op.kk() },
            (0x5, .., 0x0) => Skre { x, y },
            (0x6, ..) => Load { x, kk: op.kk() },
            (0x7, ..) => Add { x, kk: op.kk() },
            (0x8, .., 0x0) => Mv { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Addr { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x },
            (0x9, .., 0x0) => Skrne { x, y },
            (0xA, ..) => Loadi { addr: op.addr() },
            (0xB, ..) => Jumpi { addr: op.addr() },
            (0xC, ..) => Rand { x, kk: op.kk() },
            (0xD, .., n) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skpr { x },
            (0xE, _, 0xA, 0x1) => Skup { x },
            (0xF, _, 0x0, 0x7) => Moved { x },
            (0xF, _, 0x0, 0xA) => Keyd { x },
            (0xF, _, 0x1, 0x5) => Loads { x },
            (0xF, _, 0x1, 0x8) => Ld { x },
            (0xF, _, 0x1, 0xE) => Addi { x },
            (0xF, _, 0x2, 0x9) => Ldspr { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Stor { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => Unknown(op),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::Instruction::*;
    use super::*;

    fn decode(op: u16) -> Instruction {
        Instruction::from(Opcode(op))
    }

    #[test]
    fn test_fixed_opcodes() {
        assert_eq!(decode(0x00E0), Clr);
        assert_eq!(decode(0x00EE), Rts);
    }

    #[test]
    fn test_address_forms() {
        assert_eq!(decode(0x1ABC), Jump { addr: 0xABC });
        assert_eq!(decode(0x2123), Call { addr: 0x123 });
        assert_eq!(decode(0xA456), Loadi { addr: 0x456 });
        assert_eq!(decode(0xB789), Jumpi { addr: 0x789 });
    }

    #[test]
    fn test_register_forms() {
        assert_eq!(decode(0x3A11), Ske { x: 0xA, kk: 0x11 });
        assert_eq!(decode(0x8124), Addr { x: 1, y: 2 });
        assert_eq!(decode(0x8AB6), Shr { x: 0xA });
        assert_eq!(decode(0xD125), Draw { x: 1, y: 2, n: 5 });
        assert_eq!(decode(0xE29E), Skpr { x: 2 });
        assert_eq!(decode(0xF355), Stor { x: 3 });
    }

    #[test]
    fn test_unknown_opcodes() {
        for op in [0x0000, 0x0123, 0x00E1, 0x5121, 0x8128, 0x9121, 0xE19F, 0xF1FF] {
            assert_eq!(decode(op), Unknown(Opcode(op)));
        }
    }
}
