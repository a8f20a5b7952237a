use thiserror::Error;

/// Why a program image could not be put into memory.
/// Nothing is written to memory when loading fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read program image")]
    Io(#[from] std::io::Error),

    /// `len` is a lower bound when the image came from a reader
    #[error("program of {len} bytes or more does not fit in the {max} bytes available")]
    TooLarge { len: usize, max: usize },
}

/// A fatal machine fault. The machine halts and refuses to cycle again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("call stack overflow (subroutines nested deeper than 15)")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of range at {addr:#06X}")]
    AddressOutOfRange { addr: usize },

    #[error("program counter out of range at {pc:#06X}")]
    PcOutOfRange { pc: u16 },

    #[error("key {key:#04X} does not exist")]
    KeyOutOfRange { key: u8 },
}
