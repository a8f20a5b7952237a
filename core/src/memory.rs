use std::io::Read;

use crate::constants::{FONT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000-0x04F  font (16 glyphs, 5 bytes each)
/// 0x050-0x1FF  unused
/// 0x200-0xFFF  program
/// ```
///
/// Every access is bounds checked; there is no wraparound at the top of memory.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font at 0x000
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Copy a program image to 0x200.
    /// Images larger than `MAX_PROGRAM_SIZE` are rejected before anything is written.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                len: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Read a whole program image from `reader` and load it.
    /// Returns the number of bytes loaded.
    ///
    /// At most one byte past `MAX_PROGRAM_SIZE` is read, so endless sources are rejected too.
    pub fn load_from(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE + 1);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }

    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Fault::AddressOutOfRange { addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        let byte = self
            .bytes
            .get_mut(addr)
            .ok_or(Fault::AddressOutOfRange { addr })?;
        *byte = value;
        Ok(())
    }

    /// `len` bytes starting at `addr`; empty ranges never fault
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        if len == 0 {
            return Ok(&[]);
        }
        self.bytes
            .get(addr..addr + len)
            .ok_or_else(|| out_of_range(addr))
    }

    /// Copy `data` into memory starting at `addr`; all or nothing.
    pub fn write_slice(&mut self, addr: usize, data: &[u8]) -> Result<(), Fault> {
        if data.is_empty() {
            return Ok(());
        }
        let dst = self
            .bytes
            .get_mut(addr..addr + data.len())
            .ok_or_else(|| out_of_range(addr))?;
        dst.copy_from_slice(data);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Reports the first address of a failed range access that lies outside memory
fn out_of_range(addr: usize) -> Fault {
    Fault::AddressOutOfRange {
        addr: addr.max(MEMORY_SIZE),
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A source that can never be read
    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_font_loaded_rest_zeroed() {
        let m = Memory::new();
        assert_eq!(m.bytes[..80], FONT);
        assert!(m.bytes[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_program_load_ok() {
        let mut m = Memory::new();
        m.load_program(&[0x00, 0xE0]).unwrap();
        assert_eq!(m.bytes[0x200..0x202], [0x00, 0xE0]);
    }

    #[test]
    fn test_program_fills_memory() {
        let mut m = Memory::new();
        m.load_program(&[0xAA; MAX_PROGRAM_SIZE]).unwrap();
        assert_eq!(m.bytes[0xFFF], 0xAA);
    }

    #[test]
    fn test_oversized_program_rejected_before_write() {
        let mut m = Memory::new();
        let result = m.load_program(&[0xAA; 4000]);
        assert!(matches!(result, Err(LoadError::TooLarge { len: 4000, max: 3584 })));
        assert!(m.bytes[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_from_reader() {
        let mut m = Memory::new();
        let mut src: &[u8] = &[0x12, 0x34, 0x56];
        assert_eq!(m.load_from(&mut src).unwrap(), 3);
        assert_eq!(m.bytes[0x200..0x203], [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_endless_reader_rejected() {
        let mut m = Memory::new();
        let mut src = std::io::repeat(0xAA);
        let result = m.load_from(&mut src);
        assert!(matches!(
            result,
            Err(LoadError::TooLarge { len: 3585, max: 3584 })
        ));
        assert!(m.bytes[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reader_error_leaves_memory_alone() {
        let mut m = Memory::new();
        let mut src = FailingReader;
        assert!(matches!(m.load_from(&mut src), Err(LoadError::Io(_))));
        assert!(m.bytes[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty_range_past_memory_is_ok() {
        let mut m = Memory::new();
        assert_eq!(m.slice(0x2000, 0), Ok(&[][..]));
        assert_eq!(m.write_slice(0x2000, &[]), Ok(()));
    }

    #[test]
    fn test_read_out_of_range_faults() {
        let m = Memory::new();
        assert_eq!(m.read(0xFFF), Ok(0));
        assert_eq!(m.read(0x1000), Err(Fault::AddressOutOfRange { addr: 0x1000 }));
    }

    #[test]
    fn test_write_slice_past_end_faults_without_writing() {
        let mut m = Memory::new();
        let result = m.write_slice(0xFFE, &[1, 2, 3]);
        assert_eq!(result, Err(Fault::AddressOutOfRange { addr: 0x1000 }));
        assert_eq!(m.bytes[0xFFE..], [0, 0]);
    }

    #[test]
    fn test_slice_reads_range() {
        let mut m = Memory::new();
        m.write_slice(0x300, &[7, 8]).unwrap();
        assert_eq!(m.slice(0x300, 2).unwrap(), &[7, 8]);
    }
}
