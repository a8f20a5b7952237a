use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bytes for the CXNN instruction
pub trait RandomByte {
    fn random_byte(&mut self) -> u8;
}

/// A generator seeded once per session.
///
/// Bytes are drawn uniformly from 0..255; 0xFF is never produced, matching the range
/// existing programs were tested against.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomByte for SeededRandom {
    fn random_byte(&mut self) -> u8 {
        self.rng.gen_range(0..u8::MAX)
    }
}
