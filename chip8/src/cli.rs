use std::path::PathBuf;

use clap::Parser;

use chip8_core::CLOCK_HZ;

/// Run a Chip-8 program image
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program image to load at 0x200
    pub rom: PathBuf,

    /// Stop after this many cycles
    #[arg(short, long)]
    pub cycles: Option<u64>,

    /// CPU cycles per second
    #[arg(long, default_value_t = CLOCK_HZ, value_parser = clap::value_parser!(u64).range(1..))]
    pub clock_hz: u64,

    /// Seed for the random number generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Keys held down for the whole session, e.g. "qw" (1234/QWER/ASDF/ZXCV layout)
    #[arg(short, long, default_value = "")]
    pub keys: String,

    /// Print the frame buffer when the program stops
    #[arg(long)]
    pub dump: bool,

    /// Ignore the clock and run as fast as possible
    #[arg(long)]
    pub fast: bool,
}
