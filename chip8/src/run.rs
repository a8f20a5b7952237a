use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use chip8_core::{Chip8, SeededRandom};

use crate::cli::Args;
use crate::display::frame_to_text;
use crate::keymap::keymap;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

pub fn run(args: &Args) -> Result<()> {
    let random = match args.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let mut chip8 = Chip8::with_random(random);

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;

    for key in args.keys.chars() {
        match keymap(key) {
            Some(kc) => chip8.key_press(kc),
            None => warn!("{:?} is not mapped to a key", key),
        }
    }

    // Set initial timing
    let cycle_time = Duration::from_nanos(NANOS_PER_SECOND / args.clock_hz);
    let mut last_cycle = Instant::now();

    let mut cycles: u64 = 0;
    let mut frames: u64 = 0;
    let mut waiting = false;

    while args.cycles.map_or(true, |limit| cycles < limit) {
        let cycle = chip8
            .cycle()
            .with_context(|| format!("machine halted after {} cycles", cycles))?;
        cycles += 1;

        if cycle.beep {
            info!("BEEP!");
        }
        if chip8.get_frame().is_some() {
            frames += 1;
        }
        if cycle.awaiting_key && !waiting {
            info!("waiting for a key press");
        }
        waiting = cycle.awaiting_key;

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !args.fast && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("ran {} cycles, {} redraws", cycles, frames);
    if args.dump {
        println!("{}", frame_to_text(chip8.frame_buffer()));
    }
    Ok(())
}
