use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// # FrameBuffer
/// The display is 64x32 monochrome pixels, stored row-major one byte per pixel (0 or 1).
///
/// `redraw` is a one-shot flag: the machine clears it at the start of every cycle and only
/// clearing the screen or drawing a sprite sets it.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [u8; DISPLAY_SIZE],
    redraw: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; DISPLAY_SIZE],
            redraw: false,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    pub(crate) fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_SIZE];
        self.redraw = true;
    }

    /// XORs an 8 pixel wide sprite onto the buffer at (x, y), wrapping each pixel around
    /// both edges independently.
    ///
    /// Returns true if any touched pixel is lit afterwards. Note this differs from the usual
    /// "a lit pixel was erased" collision rule; existing programs depend on it.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut flag = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py * DISPLAY_WIDTH + px];
                *pixel ^= (byte >> (7 - bit)) & 1;
                flag |= *pixel == 1;
            }
        }
        self.redraw = true;
        flag
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
