use chip8_core::FrameBuffer;

const LIT: char = '#';
const DARK: char = ' ';

/// Formats a FrameBuffer as text: one line per row, `#` for lit pixels.
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .rows()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 1 { LIT } else { DARK })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_text() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(1, 0, &[0x80]);
        frame.draw_sprite(0, 1, &[0x80]);
        let text = frame_to_text(&frame);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.chars().count() == 64));
        assert!(lines[0].starts_with(" # "));
        assert!(lines[1].starts_with("#  "));
        assert!(lines[2].chars().all(|c| c == ' '));
    }
}
