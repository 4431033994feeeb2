//! 8×8 bitmap text.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use libretro_plugin::Logger;

use crate::error::GlyphError;
use crate::framebuffer::{Framebuffer, Rgb565};

pub const GLYPH_SIZE: i32 = 8;

pub fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

pub fn draw_char(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    byte: u8,
    color: Rgb565,
) -> Result<(), GlyphError> {
    if !is_printable(byte) {
        return Err(GlyphError::Unprintable(byte));
    }
    let glyph = BASIC_FONTS
        .get(byte as char)
        .ok_or(GlyphError::Unprintable(byte))?;

    for (row, &bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            // Bit 0 is the leftmost column.
            if (bits >> col) & 1 == 1 {
                fb.set_pixel(x + col, y + row as i32, color);
            }
        }
    }
    Ok(())
}

/// Draws `text` left to right. Unprintable bytes are logged and leave a gap.
pub fn draw_text(
    fb: &mut Framebuffer,
    log: &mut Logger,
    x: i32,
    y: i32,
    text: &[u8],
    color: Rgb565,
) {
    let mut cx = x;
    for &byte in text {
        if let Err(err) = draw_char(fb, cx, y, byte, color) {
            log.warn(err);
        }
        cx += GLYPH_SIZE;
    }
}

/// First `max_len` bytes of `bytes` with anything unprintable shown as `.`.
pub fn sanitize_preview(bytes: &[u8], max_len: usize) -> String {
    bytes
        .iter()
        .take(max_len)
        .map(|&b| if is_printable(b) { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use libretro_plugin::LogConfig;

    use super::*;

    fn quiet_logger(dir: &tempfile::TempDir) -> Logger {
        Logger::new(LogConfig {
            path: dir.path().join("core.log"),
            echo_stderr: false,
        })
    }

    #[test]
    fn printable_glyph_sets_pixels_inside_its_cell() {
        let mut fb = Framebuffer::new();
        draw_char(&mut fb, 16, 8, b'A', Rgb565::WHITE).unwrap();

        let lit = fb.count(Rgb565::WHITE);
        assert!(lit > 0);
        let mut inside = 0;
        for y in 8..16 {
            for x in 16..24 {
                if fb.pixel(x, y) == Some(Rgb565::WHITE) {
                    inside += 1;
                }
            }
        }
        assert_eq!(inside, lit);
    }

    #[test]
    fn space_draws_nothing() {
        let mut fb = Framebuffer::new();
        draw_char(&mut fb, 0, 0, b' ', Rgb565::WHITE).unwrap();
        assert!(fb.is_blank());
    }

    #[test]
    fn control_byte_is_rejected_and_logged() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = quiet_logger(&dir);
        let mut fb = Framebuffer::new();

        assert_eq!(
            draw_char(&mut fb, 0, 0, 20, Rgb565::WHITE),
            Err(GlyphError::Unprintable(20))
        );
        assert_eq!(
            draw_char(&mut fb, 0, 0, 127, Rgb565::WHITE),
            Err(GlyphError::Unprintable(127))
        );

        draw_text(&mut fb, &mut log, 0, 0, &[20], Rgb565::WHITE);
        assert!(fb.is_blank());
        let text = std::fs::read_to_string(dir.path().join("core.log")).unwrap();
        assert_eq!(text, "[WARN] Invalid character: 0x14\n");
    }

    #[test]
    fn glyphs_are_clipped_at_the_edge() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = quiet_logger(&dir);
        let mut fb = Framebuffer::new();

        draw_text(&mut fb, &mut log, 316, 236, b"MM", Rgb565::WHITE);
        assert!(fb.count(Rgb565::WHITE) > 0);
        assert!(!dir.path().join("core.log").exists());
    }

    #[test]
    fn text_advances_eight_pixels_per_byte() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = quiet_logger(&dir);
        let mut single = Framebuffer::new();
        let mut gapped = Framebuffer::new();

        draw_text(&mut single, &mut log, 0, 0, b"I", Rgb565::WHITE);
        draw_text(&mut gapped, &mut log, 0, 0, b"\tI", Rgb565::WHITE);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(single.pixel(x, y), gapped.pixel(x + 8, y));
            }
        }
    }

    #[test]
    fn preview_replaces_unprintable_bytes() {
        assert_eq!(sanitize_preview(b"print('hi')\r\n", 63), "print('hi')..");
        assert_eq!(sanitize_preview(&[0x00, b'a', 0xFF, 0x7F], 63), ".a..");

        let long = vec![b'x'; 100];
        assert_eq!(sanitize_preview(&long, 63).len(), 63);
        assert_eq!(sanitize_preview(&[], 63), "");
    }
}
