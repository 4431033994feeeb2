//! Software framebuffer in RGB565.

use libretro_plugin::PixelFormat;

use crate::config::{HEIGHT, WIDTH};

/// A 16-bit color: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);

    /// Packs 8-bit channels, dropping their low bits.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Expands back to 8-bit channels.
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        let r = (self.0 >> 11) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        (r << 3, g << 2, b << 3)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<u16>,
}

impl Framebuffer {
    pub const FORMAT: PixelFormat = PixelFormat::Rgb565;

    pub fn new() -> Self {
        Self {
            pixels: vec![0; WIDTH * HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Bytes per row as handed to the video sink.
    pub fn pitch(&self) -> usize {
        WIDTH * Self::FORMAT.bytes_per_pixel()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb565::BLACK.0);
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < HEIGHT)?;
        Some(y * WIDTH + x)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        Self::index(x, y).map(|i| Rgb565(self.pixels[i]))
    }

    /// Writes one pixel. Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = color.0;
        }
    }

    /// Fills a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: usize, height: usize, color: Rgb565) {
        let x0 = x.clamp(0, WIDTH as i32) as usize;
        let y0 = y.clamp(0, HEIGHT as i32) as usize;
        let x1 = (x as i64 + width as i64).clamp(0, WIDTH as i64) as usize;
        let y1 = (y as i64 + height as i64).clamp(0, HEIGHT as i64) as usize;
        if x0 >= x1 {
            return;
        }

        for row in y0..y1 {
            self.pixels[row * WIDTH + x0..row * WIDTH + x1].fill(color.0);
        }
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Native-endian bytes of the whole buffer, `pitch()` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color.0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == Rgb565::BLACK.0)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_packs_channels() {
        assert_eq!(Rgb565::from_rgb(255, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb(0, 255, 0), Rgb565::GREEN);
        assert_eq!(Rgb565::from_rgb(0, 0, 255), Rgb565::BLUE);
        assert_eq!(Rgb565::from_rgb(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::RED.to_rgb(), (248, 0, 0));
    }

    #[test]
    fn bytes_cover_every_row() {
        let fb = Framebuffer::new();
        assert_eq!(fb.pitch(), 640);
        assert_eq!(fb.as_bytes().len(), fb.pitch() * fb.height());
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = Framebuffer::new();
        fb.fill_rect(310, 230, 20, 20, Rgb565::RED);
        assert_eq!(fb.count(Rgb565::RED), 10 * 10);
        assert_eq!(fb.pixel(319, 239), Some(Rgb565::RED));

        fb.clear();
        fb.fill_rect(-5, -5, 20, 20, Rgb565::RED);
        assert_eq!(fb.count(Rgb565::RED), 15 * 15);

        fb.clear();
        fb.fill_rect(400, 10, 20, 20, Rgb565::RED);
        assert!(fb.is_blank());
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(-1, 0, Rgb565::WHITE);
        fb.set_pixel(320, 0, Rgb565::WHITE);
        fb.set_pixel(0, 240, Rgb565::WHITE);
        assert!(fb.is_blank());
        assert_eq!(fb.pixel(320, 0), None);
    }
}
