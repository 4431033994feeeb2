use std::ffi::c_uint;

use serde::Serialize;

use crate::sys;

/// Framebuffer encodings a core can negotiate with the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PixelFormat {
    ZeroRgb1555,
    Xrgb8888,
    Rgb565,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::ZeroRgb1555 | PixelFormat::Rgb565 => 2,
            PixelFormat::Xrgb8888 => 4,
        }
    }

    pub fn as_raw(self) -> c_uint {
        match self {
            PixelFormat::ZeroRgb1555 => sys::RETRO_PIXEL_FORMAT_0RGB1555,
            PixelFormat::Xrgb8888 => sys::RETRO_PIXEL_FORMAT_XRGB8888,
            PixelFormat::Rgb565 => sys::RETRO_PIXEL_FORMAT_RGB565,
        }
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        // libretro's implicit format when a core never negotiates one
        Self::ZeroRgb1555
    }
}
