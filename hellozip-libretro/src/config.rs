//! Fixed parameters of the core.

use libretro_plugin::Geometry;

pub const LIBRARY_NAME: &str = "Hello World Core Rom";
pub const LIBRARY_VERSION: &str = "1.0";
pub const CONTENT_EXTENSION: &str = "zip";

pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
pub const FRAMES_PER_SECOND: f64 = 60.0;
pub const SAMPLE_RATE: f64 = 48000.0;

pub const SQUARE_SIZE: usize = 20;

/// Entry looked up in the loaded archive, compared ASCII case-insensitively.
pub const SCRIPT_ENTRY: &str = "script.lua";

/// Longest text line drawn for the archive path and the script preview.
pub const STATUS_LEN: usize = 63;

pub const GREETING: &str = "Hello World";
pub const LOADED_MESSAGE: &str = "Loaded ZIP with script.lua";

pub const GREETING_POS: (i32, i32) = (50, 50);
pub const PATH_POS: (i32, i32) = (50, 100);
pub const PREVIEW_POS: (i32, i32) = (50, 120);

pub fn geometry() -> Geometry {
    Geometry::fixed(WIDTH as u32, HEIGHT as u32)
}
