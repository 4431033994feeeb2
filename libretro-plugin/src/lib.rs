//! Building blocks for libretro cores written in Rust.
//!
//! A core implements [`LibretroCore`] and annotates the impl block with
//! [`libretro_core`], which exports every `retro_*` symbol the frontend
//! expects and routes them to a single process-wide [`ffi::Context`].

mod host;
mod joypad;
mod logging;
mod metadata;
mod pixel_format;

pub mod ffi;
pub mod sys;

pub use host::*;
pub use joypad::*;
pub use libretro_procmacro::libretro_core;
pub use logging::*;
pub use metadata::*;
pub use pixel_format::*;
pub use parking_lot;
pub use tracing::Level;

/// A libretro core driven by the frontend through its lifecycle callbacks.
///
/// Every method receives the [`Host`] so the core can reach the frontend's
/// capabilities. The defaults decline the optional parts of the API.
pub trait LibretroCore: Default + Send + 'static {
    fn system_info() -> SystemInfo;
    fn av_info() -> AvInfo;

    /// Called after every `retro_set_environment`, including with a null
    /// callback (then `host.environment` is `None`).
    fn environment_changed(&mut self, _host: &mut Host) {}

    fn init(&mut self, host: &mut Host);
    fn deinit(&mut self, host: &mut Host);
    fn reset(&mut self, host: &mut Host);

    fn load_game(&mut self, host: &mut Host, game: Option<&GameInfo>) -> bool;
    fn unload_game(&mut self, host: &mut Host);

    /// Produces one frame.
    fn run(&mut self, host: &mut Host);

    fn set_controller_port_device(&mut self, host: &mut Host, port: u32, device: u32) {
        host.log.debug(format_args!(
            "Controller port device set: port={port}, device={device}"
        ));
    }

    fn load_game_special(&mut self, host: &mut Host, game_type: u32, _games: &[GameInfo]) -> bool {
        host.log.debug(format_args!(
            "retro_load_game_special called with type {game_type} (unsupported)"
        ));
        false
    }

    fn region(&mut self, host: &mut Host) -> Region {
        host.log.debug("Region: NTSC");
        Region::Ntsc
    }

    fn serialize_size(&mut self, host: &mut Host) -> usize {
        host.log.debug("Serialize size: 0");
        0
    }

    fn serialize(&mut self, host: &mut Host, _buffer: &mut [u8]) -> bool {
        host.log.debug("Serialize called (unsupported)");
        false
    }

    fn unserialize(&mut self, host: &mut Host, _data: &[u8]) -> bool {
        host.log.debug("Unserialize called (unsupported)");
        false
    }

    fn cheat_reset(&mut self, host: &mut Host) {
        host.log.debug("Cheat reset (unsupported)");
    }

    fn cheat_set(&mut self, host: &mut Host, index: u32, enabled: bool, code: Option<&str>) {
        host.log.debug(format_args!(
            "Cheat set: index={index}, enabled={enabled}, code={} (unsupported)",
            code.unwrap_or("")
        ));
    }

    fn memory_data(&mut self, host: &mut Host, id: u32) -> Option<&mut [u8]> {
        host.log.debug(format_args!("Memory data: id={id} (unsupported)"));
        None
    }

    fn memory_size(&mut self, host: &mut Host, id: u32) -> usize {
        host.log.debug(format_args!("Memory size: id={id} (unsupported)"));
        0
    }
}
