//! Capabilities a frontend hands to a core.
//!
//! Each registration callback of the libretro API maps onto one trait here.
//! A [`Host`] holds whichever of them the frontend has provided so far; an
//! absent capability is `None` and cores are expected to skip the matching
//! behavior.

use std::path::PathBuf;

use crate::logging::{LogConfig, LogSink, Logger};
use crate::{JoypadButton, JoypadState, PixelFormat};

/// Receives finished frames.
pub trait VideoSink: Send {
    /// `frame` holds `height` rows of `pitch` bytes each.
    fn refresh(&mut self, frame: &[u8], width: u32, height: u32, pitch: usize);
}

pub trait InputSource: Send {
    /// Latches the input state for the current frame.
    fn poll(&mut self);

    fn pressed(&mut self, port: u32, button: JoypadButton) -> bool;

    /// Queries every button in `mask` on `port`, d-pad first.
    fn joypad(&mut self, port: u32, mask: JoypadState) -> JoypadState {
        let others = JoypadButton::ALL
            .into_iter()
            .filter(|button| !button.is_direction());
        JoypadButton::DPAD
            .into_iter()
            .chain(others)
            .filter(|button| mask.contains(button.flag()))
            .filter(|button| self.pressed(port, *button))
            .map(JoypadButton::flag)
            .collect()
    }
}

/// The environment channel used to negotiate with the frontend.
pub trait Environment: Send {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool;

    /// Tells the frontend whether the core can run without content.
    fn set_support_no_game(&mut self, supported: bool) -> bool;

    fn log_interface(&mut self) -> Option<Box<dyn LogSink>>;

    /// Asks the frontend to shut the core down.
    fn shutdown(&mut self) -> bool;
}

/// Everything a core can reach on the frontend side.
#[derive(Debug, Default)]
pub struct Host {
    pub video: Option<Box<dyn VideoSink>>,
    pub input: Option<Box<dyn InputSource>>,
    pub environment: Option<Box<dyn Environment>>,
    pub log: Logger,
}

impl Host {
    pub fn new(log_config: LogConfig) -> Self {
        Self {
            video: None,
            input: None,
            environment: None,
            log: Logger::new(log_config),
        }
    }

    pub fn with_video(mut self, video: impl VideoSink + 'static) -> Self {
        self.video = Some(Box::new(video));
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Some(Box::new(environment));
        self
    }
}

impl std::fmt::Debug for dyn VideoSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VideoSink")
    }
}

impl std::fmt::Debug for dyn InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("InputSource")
    }
}

impl std::fmt::Debug for dyn Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Environment")
    }
}

/// Content handed to `retro_load_game`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameInfo<'a> {
    pub path: Option<PathBuf>,
    pub data: Option<&'a [u8]>,
    pub meta: Option<String>,
}

impl<'a> GameInfo<'a> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }
}
