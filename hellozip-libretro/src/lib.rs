//! Hello world libretro core.
//!
//! Shows a square steered with the d-pad and, once a zip archive containing
//! `script.lua` is loaded, the archive path and the first bytes of the script.

pub mod archive;
pub mod config;
pub mod cursor;
pub mod error;
pub mod framebuffer;
pub mod text;

use libretro_plugin::*;

use crate::archive::ScriptArchive;
use crate::config::*;
use crate::cursor::Cursor;
use crate::error::LoadError;
use crate::framebuffer::{Framebuffer, Rgb565};

#[derive(Debug, Default)]
pub struct HelloZipCore {
    framebuffer: Framebuffer,
    cursor: Cursor,
    archive: Option<ScriptArchive>,
    initialized: bool,
    environment_calls: u32,
}

impl HelloZipCore {
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn archive(&self) -> Option<&ScriptArchive> {
        self.archive.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn open_content(host: &mut Host, game: Option<&GameInfo>) -> Result<ScriptArchive, LoadError> {
        let game = game.ok_or(LoadError::MissingDescriptor)?;
        let path = game.path.as_ref().ok_or(LoadError::MissingPath)?;
        host.log.debug(format_args!("Loading game: {}", path.display()));

        ScriptArchive::open(path, |entry| {
            host.log
                .debug(format_args!("ZIP entry: {}, size: {}", entry.name, entry.size))
        })
    }

    fn handle_input(&mut self, host: &mut Host) {
        if let Some(input) = host.input.as_mut() {
            input.poll();
            let pressed = input.joypad(0, JoypadState::DIRECTIONS);
            self.cursor.step(pressed);
        }
    }

    fn draw_archive_status(&mut self, host: &mut Host) {
        let Some(archive) = self.archive.as_ref() else {
            return;
        };

        let (x, y) = PATH_POS;
        text::draw_text(
            &mut self.framebuffer,
            &mut host.log,
            x,
            y,
            &archive.status_line(),
            Rgb565::WHITE,
        );

        match archive.preview() {
            Ok(preview) => {
                let (x, y) = PREVIEW_POS;
                text::draw_text(
                    &mut self.framebuffer,
                    &mut host.log,
                    x,
                    y,
                    preview.as_bytes(),
                    Rgb565::WHITE,
                );
            }
            Err(err) => host
                .log
                .error(format_args!("Failed to reopen ZIP in retro_run: {err}")),
        }
    }

    fn present(&self, host: &mut Host) {
        match host.video.as_mut() {
            Some(video) => video.refresh(
                self.framebuffer.as_bytes(),
                WIDTH as u32,
                HEIGHT as u32,
                self.framebuffer.pitch(),
            ),
            None => host.log.error("No video callback set"),
        }
    }
}

#[libretro_core]
impl LibretroCore for HelloZipCore {
    fn system_info() -> SystemInfo {
        SystemInfo {
            library_name: LIBRARY_NAME.to_string(),
            library_version: LIBRARY_VERSION.to_string(),
            valid_extensions: vec![CONTENT_EXTENSION.to_string()],
            need_fullpath: true,
            block_extract: true,
        }
    }

    fn av_info() -> AvInfo {
        AvInfo {
            geometry: config::geometry(),
            timing: Timing {
                frames_per_second: FRAMES_PER_SECOND,
                sample_rate: SAMPLE_RATE,
            },
        }
    }

    fn environment_changed(&mut self, host: &mut Host) {
        self.environment_calls += 1;
        let Some(environment) = host.environment.as_mut() else {
            host.log.error("retro_set_environment: Null environment callback");
            return;
        };

        // Content is mandatory.
        environment.set_support_no_game(false);
        host.log.debug(format_args!(
            "retro_set_environment called (count: {})",
            self.environment_calls
        ));
    }

    fn init(&mut self, host: &mut Host) {
        self.initialized = true;
        host.log.debug("Hello World core initialized");
        self.framebuffer.clear();

        let accepted = host
            .environment
            .as_mut()
            .is_some_and(|env| env.set_pixel_format(Framebuffer::FORMAT));
        if accepted {
            host.log.debug("Pixel format set: RGB565");
        } else {
            host.log.error("Failed to set pixel format: RGB565");
            if let Some(environment) = host.environment.as_mut() {
                environment.shutdown();
            }
        }

        match host.environment.as_mut().and_then(|env| env.log_interface()) {
            Some(sink) => {
                host.log.set_sink(sink);
                host.log.debug("Logging callback initialized");
            }
            None => host.log.warn("Failed to get log interface"),
        }
    }

    fn deinit(&mut self, host: &mut Host) {
        self.archive = None;
        self.initialized = false;
        self.environment_calls = 0;
        self.cursor.reset();
        self.framebuffer.clear();
        host.log.debug("Core deinitialized");
        host.log.close();
    }

    fn reset(&mut self, host: &mut Host) {
        self.framebuffer.clear();
        self.cursor.reset();
        host.log.debug("Core reset");
    }

    fn load_game(&mut self, host: &mut Host, game: Option<&GameInfo>) -> bool {
        host.log.debug("retro_load_game started");

        match Self::open_content(host, game) {
            Ok(archive) => {
                host.log.debug(format_args!(
                    "Found script.lua in ZIP, size: {} bytes",
                    archive.script_size()
                ));
                self.framebuffer.clear();
                let (x, y) = PATH_POS;
                text::draw_text(
                    &mut self.framebuffer,
                    &mut host.log,
                    x,
                    y,
                    LOADED_MESSAGE.as_bytes(),
                    Rgb565::WHITE,
                );
                host.log.debug(format_args!(
                    "retro_load_game completed, ZIP path stored: {}",
                    archive.path().display()
                ));
                self.archive = Some(archive);
                true
            }
            Err(err) => {
                host.log.error(err);
                false
            }
        }
    }

    fn unload_game(&mut self, host: &mut Host) {
        if self.archive.take().is_some() {
            host.log.debug("ZIP path released");
        }
        host.log.debug("Game unloaded");
    }

    fn run(&mut self, host: &mut Host) {
        if !self.initialized {
            host.log.error("Core not initialized in retro_run");
            return;
        }

        self.framebuffer.clear();
        self.handle_input(host);

        self.framebuffer.fill_rect(
            self.cursor.x(),
            self.cursor.y(),
            SQUARE_SIZE,
            SQUARE_SIZE,
            Rgb565::RED,
        );

        let (x, y) = GREETING_POS;
        text::draw_text(
            &mut self.framebuffer,
            &mut host.log,
            x,
            y,
            GREETING.as_bytes(),
            Rgb565::WHITE,
        );

        self.draw_archive_status(host);
        self.present(host);
    }
}
