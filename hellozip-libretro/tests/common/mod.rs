#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libretro_plugin::parking_lot::Mutex;
use libretro_plugin::*;
use zip::write::SimpleFileOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
}

#[derive(Clone, Default)]
pub struct RecordingVideo(pub Arc<Mutex<Vec<Frame>>>);

impl RecordingVideo {
    pub fn frames(&self) -> Vec<Frame> {
        self.0.lock().clone()
    }
}

impl VideoSink for RecordingVideo {
    fn refresh(&mut self, frame: &[u8], width: u32, height: u32, pitch: usize) {
        self.0.lock().push(Frame {
            bytes: frame.to_vec(),
            width,
            height,
            pitch,
        });
    }
}

/// Reports whatever buttons the test last set.
#[derive(Clone, Default)]
pub struct ScriptedInput {
    pub held: Arc<Mutex<JoypadState>>,
    pub polls: Arc<AtomicUsize>,
}

impl ScriptedInput {
    pub fn hold(&self, buttons: JoypadState) {
        *self.held.lock() = buttons;
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) {
        self.polls.fetch_add(1, Ordering::SeqCst);
    }

    fn pressed(&mut self, _port: u32, button: JoypadButton) -> bool {
        self.held.lock().contains(button.flag())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLog(pub Arc<Mutex<Vec<(Level, String)>>>);

impl RecordingLog {
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.0
            .lock()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl LogSink for RecordingLog {
    fn log(&mut self, level: Level, message: &str) {
        self.0.lock().push((level, message.to_string()));
    }
}

#[derive(Clone)]
pub struct FakeEnvironment {
    pub accept_pixel_format: bool,
    pub log: Option<RecordingLog>,
    pub pixel_formats: Arc<Mutex<Vec<PixelFormat>>>,
    pub support_no_game: Arc<Mutex<Option<bool>>>,
    pub shutdowns: Arc<AtomicUsize>,
}

impl FakeEnvironment {
    pub fn new(log: Option<RecordingLog>) -> Self {
        Self {
            accept_pixel_format: true,
            log,
            pixel_formats: Arc::default(),
            support_no_game: Arc::default(),
            shutdowns: Arc::default(),
        }
    }
}

impl Environment for FakeEnvironment {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        self.pixel_formats.lock().push(format);
        self.accept_pixel_format
    }

    fn set_support_no_game(&mut self, supported: bool) -> bool {
        *self.support_no_game.lock() = Some(supported);
        true
    }

    fn log_interface(&mut self) -> Option<Box<dyn LogSink>> {
        self.log
            .clone()
            .map(|log| Box::new(log) as Box<dyn LogSink>)
    }

    fn shutdown(&mut self) -> bool {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        true
    }
}

/// A host that logs to `dir/core.log` without echoing to stderr.
pub fn quiet_host(dir: &Path) -> Host {
    Host::new(LogConfig {
        path: dir.join("core.log"),
        echo_stderr: false,
    })
}

pub fn read_log(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("core.log")).unwrap_or_default()
}

pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (entry, data) in entries {
        writer
            .start_file(*entry, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
    path
}
