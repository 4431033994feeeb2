//! Log routing for cores.
//!
//! Records go to the frontend's log interface once one has been obtained.
//! Until then (or when the frontend has none) they are appended to a local
//! file and echoed to stderr. Every record is also emitted as a `tracing`
//! event so a Rust host with a subscriber installed sees it too.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::Level;

/// Destination for log records provided by the frontend.
pub trait LogSink: Send {
    fn log(&mut self, level: Level, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// File used when the frontend provides no log interface.
    pub path: PathBuf,
    pub echo_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("core.log"),
            echo_stderr: true,
        }
    }
}

/// Append-only fallback log, opened on first write.
#[derive(Debug)]
pub struct FileLog {
    config: LogConfig,
    file: Option<File>,
}

impl FileLog {
    pub fn new(config: LogConfig) -> Self {
        Self { config, file: None }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn write(&mut self, level: Level, message: &str) {
        if self.file.is_none() {
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.config.path)
            {
                Ok(file) => self.file = Some(file),
                Err(err) => {
                    eprintln!(
                        "[ERROR] Failed to open {}: {}",
                        self.config.path.display(),
                        err
                    );
                    return;
                }
            }
        }

        if let Some(file) = self.file.as_mut() {
            // A failing log write has nowhere better to be reported.
            let _ = writeln!(file, "[{level}] {message}").and_then(|_| file.flush());
        }
        if self.config.echo_stderr {
            eprintln!("[{level}] {message}");
        }
    }

    pub fn close(&mut self) {
        self.file = None;
    }
}

pub struct Logger {
    sink: Option<Box<dyn LogSink>>,
    fallback: FileLog,
}

impl Logger {
    pub fn new(config: LogConfig) -> Self {
        Self {
            sink: None,
            fallback: FileLog::new(config),
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn LogSink>) {
        self.sink = Some(sink);
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn fallback(&self) -> &FileLog {
        &self.fallback
    }

    /// Closes the fallback file. A later record reopens it.
    pub fn close(&mut self) {
        self.fallback.close();
    }

    pub fn log(&mut self, level: Level, message: impl Display) {
        let message = message.to_string();

        if level == Level::ERROR {
            tracing::error!(target: "libretro", "{message}");
        } else if level == Level::WARN {
            tracing::warn!(target: "libretro", "{message}");
        } else if level == Level::INFO {
            tracing::info!(target: "libretro", "{message}");
        } else {
            tracing::debug!(target: "libretro", "{message}");
        }

        match self.sink.as_mut() {
            Some(sink) => sink.log(level, &message),
            None => self.fallback.write(level, &message),
        }
    }

    pub fn debug(&mut self, message: impl Display) {
        self.log(Level::DEBUG, message)
    }

    pub fn info(&mut self, message: impl Display) {
        self.log(Level::INFO, message)
    }

    pub fn warn(&mut self, message: impl Display) {
        self.log(Level::WARN, message)
    }

    pub fn error(&mut self, message: impl Display) {
        self.log(Level::ERROR, message)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}
