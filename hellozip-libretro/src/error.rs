use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons `retro_load_game` declines content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Null game info provided")]
    MissingDescriptor,

    #[error("No game path provided")]
    MissingPath,

    #[error("No file extension found")]
    MissingExtension,

    #[error("Only ZIP files are supported, got: .{0}")]
    UnsupportedExtension(String),

    #[error("Failed to open ZIP: {0}")]
    Open(#[source] ArchiveError),

    #[error("No script.lua found in ZIP: {}", .0.display())]
    ScriptNotFound(PathBuf),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{}: no script.lua entry", .0.display())]
    ScriptNotFound(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("Invalid character: {0:#04x}")]
    Unprintable(u8),
}
