//! Zip content holding a `script.lua` entry.
//!
//! Only the path and the entry's uncompressed size are kept. The archive is
//! reopened whenever the script bytes are needed.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::config::{CONTENT_EXTENSION, SCRIPT_ENTRY, STATUS_LEN};
use crate::error::{ArchiveError, LoadError};
use crate::text::sanitize_preview;

/// One central-directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
}

impl ArchiveEntry {
    pub fn is_script(&self) -> bool {
        is_script_name(&self.name)
    }
}

fn is_script_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(SCRIPT_ENTRY)
}

type Zip = ZipArchive<BufReader<File>>;

/// Upper bound on the buffer reserved up front for the script. The declared
/// size comes from the archive itself.
const READ_RESERVE_LIMIT: usize = 64 * 1024;

fn open_zip(path: &Path) -> Result<Zip, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(BufReader::new(file)).map_err(|source| ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts `.zip` in any letter case.
pub fn check_extension(path: &Path) -> Result<(), LoadError> {
    let extension = path
        .extension()
        .ok_or(LoadError::MissingExtension)?
        .to_string_lossy();

    if extension.eq_ignore_ascii_case(CONTENT_EXTENSION) {
        Ok(())
    } else {
        Err(LoadError::UnsupportedExtension(extension.into_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptArchive {
    path: PathBuf,
    script_size: u64,
}

impl ScriptArchive {
    /// Validates `path` and scans the central directory for the script.
    ///
    /// `on_entry` sees every entry up to and including the match. Entries
    /// whose record cannot be read are skipped.
    pub fn open(
        path: impl Into<PathBuf>,
        mut on_entry: impl FnMut(&ArchiveEntry),
    ) -> Result<Self, LoadError> {
        let path = path.into();
        check_extension(&path)?;
        let mut zip = open_zip(&path).map_err(LoadError::Open)?;

        for index in 0..zip.len() {
            let Ok(file) = zip.by_index_raw(index) else {
                continue;
            };
            let entry = ArchiveEntry {
                name: file.name().to_string(),
                size: file.size(),
            };
            on_entry(&entry);

            if entry.is_script() {
                return Ok(Self {
                    path,
                    script_size: entry.size,
                });
            }
        }

        Err(LoadError::ScriptNotFound(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Uncompressed size of the script recorded at load time.
    pub fn script_size(&self) -> u64 {
        self.script_size
    }

    /// Reopens the archive and extracts the script.
    pub fn read_script(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut zip = open_zip(&self.path)?;
        let index = (0..zip.len())
            .find(|&i| {
                zip.by_index_raw(i)
                    .is_ok_and(|file| is_script_name(file.name()))
            })
            .ok_or_else(|| ArchiveError::ScriptNotFound(self.path.clone()))?;

        let mut file = zip.by_index(index).map_err(|source| ArchiveError::Zip {
            path: self.path.clone(),
            source,
        })?;
        let reserve = usize::try_from(file.size())
            .unwrap_or(usize::MAX)
            .min(READ_RESERVE_LIMIT);
        let mut bytes = Vec::with_capacity(reserve);
        file.read_to_end(&mut bytes)
            .map_err(|source| ArchiveError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(bytes)
    }

    /// Printable excerpt of the script's first bytes.
    pub fn preview(&self) -> Result<String, ArchiveError> {
        Ok(sanitize_preview(&self.read_script()?, STATUS_LEN))
    }

    /// `ZIP: <path>` cut to the status line length.
    pub fn status_line(&self) -> Vec<u8> {
        let mut line = format!("ZIP: {}", self.path.display()).into_bytes();
        line.truncate(STATUS_LEN);
        line
    }
}
