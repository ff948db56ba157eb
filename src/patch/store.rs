//! Line store: load a file as ordered lines and write them back.
//!
//! Files are treated as ISO-8859-1: every byte maps to the code point of the
//! same value, so arbitrary bytes survive a load/save cycle unchanged.

use crate::error::PatchError;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered lines of one file plus whether the file ended with a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    pub lines: Vec<String>,
    pub trailing_newline: bool,
}

impl LineSequence {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: false,
        }
    }

    /// Split decoded text into lines. `\r\n` and `\n` both terminate a line.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let trailing_newline = text.ends_with('\n');
        let body = if trailing_newline {
            &text[..text.len() - 1]
        } else {
            text
        };
        let lines = body
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Join lines with single `\n` separators, adding a final newline only if
    /// the source had one.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Load a file as Latin-1 text.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| PatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&decode_latin1(&bytes)))
    }

    /// Save to disk atomically
    ///
    /// Writes a temporary file beside the real target and renames it over the
    /// target, so a failed write leaves the previous contents in place.
    /// Symlinks are followed and the target's permissions are kept.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PatchError> {
        let path = path.as_ref();
        let bytes = encode_latin1(&self.render());
        let write_error = |source: std::io::Error| PatchError::Write {
            path: path.to_path_buf(),
            source,
        };

        let target = if path.exists() {
            fs::canonicalize(path).map_err(write_error)?
        } else {
            path.to_path_buf()
        };
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

        let temp_path = temp_path_for(&target);
        fs::write(&temp_path, &bytes).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            write_error(source)
        })?;

        if let Some(permissions) = permissions {
            fs::set_permissions(&temp_path, permissions).map_err(|source| {
                let _ = fs::remove_file(&temp_path);
                write_error(source)
            })?;
        }

        fs::rename(&temp_path, &target).map_err(|source| {
            // Clean up temp file on error
            let _ = fs::remove_file(&temp_path);
            write_error(source)
        })?;

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".replconf.tmp");
    path.with_file_name(name)
}

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Chars outside Latin-1 are written as `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
