//! Program Image Loader.
//!
//! This module reads LS-8 program images. It performs:
//! 1. **Parsing:** One byte per line as a binary literal (`10000010`), with
//!    `#` starting a comment and blank lines skipped.
//! 2. **File loading:** Reads an image from disk, telling a missing file apart
//!    from other I/O failures so the caller can report them differently.
//!
//! Image size is not checked here; [`Machine::load`](crate::Machine::load)
//! rejects images that do not fit in memory.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::common::LoadError;

/// Comment marker; everything after it on a line is ignored.
const COMMENT_MARKER: char = '#';

/// Maximum number of binary digits in a byte literal.
const MAX_DIGITS: usize = 8;

/// Parses the text of a program image.
///
/// # Arguments
///
/// * `text` - The image, one binary byte literal per line.
///
/// # Returns
///
/// The decoded bytes, in file order.
///
/// # Errors
///
/// [`LoadError::InvalidImageFormat`] for the first line whose code part is
/// not 1 to 8 binary digits.
///
/// # Examples
///
/// ```
/// use ls8_core::sim::loader::parse_image;
///
/// let text = "# print8\n10000010 # LDI R0,8\n00000000\n00001000\n\n00000001\n";
/// assert_eq!(parse_image(text).unwrap(), vec![0b10000010, 0, 8, 1]);
/// ```
pub fn parse_image(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let code = line
            .split_once(COMMENT_MARKER)
            .map_or(line, |(code, _)| code)
            .trim();
        if code.is_empty() {
            continue;
        }

        let byte = parse_byte(code).ok_or_else(|| LoadError::InvalidImageFormat {
            line: number + 1,
            content: code.to_owned(),
        })?;
        bytes.push(byte);
    }

    Ok(bytes)
}

/// Parses a binary literal of 1 to 8 digits.
fn parse_byte(code: &str) -> Option<u8> {
    if code.len() > MAX_DIGITS || !code.bytes().all(|b| matches!(b, b'0' | b'1')) {
        return None;
    }
    u8::from_str_radix(code, 2).ok()
}

/// Reads and parses a program image from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// * [`LoadError::FileNotFound`] if the file does not exist.
/// * [`LoadError::Io`] for any other read failure.
/// * [`LoadError::InvalidImageFormat`] as for [`parse_image`], and for the
///   first line that is not valid UTF-8.
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = std::str::from_utf8(&raw).map_err(|e| non_utf8_line(&raw, e.valid_up_to()))?;

    let bytes = parse_image(text)?;
    debug!(path = %path.display(), bytes = bytes.len(), "image parsed");
    Ok(bytes)
}

/// Reports the line holding the first invalid UTF-8 sequence, which starts at `bad`.
fn non_utf8_line(raw: &[u8], bad: usize) -> LoadError {
    let (before, after) = raw.split_at(bad);
    let start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let end = after.iter().position(|&b| b == b'\n').map_or(raw.len(), |i| bad + i);

    LoadError::InvalidImageFormat {
        line: before.iter().filter(|&&b| b == b'\n').count() + 1,
        content: String::from_utf8_lossy(&raw[start..end]).trim().to_owned(),
    }
}
