//! Line-oriented file I/O
//!
//! Every call opens the file, does its work, and drops the handle before
//! returning. Nothing is cached between calls.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::TrackerError;

/// Append one line (a newline is added) to a file, creating it and its
/// parent directory if needed
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), TrackerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            TrackerError::Storage(format!("Failed to open {} for append: {}", path.display(), e))
        })?;

    // One write call per record keeps the line contiguous in the common case
    let mut writer = BufWriter::new(file);
    let mut record = String::with_capacity(line.len() + 1);
    record.push_str(line);
    record.push('\n');

    writer
        .write_all(record.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| TrackerError::Storage(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read all lines of a file as raw bytes, or `None` if it doesn't exist.
///
/// Lines are split on `\n` only and not decoded, so one line with invalid
/// UTF-8 does not make the rest unreadable.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Option<Vec<Vec<u8>>>, TrackerError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(TrackerError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    BufReader::new(file)
        .split(b'\n')
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|e| TrackerError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}
