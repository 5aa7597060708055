//! Line counting for a single text file.
//!
//! Content is scanned character by character:
//!
//! - every `\n` is a line terminator and counts towards `line_count`
//! - a terminator counts towards `non_empty_line_count` when the character
//!   before it exists and is not itself a terminator
//! - `\r` is skipped entirely, so `\r\n` endings count the same as `\n`
//! - text after the last terminator is not a counted line
//!
//! A replacement character (`U+FFFD`) or an invalid UTF-8 sequence marks the
//! file as binary and stops the scan.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use utf8_chars::BufReadCharsExt;

use crate::Result;

/// Line totals of one text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub line_count: u64,
    pub non_empty_line_count: u64,
}

#[derive(Default)]
struct Tally {
    counts: LineCounts,
    prev: Option<char>,
}

impl Tally {
    /// Feed one character. Returns `false` once the content is known to be binary.
    fn push(&mut self, c: char) -> bool {
        match c {
            '\u{FFFD}' => return false,
            '\r' => return true,
            '\n' => {
                self.counts.line_count += 1;
                if matches!(self.prev, Some(p) if p != '\n') {
                    self.counts.non_empty_line_count += 1;
                }
            }
            _ => {}
        }
        self.prev = Some(c);
        true
    }
}

/// Count lines in an in-memory string. `None` if it is not text.
pub fn count_text(text: &str) -> Option<LineCounts> {
    let mut tally = Tally::default();
    for c in text.chars() {
        if !tally.push(c) {
            return None;
        }
    }
    Some(tally.counts)
}

/// Count lines from a reader. `Ok(None)` if the content is not text.
pub fn count_reader<R: Read>(reader: R) -> io::Result<Option<LineCounts>> {
    let mut reader = BufReader::new(reader);
    let mut tally = Tally::default();

    for c in reader.chars() {
        match c {
            Ok(c) => {
                if !tally.push(c) {
                    return Ok(None);
                }
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => return Ok(None),
            Err(e) => return Err(e),
        }
    }

    Ok(Some(tally.counts))
}

/// Count lines in a file on disk. `Ok(None)` if it is not text.
///
/// # Example
///
/// ```rust
/// use treeloclib::count_file;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("main.py");
/// fs::write(&file_path, "import os\n\nprint(os.name)\n").unwrap();
///
/// let counts = count_file(&file_path).unwrap().unwrap();
/// assert_eq!(counts.line_count, 3);
/// assert_eq!(counts.non_empty_line_count, 2);
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<Option<LineCounts>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    Ok(count_reader(file)?)
}
