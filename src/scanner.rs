use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sequential access to the non-blank lines of a narrative log.
pub trait LineSource {
    /// The next non-blank line, trimmed, with its 1-based line number.
    /// `None` once the input is exhausted.
    fn next_line(&mut self) -> Result<Option<(usize, String)>>;
}

pub struct LineScanner<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }
}

impl LineScanner<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> LineSource for LineScanner<R> {
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if !line.is_empty() {
                return Ok(Some((self.line_number, line.to_string())));
            }
        }
    }
}
