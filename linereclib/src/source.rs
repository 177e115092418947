//! Per-file line scanning with a one-line lookahead.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::ReaderError;
use crate::Result;

/// Resolve an encoding label (e.g. "utf-8", "shift_jis", "latin1") to an
/// encoding, or reject it as a configuration problem.
///
/// Labels are matched per the WHATWG Encoding Standard, so the usual
/// aliases ("utf8", "iso-8859-1", "cp1252", ...) all resolve.
pub(crate) fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ReaderError::UnknownEncoding(label.to_string()))
}

/// An open, buffered, peekable line scanner over one file.
///
/// Lines are split on `\n` with a trailing `\r` stripped; a final
/// unterminated line still counts as a line, and an empty file yields no
/// lines. Bytes are decoded with the configured encoding, replacing
/// malformed input rather than failing.
#[derive(Debug)]
pub(crate) struct LineSource {
    path: PathBuf,
    encoding: &'static Encoding,
    reader: BufReader<File>,
    peeked: Option<String>,
}

impl LineSource {
    /// Open a scanner over `path`. The open failure carries the path so the
    /// reader can name the offending file.
    pub(crate) fn open(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let file = File::open(path).map_err(|e| ReaderError::SourceOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            encoding,
            reader: BufReader::new(file),
            peeked: None,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// True if a line is available, filling the lookahead without
    /// consuming it.
    pub(crate) fn has_line(&mut self) -> io::Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.read_line()?;
        }
        Ok(self.peeked.is_some())
    }

    /// Consume and return the next line, or `None` at end of file.
    pub(crate) fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.read_line()
    }

    /// Read one raw line from the underlying file, bypassing the lookahead.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        let n = self.reader.read_until(b'\n', &mut bytes)?;
        if n == 0 {
            return Ok(None);
        }

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        let (text, _, _) = self.encoding.decode(&bytes);
        Ok(Some(text.into_owned()))
    }

    /// Release the underlying handle. Dropping a read-only file handle
    /// cannot fail, so this always succeeds; the `Result` keeps release
    /// failures reportable at the reader's `close`.
    pub(crate) fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}
