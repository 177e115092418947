//! The multi-file line reader: a stream cursor over every file under a
//! directory, plus the advisory total-record counter.

use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::discover::discover;
use crate::error::ReaderError;
use crate::record::Record;
use crate::source::{resolve_encoding, LineSource};
use crate::Result;

/// Sequential reader over every line of every regular file under a root
/// directory.
///
/// Files are discovered recursively at [`open`](Self::open) and streamed in
/// discovery order; each line becomes a [`Record`] with a global sequence
/// number and a source identifier naming the file it came from. The caller
/// drives the lifecycle `open` → (`has_next` / `read_next`)* → `close`;
/// calls outside that order fail with [`ReaderError::InvalidState`].
///
/// # Example
///
/// ```rust
/// use linereclib::MultiFileLineReader;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.txt"), "x\ny\n").unwrap();
///
/// let mut reader = MultiFileLineReader::new(dir.path());
/// reader.open().unwrap();
/// while reader.has_next().unwrap() {
///     let record = reader.read_next().unwrap();
///     println!("{}: {}", record.sequence, record.line);
/// }
/// reader.close().unwrap();
/// ```
#[derive(Debug)]
pub struct MultiFileLineReader {
    root: PathBuf,
    encoding: &'static Encoding,
    state: State,
}

#[derive(Debug)]
enum State {
    Unopened,
    Opened(Cursor),
    Closed,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Unopened => "unopened",
            State::Opened(_) => "already open",
            State::Closed => "closed",
        }
    }
}

/// Mutable traversal state of one open session: the open handles, which
/// one is current, and the running sequence number. Owned exclusively by
/// the reader; torn down on `close`.
#[derive(Debug)]
struct Cursor {
    root: PathBuf,
    root_display: PathBuf,
    sources: Vec<LineSource>,
    current: usize,
    sequence: u64,
}

impl Cursor {
    /// True iff the current handle has an unread line or a later handle
    /// exists. A later handle may itself be empty; `read_next` resolves
    /// that by skipping ahead.
    fn has_next(&mut self) -> Result<bool> {
        if self.sources[self.current].has_line()? {
            return Ok(true);
        }
        Ok(self.current + 1 < self.sources.len())
    }

    fn read_next(&mut self) -> Result<Record> {
        loop {
            if let Some(line) = self.sources[self.current].next_line()? {
                self.sequence += 1;
                let source = self.source_identifier(self.current);
                return Ok(Record::new(self.sequence, source, line));
            }

            if self.current + 1 < self.sources.len() {
                self.current += 1;
            } else {
                return Err(ReaderError::NoMoreRecords);
            }
        }
    }

    /// Provenance string for one handle: absolute root plus the file's
    /// path relative to the root. Stable for the handle across the whole
    /// open session.
    fn source_identifier(&self, index: usize) -> String {
        let path = self.sources[index].path();
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        format!("{}::{}", self.root_display.display(), relative.display())
    }

    /// Release every handle, continuing past individual failures and
    /// reporting the first one encountered.
    fn release(self) -> Result<()> {
        let mut first_err: Option<io::Error> = None;
        for source in self.sources {
            if let Err(e) = source.close() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl MultiFileLineReader {
    /// Create a reader over `root` decoding lines as UTF-8.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            encoding: encoding_rs::UTF_8,
            state: State::Unopened,
        }
    }

    /// Create a reader over `root` decoding lines with the named encoding
    /// (any WHATWG label, e.g. "shift_jis", "latin1").
    pub fn with_encoding(root: impl Into<PathBuf>, encoding_label: &str) -> Result<Self> {
        let encoding = resolve_encoding(encoding_label)?;
        Ok(Self {
            root: root.into(),
            encoding,
            state: State::Unopened,
        })
    }

    /// The root directory this reader streams from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical name of the encoding used to decode lines.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Discover the file set and open a handle per file, in discovery
    /// order.
    ///
    /// Fails with [`ReaderError::NoDataSource`] if the directory holds no
    /// files at all (an individual empty file is legal and contributes
    /// zero records), and with [`ReaderError::SourceOpen`] naming the
    /// specific file if any discovered file cannot be opened; in that
    /// case the handles opened so far are released before the error
    /// propagates.
    pub fn open(&mut self) -> Result<()> {
        if !matches!(self.state, State::Unopened) {
            return Err(ReaderError::InvalidState {
                operation: "open",
                state: self.state.name(),
            });
        }

        let files = discover(&self.root)?;
        if files.is_empty() {
            return Err(ReaderError::NoDataSource(self.root.clone()));
        }

        // On a partial open failure the vec built so far is dropped while
        // the error propagates, releasing every handle opened in this call.
        let mut sources = Vec::with_capacity(files.len());
        for file in &files {
            sources.push(LineSource::open(file, self.encoding)?);
        }

        let root_display =
            std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone());

        self.state = State::Opened(Cursor {
            root: self.root.clone(),
            root_display,
            sources,
            current: 0,
            sequence: 0,
        });
        Ok(())
    }

    /// True iff another record can be read. A non-consuming peek; must be
    /// checked before each [`read_next`](Self::read_next).
    pub fn has_next(&mut self) -> Result<bool> {
        self.cursor_mut("poll")?.has_next()
    }

    /// Read the next record, advancing past empty files as needed.
    ///
    /// Contract: [`has_next`](Self::has_next) returned true. Calling past
    /// the end fails with [`ReaderError::NoMoreRecords`], which is a
    /// caller bug, not an environmental failure.
    pub fn read_next(&mut self) -> Result<Record> {
        self.cursor_mut("read")?.read_next()
    }

    /// Release every handle of the open session.
    ///
    /// Safe to call more than once (later calls are no-ops) and before
    /// `open` (nothing to release). A failure releasing one handle does
    /// not prevent releasing the rest; the first failure is reported.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Opened(cursor) => cursor.release(),
            State::Unopened => {
                self.state = State::Unopened;
                Ok(())
            }
            State::Closed => Ok(()),
        }
    }

    /// Count every line under the root with throwaway scanners, without
    /// touching the live session. Callable before, during, or after a
    /// read session.
    ///
    /// Counting is advisory and all-or-nothing: if discovery fails or any
    /// file cannot be opened and scanned, the count is reported as
    /// unavailable (`None`) rather than as a partial number.
    pub fn count_total_records(&self) -> Option<u64> {
        let files = match discover(&self.root) {
            Ok(files) => files,
            Err(e) => {
                tracing::debug!(error = %e, "unable to calculate total record count");
                return None;
            }
        };

        let mut total = 0u64;
        for file in &files {
            match count_lines(file, self.encoding) {
                Ok(lines) => total += lines,
                Err(e) => {
                    tracing::debug!(
                        path = %file.display(),
                        error = %e,
                        "unable to calculate total record count"
                    );
                    return None;
                }
            }
        }
        Some(total)
    }

    /// Iterate the remaining records. Sugar over the
    /// `has_next`/`read_next` pair for `for`-loop consumption; the caller
    /// still owns `close`.
    pub fn records(&mut self) -> Records<'_> {
        Records { reader: self }
    }

    fn cursor_mut(&mut self, operation: &'static str) -> Result<&mut Cursor> {
        match &mut self.state {
            State::Opened(cursor) => Ok(cursor),
            other => Err(ReaderError::InvalidState {
                operation,
                state: other.name(),
            }),
        }
    }
}

/// Iterator over the remaining records of an open session.
pub struct Records<'a> {
    reader: &'a mut MultiFileLineReader,
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.has_next() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
        }
        match self.reader.read_next() {
            Ok(record) => Some(Ok(record)),
            // has_next can answer true when only empty files remain;
            // that is end-of-stream, not an error, for iteration.
            Err(ReaderError::NoMoreRecords) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Count the lines of one file with a scanner scoped to this call; the
/// handle is released on every exit path, including open failure.
fn count_lines(path: &Path, encoding: &'static Encoding) -> Result<u64> {
    let mut source = LineSource::open(path, encoding)?;
    let mut lines = 0u64;
    while source.next_line()?.is_some() {
        lines += 1;
    }
    Ok(lines)
}
