//! # linereclib
//!
//! A sequential multi-file line-record reader: point it at a directory and
//! it streams every line of every regular file underneath, across file
//! boundaries, as sequence-numbered records with provenance.
//!
//! ## Overview
//!
//! - **Discovery**: the directory tree is walked recursively once, at
//!   `open`, producing a fixed ordered file set for the session.
//! - **Stream cursor**: one open handle per file; the cursor advances to
//!   the next file transparently when the current one runs out, so the
//!   caller never needs to know how many files exist.
//! - **Total counter**: an independent, advisory count of every line under
//!   the root, all-or-nothing: it reports "unavailable" rather than a
//!   partial number.
//!
//! Reading is single-threaded, synchronous, and blocking; the reader owns
//! its handles exclusively for the duration of an open session.
//!
//! ## Example
//!
//! ```rust
//! use linereclib::MultiFileLineReader;
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "x\ny\n").unwrap();
//! fs::write(dir.path().join("b.txt"), "z\n").unwrap();
//!
//! let mut reader = MultiFileLineReader::new(dir.path());
//! assert_eq!(reader.count_total_records(), Some(3));
//!
//! reader.open().unwrap();
//! let mut lines = Vec::new();
//! while reader.has_next().unwrap() {
//!     lines.push(reader.read_next().unwrap().line);
//! }
//! reader.close().unwrap();
//!
//! lines.sort();
//! assert_eq!(lines, vec!["x", "y", "z"]);
//! ```

pub mod discover;
pub mod error;
pub mod reader;
pub mod record;
mod source;

pub use discover::discover;
pub use error::ReaderError;
pub use reader::{MultiFileLineReader, Records};
pub use record::Record;

/// Result type for linereclib operations
pub type Result<T> = std::result::Result<T, ReaderError>;
