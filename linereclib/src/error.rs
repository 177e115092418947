//! Error types for linereclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading line records
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Root path does not exist
    #[error("source directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// Root path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Root directory could not be listed
    #[error("cannot read directory '{path}': {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Encoding label not recognized by encoding_rs
    #[error("unknown encoding label: '{0}'")]
    UnknownEncoding(String),

    /// Directory exists but contains zero discoverable files
    #[error("no files to read in directory: {0}")]
    NoDataSource(PathBuf),

    /// An individual discovered file could not be opened
    #[error("failed to open source file '{path}': {source}")]
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Lifecycle method invoked out of order
    #[error("cannot {operation} a reader that is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// read_next called when has_next is false; callers must check first
    #[error("no more records; check has_next() before read_next()")]
    NoMoreRecords,

    /// IO error while reading lines
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// True for the configuration family: problems with the root path or
    /// the requested encoding, detected before any file-level work.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ReaderError::DirectoryNotFound(_)
                | ReaderError::NotADirectory(_)
                | ReaderError::DirectoryUnreadable { .. }
                | ReaderError::UnknownEncoding(_)
        )
    }
}
