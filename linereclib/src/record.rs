//! The record type produced by a read session.

use serde::Serialize;

/// One line of text with its position in the stream and its provenance.
///
/// Sequence numbers start at 1 and increase by exactly 1 per record, across
/// file boundaries. The source identifier names the file the line came from
/// (root path plus the file's path relative to the root); it is diagnostic
/// provenance, not an equality key. The line carries no trailing terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Position in the stream, starting at 1, global across all files
    pub sequence: u64,
    /// Provenance of the line
    pub source: String,
    /// The line text, without its line terminator
    pub line: String,
}

impl Record {
    pub(crate) fn new(sequence: u64, source: String, line: String) -> Self {
        Self {
            sequence,
            source,
            line,
        }
    }
}
