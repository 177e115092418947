//! Console writer: the downstream collaborator that delivers each record
//! exactly once, in the order produced.

use std::io::Write;

use anyhow::Result;
use linereclib::Record;

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Line payloads only (optionally prefixed with provenance)
    Text,
    /// One JSON object per record: sequence, source, line
    Json,
}

/// Writes records to a sink, one per line.
pub struct ConsoleWriter<W: Write> {
    out: W,
    format: OutputFormat,
    show_source: bool,
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W, format: OutputFormat, show_source: bool) -> Self {
        Self {
            out,
            format,
            show_source,
        }
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                if self.show_source {
                    writeln!(
                        self.out,
                        "{}\t{}\t{}",
                        record.sequence, record.source, record.line
                    )?;
                } else {
                    writeln!(self.out, "{}", record.line)?;
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string(record)?;
                writeln!(self.out, "{json}")?;
            }
        }
        Ok(())
    }
}
