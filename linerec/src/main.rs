//! # linerec
//!
//! A CLI tool that streams every line of every file under a directory as
//! numbered records, or counts them.
//!
//! ## Usage
//!
//! ```bash
//! # Print every line under a directory, across all files
//! linerec ./data
//!
//! # Prefix each line with its sequence number and source file
//! linerec ./data --show-source
//!
//! # Emit one JSON object per record
//! linerec ./data --output json
//!
//! # Just count the total number of records
//! linerec ./data --count
//!
//! # Decode files with a specific encoding
//! linerec ./data --encoding shift_jis
//! ```
//!
//! Process start/finish and duration are logged through `tracing`; set
//! `RUST_LOG=info` to see them on stderr.

mod writer;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use linereclib::MultiFileLineReader;
use tracing_subscriber::EnvFilter;

use crate::writer::{ConsoleWriter, OutputFormat};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("linerec")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stream every line under a directory as numbered records, or count them")
        .arg(
            Arg::new("directory")
                .help("Directory whose files will be read")
                .required(true),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .value_name("LABEL")
                .help("Text encoding of the source files (e.g. utf-8, shift_jis, latin1)"),
        )
        .arg(
            Arg::new("count")
                .short('c')
                .long("count")
                .action(ArgAction::SetTrue)
                .help("Print the total record count instead of streaming records"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format for streamed records"),
        )
        .arg(
            Arg::new("show-source")
                .long("show-source")
                .action(ArgAction::SetTrue)
                .help("Prefix each line with its sequence number and source file"),
        )
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let directory = matches
        .get_one::<String>("directory")
        .context("missing directory argument")?;

    let mut reader = match matches.get_one::<String>("encoding") {
        Some(label) => MultiFileLineReader::with_encoding(directory, label)?,
        None => MultiFileLineReader::new(directory),
    };

    if matches.get_flag("count") {
        return match reader.count_total_records() {
            Some(total) => {
                println!("{total}");
                Ok(())
            }
            None => bail!("total record count unavailable for '{directory}'"),
        };
    }

    let format = match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    let show_source = matches.get_flag("show-source");

    reader.open()?;
    let streamed = stream_records(&mut reader, format, show_source);
    // The reader is closed even when streaming aborted mid-way.
    let closed = reader.close();
    streamed?;
    closed?;
    Ok(())
}

/// Drive the read session, handing each record to the console writer.
fn stream_records(
    reader: &mut MultiFileLineReader,
    format: OutputFormat,
    show_source: bool,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = ConsoleWriter::new(stdout.lock(), format, show_source);

    let mut delivered = 0u64;
    for record in reader.records() {
        let record = record?;
        writer.write(&record)?;
        delivered += 1;
    }
    tracing::info!(records = delivered, "read session complete");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();

    let start = Instant::now();
    tracing::info!(pid = std::process::id(), "process started");

    let outcome = run(&matches);

    tracing::info!(
        duration_secs = start.elapsed().as_secs_f64(),
        "process finished"
    );

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", Style::new().red().bold().apply_to("Error:"));
            ExitCode::FAILURE
        }
    }
}
