//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, seed_or_now};
use machi::game::GameConfig;
use machi::policy::PolicyKind;
use machi::record::{CsvRecorder, Fanout, JsonLinesRecorder, TextRecorder};
use machi::tournament::run_game_recorded;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Where to write game records.
#[derive(Debug, Default)]
pub(crate) struct RecordPaths {
    /// Full-state CSV, appended to.
    pub(crate) csv: Option<PathBuf>,
    /// Human-readable log, appended to.
    pub(crate) log: Option<PathBuf>,
    /// JSON lines, appended to.
    pub(crate) json: Option<PathBuf>,
}

fn append(path: &Path) -> Result<File, CliError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::new(format!("Failed to open {}: {e}", path.display())))
}

fn sinks(paths: &RecordPaths) -> Result<Fanout, CliError> {
    let mut fanout = Fanout::new();
    if let Some(path) = &paths.csv {
        // A file that already has rows already has the header.
        let has_header = path.metadata().is_ok_and(|m| m.len() > 0);
        let out = BufWriter::new(append(path)?);
        if has_header {
            fanout.push(CsvRecorder::without_header(out));
        } else {
            fanout.push(CsvRecorder::new(out));
        }
    }
    if let Some(path) = &paths.log {
        fanout.push(TextRecorder::new(BufWriter::new(append(path)?)));
    }
    if let Some(path) = &paths.json {
        fanout.push(JsonLinesRecorder::new(BufWriter::new(append(path)?)));
    }
    Ok(fanout)
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the game fails to run or a record cannot be written.
pub(crate) fn execute(
    seats: &[PolicyKind],
    seed: Option<u64>,
    config: GameConfig,
    format: OutputFormat,
    records: &RecordPaths,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_now(seed);
    let names: Vec<String> = seats.iter().map(ToString::to_string).collect();

    if !quiet {
        println!("Running game with seed {seed}...");
        println!("Players: {}", names.join(", "));
        println!();
    }

    let result = run_game_recorded(seed, seed, seats, &config, sinks(records)?)?;

    if !quiet {
        for path in [&records.csv, &records.log, &records.json].into_iter().flatten() {
            println!("Record written to: {}", path.display());
        }
        if records.csv.is_some() || records.log.is_some() || records.json.is_some() {
            println!();
        }
    }

    // Output based on format
    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, seats));
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result, seats);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    Ok(())
}
