//! Tournament command implementation.

use super::output::{JsonTournamentResult, format_tournament_csv, format_tournament_text};
use super::{CliError, TournamentFormat};
use indicatif::{ProgressBar, ProgressStyle};
use machi::policy::PolicyKind;
use machi::tournament::{TournamentConfig, run_tournament_with};
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the tournament fails.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    seats: &[PolicyKind],
    config: &TournamentConfig,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(config.games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_tournament_with(seats, config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    // Calculate games per second
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    // Output based on format
    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, seats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, seats);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, seats));
        }
    }

    Ok(())
}
