//! Full-state CSV record: one row per turn.

use std::io::{self, Write};

use super::{RecordSink, TurnRecord};
use crate::game::{Building, GameOutcome};

/// Writes `game_id,turn_id` followed by, for every seat, the count of each
/// building in catalog order, the coin balance and a 0/1 win flag.
///
/// The header is written before the first row, so several games may share
/// one writer as long as they have the same number of players.
#[derive(Debug)]
pub struct CsvRecorder<W> {
    out: W,
    header_written: bool,
}

impl<W: Write> CsvRecorder<W> {
    /// Wrap `out`; the header is written with the first row.
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    /// Wrap `out` that already holds a header, e.g. an appended file.
    pub fn without_header(out: W) -> Self {
        Self {
            out,
            header_written: true,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Column names for `num_players` seats.
#[must_use]
pub fn header(num_players: usize) -> String {
    let mut columns = vec!["game_id".to_string(), "turn_id".to_string()];
    for seat in 0..num_players {
        columns.extend(
            Building::ALL
                .iter()
                .map(|b| format!("p{seat}_{}", b.name())),
        );
        columns.push(format!("p{seat}_coins"));
        columns.push(format!("p{seat}_win"));
    }
    columns.join(",")
}

fn row(record: &TurnRecord) -> String {
    let mut fields = vec![record.game_id.to_string(), record.turn.to_string()];
    for player in &record.players {
        fields.extend(Building::ALL.iter().map(|&b| player.count(b).to_string()));
        fields.push(player.coins.to_string());
        fields.push(u8::from(player.has_won).to_string());
    }
    fields.join(",")
}

impl<W: Write> RecordSink for CsvRecorder<W> {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}", header(record.players.len()))?;
            self.header_written = true;
        }
        writeln!(self.out, "{}", row(record))
    }

    fn finish(&mut self, _outcome: &GameOutcome) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::record::tests::sample_summary;

    #[test]
    fn test_header_layout() {
        let header = header(2);
        let columns: Vec<&str> = header.split(',').collect();
        assert_eq!(columns.len(), 2 + 2 * (Building::ALL.len() + 2));
        assert_eq!(columns[0], "game_id");
        assert_eq!(columns[1], "turn_id");
        assert_eq!(columns[2], "p0_wheat_field");
        assert_eq!(columns[2 + Building::ALL.len()], "p0_coins");
        assert_eq!(columns[3 + Building::ALL.len()], "p0_win");
        assert_eq!(columns[4 + Building::ALL.len()], "p1_wheat_field");
        assert_eq!(*columns.last().unwrap(), "p1_win");
    }

    #[test]
    fn test_rows_follow_header_once() {
        let mut state = GameState::new(2, 0);
        state.players[1].coins = 7;
        let record = TurnRecord::new(4, &sample_summary(), &state);

        let mut recorder = CsvRecorder::new(Vec::new());
        recorder.record_turn(&record).unwrap();
        recorder.record_turn(&record).unwrap();
        let text = String::from_utf8(recorder.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("game_id,turn_id,"));
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[0], "4");
        assert_eq!(fields[1], "3");
        // wheat_field and bakery from the starting holdings
        assert_eq!(fields[2], "1");
        assert_eq!(fields[2 + Building::Bakery.index()], "1");
        assert_eq!(fields[2 + 2 * (Building::ALL.len() + 2) - 2], "7");
        assert_eq!(*fields.last().unwrap(), "0");
    }

    #[test]
    fn test_without_header() {
        let state = GameState::new(2, 0);
        let record = TurnRecord::new(0, &sample_summary(), &state);
        let mut recorder = CsvRecorder::without_header(Vec::new());
        recorder.record_turn(&record).unwrap();
        let text = String::from_utf8(recorder.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
