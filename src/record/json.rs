//! JSON-lines record.

use std::io::{self, Write};

use serde::Serialize;

use super::{RecordSink, TurnRecord};
use crate::game::GameOutcome;

/// One event per line, tagged with its kind.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Turn(&'a TurnRecord),
    Outcome(&'a GameOutcome),
}

/// Writes every turn and the outcome as newline-delimited JSON.
#[derive(Debug)]
pub struct JsonLinesRecorder<W> {
    out: W,
}

impl<W: Write> JsonLinesRecorder<W> {
    /// Wrap `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, event: &Event<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)
    }
}

impl<W: Write> RecordSink for JsonLinesRecorder<W> {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        self.write(&Event::Turn(record))
    }

    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        self.write(&Event::Outcome(outcome))?;
        self.out.flush()
    }
}
