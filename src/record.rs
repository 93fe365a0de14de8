//! Turn-by-turn game records.
//!
//! A session emits one [`TurnRecord`] after every completed turn and a
//! [`GameOutcome`] when the game ends. What happens to them is up to the
//! [`RecordSink`]: discard, keep in memory, or write one of the file
//! formats below.
//!
//! - [`CsvRecorder`]: one row per turn with every player's holdings.
//! - [`TextRecorder`]: a human-readable game log.
//! - [`JsonLinesRecorder`]: one JSON object per line.

mod csv;
mod json;
mod text;

pub use csv::CsvRecorder;
pub use json::JsonLinesRecorder;
pub use text::TextRecorder;

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;

use crate::game::{Building, GameOutcome, GameState, PlayerId, PlayerState, Roll, TurnSummary};

/// One player's holdings at the end of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    /// Seat.
    pub id: PlayerId,
    /// Coin balance.
    pub coins: u32,
    /// Owned copies, zero entries omitted.
    pub buildings: BTreeMap<Building, u32>,
    /// Whether every landmark is owned.
    pub has_won: bool,
}

impl PlayerSnapshot {
    /// Capture `player`.
    #[must_use]
    pub fn of(player: &PlayerState) -> Self {
        Self {
            id: player.id,
            coins: player.coins,
            buildings: player
                .owned
                .iter()
                .filter(|&(_, &n)| n > 0)
                .map(|(&b, &n)| (b, n))
                .collect(),
            has_won: player.has_won(),
        }
    }

    /// Copies of `building`, zero if none.
    #[must_use]
    pub fn count(&self, building: Building) -> u32 {
        self.buildings.get(&building).copied().unwrap_or(0)
    }
}

/// Capture every player.
#[must_use]
pub fn snapshot(state: &GameState) -> Vec<PlayerSnapshot> {
    state.players.iter().map(PlayerSnapshot::of).collect()
}

/// Everything observable about one completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// Game this turn belongs to.
    pub game_id: u64,
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Who played.
    pub player: PlayerId,
    /// Final roll; absent on a player's first turn.
    pub roll: Option<Roll>,
    /// Whether the radio tower was used.
    pub rerolled: bool,
    /// What was bought.
    pub purchase: Option<Building>,
    /// Whether the airport paid out.
    pub airport_bonus: bool,
    /// Whether the same player goes again.
    pub extra_turn: bool,
    /// Every player after the turn.
    pub players: Vec<PlayerSnapshot>,
}

impl TurnRecord {
    /// Build a record from a finished turn and the state it left behind.
    #[must_use]
    pub fn new(game_id: u64, summary: &TurnSummary, state: &GameState) -> Self {
        Self {
            game_id,
            turn: summary.turn,
            player: summary.player,
            roll: summary.roll,
            rerolled: summary.rerolled,
            purchase: summary.purchase,
            airport_bonus: summary.airport_bonus,
            extra_turn: summary.extra_turn,
            players: snapshot(state),
        }
    }
}

/// Receives game events as they happen.
pub trait RecordSink {
    /// Called after every completed turn.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()>;

    /// Called once when the game ends. Writers flush here.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        let _ = outcome;
        Ok(())
    }
}

/// Discards everything.
impl RecordSink for () {
    fn record_turn(&mut self, _record: &TurnRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every turn in memory.
impl RecordSink for Vec<TurnRecord> {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        (**self).record_turn(record)
    }

    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        (**self).finish(outcome)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        (**self).record_turn(record)
    }

    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        (**self).finish(outcome)
    }
}

/// Forwards every event to several sinks, stopping at the first error.
#[derive(Default)]
pub struct Fanout {
    sinks: Vec<Box<dyn RecordSink + Send>>,
}

impl Fanout {
    /// Empty fanout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    pub fn push(&mut self, sink: impl RecordSink + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Number of attached sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sink is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for Fanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fanout")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl RecordSink for Fanout {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        self.sinks
            .iter_mut()
            .try_for_each(|sink| sink.record_turn(record))
    }

    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        self.sinks.iter_mut().try_for_each(|sink| sink.finish(outcome))
    }
}
