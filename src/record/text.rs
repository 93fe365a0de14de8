//! Human-readable game log.

use std::io::{self, Write};

use super::{RecordSink, TurnRecord};
use crate::game::{Building, GameOutcome};

/// Writes one block of lines per turn and the final standings.
///
/// ```text
/// ---BEGIN GAME 7---
/// BEGIN TURN 1
/// BUY: player 0 bought a(n) wheat_field (now has 2)
/// BEGIN TURN 2
/// ...
/// ```
#[derive(Debug)]
pub struct TextRecorder<W> {
    out: W,
    started: bool,
}

impl<W: Write> TextRecorder<W> {
    /// Wrap `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TextRecorder<W> {
    fn record_turn(&mut self, record: &TurnRecord) -> io::Result<()> {
        let out = &mut self.out;
        if !self.started {
            writeln!(out, "---BEGIN GAME {}---", record.game_id)?;
            self.started = true;
        }
        writeln!(out, "BEGIN TURN {}", record.turn)?;

        let player = record.player;
        if record.rerolled {
            writeln!(out, "REROLL: player {player} is rerolling!")?;
        }
        if let Some(roll) = record.roll {
            writeln!(
                out,
                "ROLL: player {player} rolls a {roll} with {} dice",
                roll.dice().get()
            )?;
        }

        let me = record.players.iter().find(|p| p.id == player);
        match record.purchase {
            Some(building) => {
                let owned = me.map_or(0, |p| p.count(building));
                writeln!(out, "BUY: player {player} bought a(n) {building} (now has {owned})")?;
            }
            None => writeln!(out, "BUY: player {player} chooses not to buy anything")?,
        }
        if record.airport_bonus {
            writeln!(out, "AIRPORT: player {player} collects the airport bonus")?;
        }
        if let Some(me) = me {
            writeln!(out, "COINS: player {player} has {} coins", me.coins)?;
        }
        if record.extra_turn {
            writeln!(out, "EXTRA TURN: player {player} gets an extra turn!")?;
        }
        Ok(())
    }

    fn finish(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        let out = &mut self.out;
        match outcome.winner {
            Some(winner) => writeln!(out, "Player {winner} won in {} turns", outcome.turns)?,
            None => writeln!(out, "No winner after {} turns", outcome.turns)?,
        }
        writeln!(out, "FINAL STANDINGS:")?;
        for player in &outcome.players {
            writeln!(out, "+++++++++++++++++++++")?;
            writeln!(out, "PLAYER {}", player.id)?;
            writeln!(out, "TOTAL COINS: {}", player.coins)?;
            for building in Building::ALL {
                writeln!(
                    out,
                    "{} COUNT: {}",
                    building.name().to_uppercase(),
                    player.count(building)
                )?;
            }
        }
        writeln!(out, "--------------------------------")?;
        out.flush()
    }
}
