//! Dice rolling.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Number of dice thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiceCount {
    /// A single die.
    One,
    /// Two dice; requires the train station.
    Two,
}

impl DiceCount {
    /// Number of dice as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Outcome of one throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Roll {
    /// Face of each die; the second is `None` for a single die.
    pub faces: (u8, Option<u8>),
}

impl Roll {
    /// Build a roll from explicit faces.
    #[must_use]
    pub const fn new(first: u8, second: Option<u8>) -> Self {
        Self {
            faces: (first, second),
        }
    }

    /// Sum of the faces.
    #[must_use]
    pub const fn total(self) -> u8 {
        match self.faces {
            (a, Some(b)) => a + b,
            (a, None) => a,
        }
    }

    /// Two dice showing the same face. A single die is never a double.
    #[must_use]
    pub const fn is_double(self) -> bool {
        matches!(self.faces, (a, Some(b)) if a == b)
    }

    /// How many dice were thrown.
    #[must_use]
    pub const fn dice(self) -> DiceCount {
        match self.faces.1 {
            Some(_) => DiceCount::Two,
            None => DiceCount::One,
        }
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.faces {
            (a, Some(b)) => write!(f, "{} [{a}, {b}]", self.total()),
            (a, None) => write!(f, "{a} [{a}]"),
        }
    }
}

/// Six-sided dice backed by a seeded generator.
#[derive(Debug, Clone)]
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    /// Create a roller; the same seed always yields the same sequence.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn die(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    /// Throw `count` dice.
    pub fn roll(&mut self, count: DiceCount) -> Roll {
        let first = self.die();
        let second = match count {
            DiceCount::One => None,
            DiceCount::Two => Some(self.die()),
        };
        Roll::new(first, second)
    }
}
