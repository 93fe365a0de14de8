//! One player's turn, start to finish.

use log::debug;

use crate::error::GameError;
use crate::game::{
    ActivationReport, Building, DecisionKind, DecisionProvider, DiceCount, DiceRoller, GameState,
    PlayerId, Roll, activate,
};

/// Coins the bank pays a player with nothing after activation.
pub const CITY_HALL_MINIMUM: u32 = 1;

/// Coins the airport pays when nothing was built.
pub const AIRPORT_BONUS: u32 = 10;

/// Where a turn currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Choosing dice and throwing them.
    AwaitRoll,
    /// Deciding whether to throw again.
    AwaitReroll,
    /// Resolving the roll.
    Activating,
    /// City hall, purchase and airport.
    AwaitPurchase,
    /// Nothing left to do.
    TurnComplete,
}

/// What happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Who played.
    pub player: PlayerId,
    /// Final roll; `None` on a player's first turn.
    pub roll: Option<Roll>,
    /// Whether the radio tower was used.
    pub rerolled: bool,
    /// Coin movements from activation.
    pub activation: ActivationReport,
    /// Whether the city hall topped the player up.
    pub city_hall: bool,
    /// What was bought, if anything.
    pub purchase: Option<Building>,
    /// Whether the airport paid out.
    pub airport_bonus: bool,
    /// Whether the same player goes again.
    pub extra_turn: bool,
}

struct Turn<'a, D: ?Sized> {
    state: &'a mut GameState,
    dice: &'a mut DiceRoller,
    decisions: &'a mut D,
    player: PlayerId,
    count: DiceCount,
    summary: TurnSummary,
}

/// Play one turn for `state.current` and advance turn order.
///
/// # Errors
///
/// Returns `IllegalChoice` when a decision falls outside the legal
/// options, and `Purchase` if a filtered purchase still fails. The game
/// cannot continue after either.
pub fn take_turn<D: DecisionProvider + ?Sized>(
    state: &mut GameState,
    dice: &mut DiceRoller,
    decisions: &mut D,
) -> Result<TurnSummary, GameError> {
    state.turn += 1;
    let player = state.current;
    let first_turn = state.player(player).is_some_and(|p| p.is_first_turn);
    debug!("turn {}: player {player}", state.turn);

    let mut turn = Turn {
        summary: TurnSummary {
            turn: state.turn,
            player,
            roll: None,
            rerolled: false,
            activation: ActivationReport::default(),
            city_hall: false,
            purchase: None,
            airport_bonus: false,
            extra_turn: false,
        },
        state,
        dice,
        decisions,
        player,
        count: DiceCount::One,
    };

    let mut phase = if first_turn {
        TurnPhase::AwaitPurchase
    } else {
        TurnPhase::AwaitRoll
    };
    while phase != TurnPhase::TurnComplete {
        phase = turn.step(phase)?;
    }

    turn.finish();
    Ok(turn.summary)
}

impl<D: DecisionProvider + ?Sized> Turn<'_, D> {
    fn owns(&self, building: Building) -> bool {
        self.state.count(self.player, building) > 0
    }

    fn step(&mut self, phase: TurnPhase) -> Result<TurnPhase, GameError> {
        match phase {
            TurnPhase::AwaitRoll => {
                self.count = if self.owns(Building::TrainStation) {
                    self.decisions.choose_dice_count(&self.state.view())
                } else {
                    DiceCount::One
                };
                let roll = self.dice.roll(self.count);
                debug!("player {} rolls {roll}", self.player);
                self.summary.roll = Some(roll);

                Ok(if self.owns(Building::RadioTower) {
                    TurnPhase::AwaitReroll
                } else {
                    TurnPhase::Activating
                })
            }
            TurnPhase::AwaitReroll => {
                if let Some(roll) = self.summary.roll
                    && self.decisions.choose_reroll(&self.state.view(), roll)
                {
                    let again = self.dice.roll(self.count);
                    debug!("player {} rerolls {roll} into {again}", self.player);
                    self.summary.roll = Some(again);
                    self.summary.rerolled = true;
                }
                Ok(TurnPhase::Activating)
            }
            TurnPhase::Activating => {
                if let Some(roll) = self.summary.roll {
                    self.summary.activation = activate(
                        &mut *self.state,
                        self.player,
                        roll.total(),
                        &mut *self.dice,
                        &mut *self.decisions,
                    )?;
                }
                Ok(TurnPhase::AwaitPurchase)
            }
            TurnPhase::AwaitPurchase => {
                self.buy()?;
                Ok(TurnPhase::TurnComplete)
            }
            TurnPhase::TurnComplete => Ok(TurnPhase::TurnComplete),
        }
    }

    fn buy(&mut self) -> Result<(), GameError> {
        let turn = self.state.turn;
        let player = self.player;
        let GameState {
            players, market, ..
        } = &mut *self.state;
        let Some(me) = players.get_mut(usize::from(player)) else {
            return Ok(());
        };

        me.is_first_turn = false;
        if me.coins == 0 {
            me.coins = CITY_HALL_MINIMUM;
            self.summary.city_hall = true;
        }

        let eligible = market.eligible(me);
        if !eligible.is_empty() {
            let choice = self
                .decisions
                .choose_purchase(&self.state.view(), &eligible);
            if !eligible.contains(&choice) {
                return Err(GameError::illegal(
                    turn,
                    player,
                    DecisionKind::Purchase,
                    format!("{choice} is not eligible"),
                ));
            }
            let GameState {
                players, market, ..
            } = &mut *self.state;
            if let Some(me) = players.get_mut(usize::from(player)) {
                market
                    .purchase(me, choice)
                    .map_err(|error| GameError::Purchase {
                        turn,
                        player,
                        error,
                    })?;
            }
            debug!("player {player} buys {choice}");
            self.summary.purchase = Some(choice);
        }

        if self.summary.purchase.is_none() && self.owns(Building::Airport) {
            self.state.credit(player, AIRPORT_BONUS);
            self.summary.airport_bonus = true;
        }
        Ok(())
    }

    fn finish(&mut self) {
        let double = self.summary.roll.is_some_and(Roll::is_double);
        if double && self.owns(Building::AmusementPark) {
            debug!("player {} takes an extra turn", self.player);
            self.summary.extra_turn = true;
        } else {
            self.state.current = self.state.next_player(self.player);
        }
    }
}
