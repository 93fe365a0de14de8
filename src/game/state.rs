//! Game state management.

use crate::game::{Building, Market, PlayerId, PlayerState};

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// Complete game state: every player plus the shared market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// All players, indexed by `PlayerId`.
    pub players: Vec<PlayerState>,
    /// The shared market.
    pub market: Market,
    /// Player whose turn it is.
    pub current: PlayerId,
    /// Number of turns started so far.
    pub turn: u32,
}

impl GameState {
    /// Create a fresh game for `num_players` players.
    ///
    /// `num_players` is clamped to `MAX_PLAYERS`; callers validate it first.
    #[must_use]
    pub fn new(num_players: usize, starting_coins: u32) -> Self {
        let players: Vec<PlayerState> = (0..num_players.min(MAX_PLAYERS))
            .filter_map(|i| PlayerId::try_from(i).ok())
            .map(|id| PlayerState::new(id, starting_coins))
            .collect();

        Self {
            market: Market::new(players.len()),
            players,
            current: 0,
            turn: 0,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(usize::from(id))
    }

    /// Get a mutable reference to a player by ID.
    #[must_use]
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(usize::from(id))
    }

    /// Coins held by `id`, zero for an unknown seat.
    #[must_use]
    pub fn coins(&self, id: PlayerId) -> u32 {
        self.player(id).map_or(0, |p| p.coins)
    }

    /// Copies of `building` owned by `id`.
    #[must_use]
    pub fn count(&self, id: PlayerId, building: Building) -> u32 {
        self.player(id).map_or(0, |p| p.count(building))
    }

    /// Every other player, starting with the one seated just before
    /// `active` and walking backwards round the table.
    #[must_use]
    pub fn reverse_order(&self, active: PlayerId) -> Vec<PlayerId> {
        let n = self.players.len();
        let active = usize::from(active);
        (1..n)
            .map(|step| (active + n - step) % n)
            .filter_map(|i| PlayerId::try_from(i).ok())
            .collect()
    }

    /// Every other player in seat order.
    #[must_use]
    pub fn opponents(&self, active: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(|p| p.id)
            .filter(|&id| id != active)
            .collect()
    }

    /// Move up to `amount` coins from `from` to `to`.
    ///
    /// Returns the amount actually moved.
    pub fn transfer(&mut self, from: PlayerId, to: PlayerId, amount: u32) -> u32 {
        let taken = self.player_mut(from).map_or(0, |p| p.pay(amount));
        if let Some(receiver) = self.player_mut(to) {
            receiver.earn(taken);
        }
        taken
    }

    /// Pay `amount` from the bank to `to`.
    pub fn credit(&mut self, to: PlayerId, amount: u32) {
        if let Some(player) = self.player_mut(to) {
            player.earn(amount);
        }
    }

    /// First player, in seat order, owning every landmark.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.has_won()).map(|p| p.id)
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Seat that follows `id`.
    #[must_use]
    pub fn next_player(&self, id: PlayerId) -> PlayerId {
        let n = self.players.len().max(1);
        PlayerId::try_from((usize::from(id) + 1) % n).unwrap_or(0)
    }

    /// Drop zero-count entries from every player.
    pub fn prune(&mut self) {
        for player in &mut self.players {
            player.prune();
        }
    }

    /// Read-only snapshot for decision providers.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            turn: self.turn,
            active: self.current,
            players: &self.players,
            market: &self.market,
        }
    }
}

/// What a decision provider may look at. Borrowed, never owned.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    /// Current turn number.
    pub turn: u32,
    /// The player being asked.
    pub active: PlayerId,
    /// Every player.
    pub players: &'a [PlayerState],
    /// The shared market.
    pub market: &'a Market,
}

impl<'a> GameView<'a> {
    /// The player being asked.
    #[must_use]
    pub fn me(&self) -> Option<&'a PlayerState> {
        self.players.get(usize::from(self.active))
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&'a PlayerState> {
        self.players.get(usize::from(id))
    }

    /// Richest of `candidates`, lowest id on ties.
    #[must_use]
    pub fn richest(&self, candidates: &[PlayerId]) -> Option<PlayerId> {
        candidates
            .iter()
            .copied()
            .filter_map(|id| self.player(id))
            .max_by(|a, b| a.coins.cmp(&b.coins).then(b.id.cmp(&a.id)))
            .map(|p| p.id)
    }
}
