//! Card activation: who gets paid when the dice land.
//!
//! A roll resolves in four phases, strictly in this order:
//!
//! 1. **Restaurants** (red). Every opponent's restaurants take coins from
//!    the active player, nearest previous seat first.
//! 2. **Secondary industries** (green). The active player's own shops
//!    and factories pay out from the bank.
//! 3. **Primary industries** (blue). Everyone's fields, ranches and boats
//!    pay out from the bank.
//! 4. **Major establishments** (purple). The active player's single-copy
//!    buildings take from opponents; the business center goes last.
//!
//! Restaurants resolve before the active player collects anything, so a
//! player can be emptied by opponents before their own income arrives.
//! Every debit is clamped to what the payer holds.

use log::{debug, trace};

use crate::error::GameError;
use crate::game::{
    Building, BusinessCenterSwap, Commodity, DecisionKind, DecisionProvider, DiceCount,
    DiceRoller, GameState, GameView, Goods, Payout, PlayerId, SpecialEffect, SwapOptions,
    SwapTarget,
};

/// Phase in which a transfer happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivationPhase {
    /// Red cards.
    Restaurants,
    /// Green cards.
    SecondaryIndustry,
    /// Blue cards.
    PrimaryIndustry,
    /// Purple cards.
    MajorEstablishment,
}

/// Where coins came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payer {
    /// Freshly minted by the bank.
    Bank,
    /// Taken from a player.
    Player(PlayerId),
}

/// One movement of coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Phase that caused it.
    pub phase: ActivationPhase,
    /// Card that caused it.
    pub source: Building,
    /// Who paid.
    pub from: Payer,
    /// Who received.
    pub to: PlayerId,
    /// Coins moved, after clamping.
    pub amount: u32,
}

/// Everything an activation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    /// Non-zero coin movements in resolution order.
    pub transfers: Vec<Transfer>,
    /// Business center exchange, if one happened.
    pub swap: Option<BusinessCenterSwap>,
}

impl ActivationReport {
    /// Net change in coins for `player`.
    #[must_use]
    pub fn net(&self, player: PlayerId) -> i64 {
        self.transfers
            .iter()
            .map(|t| {
                let mut delta = 0;
                if t.to == player {
                    delta += i64::from(t.amount);
                }
                if t.from == Payer::Player(player) {
                    delta -= i64::from(t.amount);
                }
                delta
            })
            .sum()
    }

    /// Coins created by the bank.
    #[must_use]
    pub fn minted(&self) -> u64 {
        self.transfers
            .iter()
            .filter(|t| t.from == Payer::Bank)
            .map(|t| u64::from(t.amount))
            .sum()
    }
}

/// Resolve `roll` for `active` against every player.
///
/// Zero-count entries are pruned from every player afterwards.
///
/// # Errors
///
/// Returns `IllegalChoice` when the decision provider names a TV station
/// target or business center swap outside the legal options. The state
/// may already reflect earlier phases when that happens.
pub fn activate<D: DecisionProvider + ?Sized>(
    state: &mut GameState,
    active: PlayerId,
    roll: u8,
    dice: &mut DiceRoller,
    decisions: &mut D,
) -> Result<ActivationReport, GameError> {
    let mut activation = Activation {
        state,
        active,
        roll,
        dice,
        decisions,
        report: ActivationReport::default(),
    };

    activation.restaurants()?;
    activation.secondary_industries()?;
    activation.primary_industries()?;
    activation.major_establishments()?;

    activation.state.prune();
    Ok(activation.report)
}

/// View with `active` as the player being asked.
fn view_for(state: &GameState, active: PlayerId) -> GameView<'_> {
    GameView {
        active,
        ..state.view()
    }
}

struct Activation<'a, D: ?Sized> {
    state: &'a mut GameState,
    active: PlayerId,
    roll: u8,
    dice: &'a mut DiceRoller,
    decisions: &'a mut D,
    report: ActivationReport,
}

impl<D: DecisionProvider + ?Sized> Activation<'_, D> {
    fn owned(&self, owner: PlayerId, building: Building) -> u32 {
        self.state.count(owner, building)
    }

    fn has(&self, owner: PlayerId, building: Building) -> bool {
        self.owned(owner, building) > 0
    }

    fn record(
        &mut self,
        phase: ActivationPhase,
        source: Building,
        from: Payer,
        to: PlayerId,
        amount: u32,
    ) {
        if amount == 0 {
            return;
        }
        trace!("{source}: {from:?} -> player {to}: {amount} coins");
        self.report.transfers.push(Transfer {
            phase,
            source,
            from,
            to,
            amount,
        });
    }

    fn bank_pays(&mut self, phase: ActivationPhase, source: Building, to: PlayerId, amount: u32) {
        self.state.credit(to, amount);
        self.record(phase, source, Payer::Bank, to, amount);
    }

    fn take(
        &mut self,
        phase: ActivationPhase,
        source: Building,
        from: PlayerId,
        to: PlayerId,
        amount: u32,
    ) {
        let moved = self.state.transfer(from, to, amount);
        self.record(phase, source, Payer::Player(from), to, moved);
    }

    fn commodity_count(&self, owner: PlayerId, commodity: Commodity) -> u32 {
        self.state
            .player(owner)
            .map_or(0, |p| p.count_where(|b| b.commodity() == Some(commodity)))
    }

    fn restaurant_count(&self, owner: PlayerId) -> u32 {
        self.state
            .player(owner)
            .map_or(0, |p| p.count_where(Building::is_restaurant))
    }

    fn phase_of(building: Building) -> ActivationPhase {
        if building.is_restaurant() {
            ActivationPhase::Restaurants
        } else if building.goods().is_some() {
            ActivationPhase::SecondaryIndustry
        } else if building.commodity().is_some() {
            ActivationPhase::PrimaryIndustry
        } else {
            ActivationPhase::MajorEstablishment
        }
    }

    /// Phase 1.
    fn restaurants(&mut self) -> Result<(), GameError> {
        let phase = ActivationPhase::Restaurants;
        for owner in self.state.reverse_order(self.active) {
            let mall_bonus = u32::from(self.has(owner, Building::ShoppingMall));
            for building in Building::RESTAURANTS {
                if self.state.coins(self.active) == 0 {
                    return Ok(());
                }
                let count = self.owned(owner, building);
                if count == 0 || !building.activates_on(self.roll) {
                    continue;
                }
                match building.payout() {
                    Payout::Flat(rate) => {
                        self.take(phase, building, self.active, owner, (rate + mall_bonus) * count);
                    }
                    Payout::Special(effect) => self.special(owner, building, effect, count)?,
                    Payout::Passive => {}
                }
            }
        }
        Ok(())
    }

    /// Phase 2.
    fn secondary_industries(&mut self) -> Result<(), GameError> {
        let phase = ActivationPhase::SecondaryIndustry;
        let active = self.active;
        let mall = self.has(active, Building::ShoppingMall);
        for building in Building::SECONDARY_INDUSTRIES {
            let count = self.owned(active, building);
            if count == 0 || !building.activates_on(self.roll) {
                continue;
            }
            match building.payout() {
                Payout::Flat(rate) => {
                    let bonus = u32::from(mall && building.goods() == Some(Goods::Bread));
                    self.bank_pays(phase, building, active, (rate + bonus) * count);
                }
                Payout::Special(effect) => self.special(active, building, effect, count)?,
                Payout::Passive => {}
            }
        }
        Ok(())
    }

    /// Phase 3.
    fn primary_industries(&mut self) -> Result<(), GameError> {
        let phase = ActivationPhase::PrimaryIndustry;
        let owners: Vec<PlayerId> = self.state.players.iter().map(|p| p.id).collect();
        for owner in owners {
            for building in Building::PRIMARY_INDUSTRIES {
                let count = self.owned(owner, building);
                if count == 0 || !building.activates_on(self.roll) {
                    continue;
                }
                match building.payout() {
                    Payout::Flat(rate) => self.bank_pays(phase, building, owner, rate * count),
                    Payout::Special(effect) => self.special(owner, building, effect, count)?,
                    Payout::Passive => {}
                }
            }
        }
        Ok(())
    }

    /// Phase 4.
    fn major_establishments(&mut self) -> Result<(), GameError> {
        let active = self.active;
        for building in Building::MAJOR_ESTABLISHMENTS {
            if building == Building::BusinessCenter {
                continue;
            }
            let count = self.owned(active, building);
            if count == 0 || !building.activates_on(self.roll) {
                continue;
            }
            if let Payout::Special(effect) = building.payout() {
                self.special(active, building, effect, count)?;
            }
        }

        let center = Building::BusinessCenter;
        if self.has(active, center) && center.activates_on(self.roll) {
            self.special(active, center, SpecialEffect::BusinessCenter, 1)?;
        }
        Ok(())
    }

    /// Bespoke payouts. `owner` holds `count` copies of `building`.
    fn special(
        &mut self,
        owner: PlayerId,
        building: Building,
        effect: SpecialEffect,
        count: u32,
    ) -> Result<(), GameError> {
        let phase = Self::phase_of(building);
        match effect {
            SpecialEffect::FruitAndVegetableMarket => {
                let amount = 2 * self.commodity_count(owner, Commodity::Wheat) * count;
                self.bank_pays(phase, building, owner, amount);
            }
            SpecialEffect::CheeseFactory => {
                let amount = 3 * self.commodity_count(owner, Commodity::Cow) * count;
                self.bank_pays(phase, building, owner, amount);
            }
            SpecialEffect::FurnitureFactory => {
                let amount = 3 * self.commodity_count(owner, Commodity::Gear) * count;
                self.bank_pays(phase, building, owner, amount);
            }
            SpecialEffect::FoodWarehouse => {
                let amount = 2 * self.restaurant_count(owner) * count;
                self.bank_pays(phase, building, owner, amount);
            }
            SpecialEffect::FlowerShop => {
                let amount = self.owned(self.active, Building::FlowerGarden) * count;
                self.bank_pays(phase, building, owner, amount);
            }
            SpecialEffect::TunaBoat => {
                let catch = self.dice.roll(DiceCount::Two);
                trace!("tuna boat catch for player {owner}: {catch}");
                self.bank_pays(phase, building, owner, u32::from(catch.total()) * count);
            }
            SpecialEffect::SushiBar => {
                if self.has(owner, Building::Harbor) && self.state.coins(self.active) > 0 {
                    let rate = 3 + u32::from(self.has(owner, Building::ShoppingMall));
                    self.take(phase, building, self.active, owner, rate * count);
                }
            }
            SpecialEffect::Stadium => {
                for victim in self.state.reverse_order(owner) {
                    self.take(phase, building, victim, owner, 2 * count);
                }
            }
            SpecialEffect::TvStation => {
                let opponents = self.state.opponents(owner);
                let view = view_for(self.state, self.active);
                let target = self.decisions.choose_tv_station_target(&view, &opponents);
                if !opponents.contains(&target) {
                    return Err(GameError::illegal(
                        self.state.turn,
                        owner,
                        DecisionKind::TvStationTarget,
                        format!("player {target} is not an opponent"),
                    ));
                }
                self.take(phase, building, target, owner, 5 * count);
            }
            SpecialEffect::BusinessCenter => self.business_center(owner)?,
            SpecialEffect::Publisher => {
                for victim in self.state.reverse_order(owner) {
                    let outlets = self.state.player(victim).map_or(0, |p| {
                        p.count_where(|b| b.is_restaurant() || b.goods() == Some(Goods::Bread))
                    });
                    self.take(phase, building, victim, owner, outlets * count);
                }
            }
            SpecialEffect::TaxOffice => {
                for victim in self.state.reverse_order(owner) {
                    let coins = self.state.coins(victim);
                    if coins >= 10 {
                        self.take(phase, building, victim, owner, count * (coins / 2));
                    }
                }
            }
        }
        Ok(())
    }

    fn swap_options(&self, owner: PlayerId) -> SwapOptions {
        let state = &*self.state;
        // Swappable holdings of `from` that `to` can still take.
        let giveable = |from: PlayerId, to: PlayerId| -> Vec<Building> {
            state.player(from).map_or_else(Vec::new, |p| {
                p.owned
                    .iter()
                    .filter(|&(&b, &n)| {
                        n > 0 && b.is_swappable() && state.count(to, b) < b.ownership_cap()
                    })
                    .map(|(&b, _)| b)
                    .collect()
            })
        };

        SwapOptions {
            targets: state
                .opponents(owner)
                .into_iter()
                .map(|player| SwapTarget {
                    player,
                    theirs: giveable(player, owner),
                    ours: giveable(owner, player),
                })
                .filter(|t| !t.theirs.is_empty() && !t.ours.is_empty())
                .collect(),
        }
    }

    fn business_center(&mut self, owner: PlayerId) -> Result<(), GameError> {
        let options = self.swap_options(owner);
        if options.is_empty() {
            debug!("business center for player {owner}: nothing to swap");
            return Ok(());
        }

        let view = view_for(self.state, self.active);
        let swap = self.decisions.choose_business_center_swap(&view, &options);
        if !options.allows(&swap) {
            return Err(GameError::illegal(
                self.state.turn,
                owner,
                DecisionKind::BusinessCenterSwap,
                format!(
                    "cannot swap our {} for {} held by player {}",
                    swap.ours, swap.theirs, swap.target
                ),
            ));
        }

        if let Some(target) = self.state.player_mut(swap.target) {
            target.lose(swap.theirs);
            target.gain(swap.ours);
        }
        if let Some(me) = self.state.player_mut(owner) {
            me.lose(swap.ours);
            me.gain(swap.theirs);
        }
        debug!(
            "business center: player {owner} gives {} to player {} for {}",
            swap.ours, swap.target, swap.theirs
        );
        self.report.swap = Some(swap);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScriptedPolicy;

    fn game(n: usize) -> GameState {
        let mut state = GameState::new(n, 0);
        for player in &mut state.players {
            player.owned.clear();
            player.is_first_turn = false;
        }
        state
    }

    fn run(state: &mut GameState, active: PlayerId, roll: u8) -> ActivationReport {
        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        activate(state, active, roll, &mut dice, &mut policy).unwrap()
    }

    #[test]
    fn test_wheat_field_pays_owner_from_bank() {
        let mut state = game(2);
        state.players[0].gain(Building::WheatField);

        let report = run(&mut state, 0, 1);
        assert_eq!(state.coins(0), 1);
        assert_eq!(report.minted(), 1);
        assert_eq!(report.transfers[0].phase, ActivationPhase::PrimaryIndustry);
    }

    #[test]
    fn test_primary_pays_every_owner() {
        let mut state = game(3);
        state.players[0].gain(Building::Ranch);
        state.players[2].gain(Building::Ranch);
        state.players[2].gain(Building::Ranch);

        run(&mut state, 1, 2);
        assert_eq!(state.coins(0), 1);
        assert_eq!(state.coins(1), 0);
        assert_eq!(state.coins(2), 2);
    }

    #[test]
    fn test_restaurant_skipped_when_active_is_broke() {
        let mut state = game(2);
        state.players[1].gain(Building::Cafe);

        let report = run(&mut state, 0, 3);
        assert_eq!(state.coins(0), 0);
        assert_eq!(state.coins(1), 0);
        assert!(report.transfers.is_empty());
    }

    #[test]
    fn test_restaurant_takes_before_own_income() {
        let mut state = game(2);
        state.players[0].coins = 1;
        state.players[0].gain(Building::Bakery);
        state.players[1].gain(Building::Cafe);
        state.players[1].gain(Building::Cafe);

        let report = run(&mut state, 0, 3);
        // Cafe wants 2, only 1 available; then the bakery pays 1.
        assert_eq!(state.coins(1), 1);
        assert_eq!(state.coins(0), 1);
        assert_eq!(report.transfers[0].phase, ActivationPhase::Restaurants);
        assert_eq!(report.transfers[1].phase, ActivationPhase::SecondaryIndustry);
    }

    #[test]
    fn test_restaurants_nearest_previous_seat_first() {
        let mut state = game(3);
        state.players[0].coins = 2;
        state.players[1].gain(Building::FamilyRestaurant);
        state.players[2].gain(Building::FamilyRestaurant);

        run(&mut state, 0, 9);
        // Seat 2 sits just before seat 0 and is paid first.
        assert_eq!(state.coins(2), 2);
        assert_eq!(state.coins(1), 0);
    }

    #[test]
    fn test_shopping_mall_raises_restaurant_rate() {
        let mut state = game(2);
        state.players[0].coins = 10;
        state.players[1].gain(Building::Cafe);
        state.players[1].gain(Building::ShoppingMall);

        run(&mut state, 0, 3);
        assert_eq!(state.coins(1), 2);
        assert_eq!(state.coins(0), 8);
    }

    #[test]
    fn test_sushi_bar_needs_harbor() {
        let mut state = game(2);
        state.players[0].coins = 10;
        state.players[1].gain(Building::SushiBar);
        run(&mut state, 0, 1);
        assert_eq!(state.coins(0), 10);

        state.players[1].gain(Building::Harbor);
        state.players[1].gain(Building::ShoppingMall);
        run(&mut state, 0, 1);
        assert_eq!(state.coins(0), 6);
        assert_eq!(state.coins(1), 4);
    }

    #[test]
    fn test_bakery_with_mall() {
        let mut state = game(2);
        state.players[0].gain(Building::Bakery);
        state.players[0].gain(Building::Bakery);
        state.players[0].gain(Building::ShoppingMall);

        run(&mut state, 0, 2);
        assert_eq!(state.coins(0), 4);
    }

    #[test]
    fn test_secondary_only_for_active_player() {
        let mut state = game(2);
        state.players[1].gain(Building::ConvenienceStore);

        run(&mut state, 0, 4);
        assert_eq!(state.coins(1), 0);
    }

    #[test]
    fn test_factories_count_commodities() {
        let mut state = game(2);
        state.players[0].gain(Building::CheeseFactory);
        state.players[0].gain(Building::Ranch);
        state.players[0].gain(Building::Ranch);
        run(&mut state, 0, 7);
        assert_eq!(state.coins(0), 6);

        let mut state = game(2);
        state.players[0].gain(Building::FurnitureFactory);
        state.players[0].gain(Building::Forest);
        state.players[0].gain(Building::Mine);
        run(&mut state, 0, 8);
        assert_eq!(state.coins(0), 6);

        let mut state = game(2);
        state.players[0].gain(Building::FruitAndVegetableMarket);
        state.players[0].gain(Building::FruitAndVegetableMarket);
        state.players[0].gain(Building::WheatField);
        state.players[0].gain(Building::AppleOrchard);
        state.players[0].gain(Building::FlowerGarden);
        run(&mut state, 0, 11);
        assert_eq!(state.coins(0), 12);
    }

    #[test]
    fn test_food_warehouse_and_flower_shop() {
        let mut state = game(2);
        state.players[0].gain(Building::FoodWarehouse);
        state.players[0].gain(Building::Cafe);
        state.players[0].gain(Building::SushiBar);
        run(&mut state, 0, 12);
        assert_eq!(state.coins(0), 4);

        let mut state = game(2);
        state.players[0].gain(Building::FlowerShop);
        state.players[0].gain(Building::FlowerShop);
        state.players[0].gain(Building::FlowerGarden);
        state.players[0].gain(Building::FlowerGarden);
        state.players[0].gain(Building::FlowerGarden);
        run(&mut state, 0, 6);
        assert_eq!(state.coins(0), 6);
    }

    #[test]
    fn test_tuna_boat_pays_its_own_roll() {
        let mut state = game(2);
        state.players[1].gain(Building::TunaBoat);
        let report = run(&mut state, 0, 12);

        let coins = state.coins(1);
        assert!((2..=12).contains(&coins), "tuna paid {coins}");
        assert_eq!(report.minted(), u64::from(coins));
    }

    #[test]
    fn test_stadium_takes_from_everyone_clamped() {
        let mut state = game(3);
        state.players[0].gain(Building::Stadium);
        state.players[1].coins = 5;
        state.players[2].coins = 1;

        run(&mut state, 0, 6);
        assert_eq!(state.coins(0), 3);
        assert_eq!(state.coins(1), 3);
        assert_eq!(state.coins(2), 0);
    }

    #[test]
    fn test_tv_station_takes_from_chosen_target() {
        let mut state = game(3);
        state.players[0].gain(Building::TvStation);
        state.players[1].coins = 3;
        state.players[2].coins = 8;

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        policy.tv_targets.push_back(1);
        activate(&mut state, 0, 6, &mut dice, &mut policy).unwrap();
        assert_eq!(state.coins(0), 3);
        assert_eq!(state.coins(1), 0);
        assert_eq!(state.coins(2), 8);
    }

    #[test]
    fn test_tv_station_rejects_self_target() {
        let mut state = game(2);
        state.players[0].gain(Building::TvStation);

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        policy.tv_targets.push_back(0);
        let err = activate(&mut state, 0, 6, &mut dice, &mut policy).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalChoice {
                decision: DecisionKind::TvStationTarget,
                ..
            }
        ));
    }

    #[test]
    fn test_publisher_counts_restaurants_and_bread() {
        let mut state = game(2);
        state.players[0].gain(Building::Publisher);
        state.players[1].coins = 10;
        state.players[1].gain(Building::Cafe);
        state.players[1].gain(Building::Bakery);
        state.players[1].gain(Building::FlowerShop);
        state.players[1].gain(Building::Mine);

        run(&mut state, 0, 7);
        assert_eq!(state.coins(0), 3);
        assert_eq!(state.coins(1), 7);
    }

    #[test]
    fn test_tax_office_gate() {
        let mut state = game(3);
        state.players[0].gain(Building::TaxOffice);
        state.players[1].coins = 9;
        state.players[2].coins = 10;

        run(&mut state, 0, 8);
        assert_eq!(state.coins(1), 9);
        assert_eq!(state.coins(2), 5);
        assert_eq!(state.coins(0), 5);
    }

    #[test]
    fn test_tax_office_rounds_down() {
        let mut state = game(2);
        state.players[0].gain(Building::TaxOffice);
        state.players[1].coins = 15;

        run(&mut state, 0, 9);
        assert_eq!(state.coins(1), 8);
        assert_eq!(state.coins(0), 7);
    }

    #[test]
    fn test_business_center_swap() {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        state.players[0].gain(Building::WheatField);
        state.players[1].gain(Building::Mine);
        state.players[1].gain(Building::Mine);

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        let swap = BusinessCenterSwap {
            target: 1,
            theirs: Building::Mine,
            ours: Building::WheatField,
        };
        policy.swaps.push_back(swap);
        let report = activate(&mut state, 0, 6, &mut dice, &mut policy).unwrap();

        assert_eq!(report.swap, Some(swap));
        assert_eq!(state.count(0, Building::Mine), 1);
        assert_eq!(state.count(0, Building::WheatField), 0);
        assert!(!state.players[0].owned.contains_key(&Building::WheatField));
        assert_eq!(state.count(1, Building::Mine), 1);
        assert_eq!(state.count(1, Building::WheatField), 1);
        assert!(state.players[0].owns(Building::BusinessCenter));
    }

    #[test]
    fn test_business_center_rejects_unowned_building() {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        state.players[0].gain(Building::WheatField);
        state.players[1].gain(Building::Mine);
        let before = state.clone();

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        policy.swaps.push_back(BusinessCenterSwap {
            target: 1,
            theirs: Building::Forest,
            ours: Building::WheatField,
        });
        let err = activate(&mut state, 0, 6, &mut dice, &mut policy).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalChoice {
                decision: DecisionKind::BusinessCenterSwap,
                ..
            }
        ));
        assert_eq!(state.players, before.players);
    }

    fn capped_mines() -> GameState {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        state.players[0].gain(Building::WheatField);
        for _ in 0..Building::Mine.ownership_cap() {
            state.players[0].gain(Building::Mine);
        }
        state.players[1].gain(Building::Mine);
        state.players[1].gain(Building::Forest);
        state
    }

    #[test]
    fn test_business_center_rejects_taking_past_cap() {
        let mut state = capped_mines();
        let before = state.clone();

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        policy.swaps.push_back(BusinessCenterSwap {
            target: 1,
            theirs: Building::Mine,
            ours: Building::WheatField,
        });
        let err = activate(&mut state, 0, 6, &mut dice, &mut policy).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalChoice {
                decision: DecisionKind::BusinessCenterSwap,
                ..
            }
        ));
        assert_eq!(state.players, before.players);
    }

    #[test]
    fn test_business_center_offers_only_buildings_within_cap() {
        let mut state = capped_mines();
        let report = run(&mut state, 0, 6);

        assert_eq!(
            report.swap,
            Some(BusinessCenterSwap {
                target: 1,
                theirs: Building::Forest,
                ours: Building::WheatField,
            })
        );
        assert_eq!(state.count(0, Building::Mine), Building::Mine.ownership_cap());
        assert_eq!(state.count(0, Building::Forest), 1);
    }

    #[test]
    fn test_business_center_rejects_giving_past_cap() {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        state.players[0].gain(Building::WheatField);
        state.players[0].gain(Building::Bakery);
        for _ in 0..Building::WheatField.ownership_cap() {
            state.players[1].gain(Building::WheatField);
        }
        state.players[1].gain(Building::Forest);
        let before = state.clone();

        let mut dice = DiceRoller::new(1);
        let mut policy = ScriptedPolicy::new();
        policy.swaps.push_back(BusinessCenterSwap {
            target: 1,
            theirs: Building::Forest,
            ours: Building::WheatField,
        });
        assert!(activate(&mut state, 0, 6, &mut dice, &mut policy).is_err());
        assert_eq!(state.players, before.players);

        let report = run(&mut state, 0, 6);
        let swap = report.swap.unwrap();
        assert_eq!(swap.ours, Building::Bakery);
        assert_eq!(swap.theirs, Building::WheatField);
        assert_eq!(state.count(1, Building::Bakery), 1);
        assert_eq!(state.count(0, Building::WheatField), 2);
    }

    #[test]
    fn test_business_center_skips_when_every_swap_overflows() {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        for _ in 0..Building::Mine.ownership_cap() {
            state.players[0].gain(Building::Mine);
        }
        state.players[1].gain(Building::Mine);
        let before = state.clone();

        let report = run(&mut state, 0, 6);
        assert!(report.swap.is_none());
        assert_eq!(state.players, before.players);
    }

    #[test]
    fn test_business_center_without_swappable_buildings_is_inert() {
        let mut state = game(2);
        state.players[0].gain(Building::BusinessCenter);
        state.players[1].gain(Building::Mine);

        let report = run(&mut state, 0, 6);
        assert!(report.swap.is_none());
        assert_eq!(state.count(1, Building::Mine), 1);
    }

    #[test]
    fn test_unowned_major_does_nothing() {
        let mut state = game(2);
        state.players[1].coins = 20;

        let report = run(&mut state, 0, 8);
        assert!(report.transfers.is_empty());
        assert_eq!(state.coins(1), 20);
    }

    #[test]
    fn test_net_and_mirrored_transfers() {
        let mut state = game(3);
        state.players[0].coins = 4;
        state.players[0].gain(Building::Stadium);
        state.players[1].coins = 2;
        state.players[2].coins = 2;

        let report = run(&mut state, 0, 6);
        assert_eq!(report.net(0), 4);
        assert_eq!(report.net(1), -2);
        assert_eq!(report.net(2), -2);
        assert_eq!(report.minted(), 0);
    }

    #[test]
    fn test_prunes_zero_entries() {
        let mut state = game(2);
        state.players[0].owned.insert(Building::Cafe, 0);
        run(&mut state, 0, 5);
        assert!(state.players[0].owned.is_empty());
    }
}
