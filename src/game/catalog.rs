//! Static building reference data.
//!
//! Every building has a cost, the set of dice totals that activate it, a
//! payout (flat per-copy rate or a bespoke effect), a category and a
//! per-player ownership cap. Nothing here holds state.
//!
//! # Canonical order
//!
//! `Building::ALL` lists buildings in the canonical catalog order. The
//! derived `Ord` follows it, so every `BTreeMap<Building, _>` iterates in
//! catalog order, as do the category partitions. Record columns and the
//! order in which same-phase cards resolve both depend on this.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Ownership cap for landmarks and major establishments.
pub const SINGLE_COPY_CAP: u32 = 1;

/// Ownership cap for industries and restaurants.
pub const ESTABLISHMENT_CAP: u32 = 6;

/// Market copies of every industry and restaurant, independent of player count.
pub const ESTABLISHMENT_SUPPLY: u32 = 6;

/// Commodity tag carried by primary industries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    /// Fields and orchards.
    Wheat,
    /// Livestock.
    Cow,
    /// Forests and mines.
    Gear,
    /// Fishing boats.
    Boat,
}

/// Product tag carried by secondary industries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goods {
    /// Shops; the shopping mall raises their flat rate.
    Bread,
    /// Factories and warehouses.
    Factory,
    /// Produce markets.
    Fruit,
}

/// Category of a building. Drives activation phase and special logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Single-copy building; owning all of them wins the game.
    Landmark,
    /// Single-copy "purple" building with an effect on opponents.
    MajorEstablishment,
    /// "Blue" building paid by the bank on anyone's roll.
    PrimaryIndustry(Commodity),
    /// "Green" building paid by the bank on its owner's roll.
    SecondaryIndustry(Goods),
    /// "Red" building paid by the active player to its owner.
    Restaurant,
}

/// Bespoke payout logic, one variant per building that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialEffect {
    /// 2 coins per owned wheat building.
    FruitAndVegetableMarket,
    /// 3 coins per owned cow building.
    CheeseFactory,
    /// 3 coins per owned gear building.
    FurnitureFactory,
    /// 2 coins per owned restaurant.
    FoodWarehouse,
    /// 1 coin per flower garden owned by the active player.
    FlowerShop,
    /// Pays an independent two-dice roll.
    TunaBoat,
    /// Takes 3 coins (4 with shopping mall) if the owner has a harbor.
    SushiBar,
    /// Takes 2 coins from every opponent.
    Stadium,
    /// Takes 5 coins from one chosen opponent.
    TvStation,
    /// Swaps one establishment with a chosen opponent.
    BusinessCenter,
    /// Takes 1 coin per restaurant and bread shop from every opponent.
    Publisher,
    /// Takes half the coins of every opponent holding 10 or more.
    TaxOffice,
}

/// How a building pays out when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payout {
    /// Fixed coins per owned copy.
    Flat(u32),
    /// Resolved by bespoke logic.
    Special(SpecialEffect),
    /// Never activated by a roll; landmarks change the rules instead.
    Passive,
}

/// Every building in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    /// Wheat field.
    WheatField,
    /// Apple orchard.
    AppleOrchard,
    /// Ranch.
    Ranch,
    /// Forest.
    Forest,
    /// Mine.
    Mine,
    /// Fruit and vegetable market.
    FruitAndVegetableMarket,
    /// Cheese factory.
    CheeseFactory,
    /// Furniture factory.
    FurnitureFactory,
    /// Bakery.
    Bakery,
    /// Convenience store.
    ConvenienceStore,
    /// Cafe.
    Cafe,
    /// Family restaurant.
    FamilyRestaurant,
    /// Stadium.
    Stadium,
    /// TV station.
    TvStation,
    /// Business center.
    BusinessCenter,
    /// Shopping mall.
    ShoppingMall,
    /// Amusement park.
    AmusementPark,
    /// Radio tower.
    RadioTower,
    /// Airport.
    Airport,
    /// Train station.
    TrainStation,
    /// Flower garden.
    FlowerGarden,
    /// Mackerel boat.
    MackerelBoat,
    /// Tuna boat.
    TunaBoat,
    /// Flower shop.
    FlowerShop,
    /// Food warehouse.
    FoodWarehouse,
    /// Sushi bar.
    SushiBar,
    /// Pizza joint.
    PizzaJoint,
    /// Hamburger stand.
    HamburgerStand,
    /// Publisher.
    Publisher,
    /// Tax office.
    TaxOffice,
    /// Harbor.
    Harbor,
}

/// Reference data for one building.
#[derive(Debug, Clone, Copy)]
pub struct BuildingInfo {
    /// Snake-case identifier used in records and on the command line.
    pub name: &'static str,
    /// Purchase price.
    pub cost: u32,
    /// Dice totals that activate the building.
    pub activation_rolls: &'static [u8],
    /// Payout rule.
    pub payout: Payout,
    /// Category.
    pub category: Category,
}

const fn info(
    name: &'static str,
    cost: u32,
    activation_rolls: &'static [u8],
    payout: Payout,
    category: Category,
) -> BuildingInfo {
    BuildingInfo {
        name,
        cost,
        activation_rolls,
        payout,
        category,
    }
}

use Category::{Landmark, MajorEstablishment, PrimaryIndustry, Restaurant, SecondaryIndustry};
use Payout::{Flat, Passive, Special};

impl Building {
    /// All buildings in canonical catalog order.
    pub const ALL: [Building; 31] = [
        Building::WheatField,
        Building::AppleOrchard,
        Building::Ranch,
        Building::Forest,
        Building::Mine,
        Building::FruitAndVegetableMarket,
        Building::CheeseFactory,
        Building::FurnitureFactory,
        Building::Bakery,
        Building::ConvenienceStore,
        Building::Cafe,
        Building::FamilyRestaurant,
        Building::Stadium,
        Building::TvStation,
        Building::BusinessCenter,
        Building::ShoppingMall,
        Building::AmusementPark,
        Building::RadioTower,
        Building::Airport,
        Building::TrainStation,
        Building::FlowerGarden,
        Building::MackerelBoat,
        Building::TunaBoat,
        Building::FlowerShop,
        Building::FoodWarehouse,
        Building::SushiBar,
        Building::PizzaJoint,
        Building::HamburgerStand,
        Building::Publisher,
        Building::TaxOffice,
        Building::Harbor,
    ];

    /// Landmarks in catalog order.
    pub const LANDMARKS: [Building; 6] = [
        Building::ShoppingMall,
        Building::AmusementPark,
        Building::RadioTower,
        Building::Airport,
        Building::TrainStation,
        Building::Harbor,
    ];

    /// Major establishments in catalog order.
    pub const MAJOR_ESTABLISHMENTS: [Building; 5] = [
        Building::Stadium,
        Building::TvStation,
        Building::BusinessCenter,
        Building::Publisher,
        Building::TaxOffice,
    ];

    /// Primary industries in catalog order.
    pub const PRIMARY_INDUSTRIES: [Building; 8] = [
        Building::WheatField,
        Building::AppleOrchard,
        Building::Ranch,
        Building::Forest,
        Building::Mine,
        Building::FlowerGarden,
        Building::MackerelBoat,
        Building::TunaBoat,
    ];

    /// Secondary industries in catalog order.
    pub const SECONDARY_INDUSTRIES: [Building; 7] = [
        Building::FruitAndVegetableMarket,
        Building::CheeseFactory,
        Building::FurnitureFactory,
        Building::Bakery,
        Building::ConvenienceStore,
        Building::FlowerShop,
        Building::FoodWarehouse,
    ];

    /// Restaurants in catalog order.
    pub const RESTAURANTS: [Building; 5] = [
        Building::Cafe,
        Building::FamilyRestaurant,
        Building::SushiBar,
        Building::PizzaJoint,
        Building::HamburgerStand,
    ];

    /// Reference data for this building.
    #[must_use]
    pub const fn info(self) -> BuildingInfo {
        match self {
            Building::WheatField => info("wheat_field", 1, &[1], Flat(1), PrimaryIndustry(Commodity::Wheat)),
            Building::AppleOrchard => info("apple_orchard", 3, &[10], Flat(3), PrimaryIndustry(Commodity::Wheat)),
            Building::Ranch => info("ranch", 1, &[2], Flat(1), PrimaryIndustry(Commodity::Cow)),
            Building::Forest => info("forest", 3, &[5], Flat(1), PrimaryIndustry(Commodity::Gear)),
            Building::Mine => info("mine", 6, &[9], Flat(5), PrimaryIndustry(Commodity::Gear)),
            Building::FruitAndVegetableMarket => info(
                "fruit_and_vegetable_market",
                2,
                &[11, 12],
                Special(SpecialEffect::FruitAndVegetableMarket),
                SecondaryIndustry(Goods::Fruit),
            ),
            Building::CheeseFactory => info(
                "cheese_factory",
                5,
                &[7],
                Special(SpecialEffect::CheeseFactory),
                SecondaryIndustry(Goods::Factory),
            ),
            Building::FurnitureFactory => info(
                "furniture_factory",
                3,
                &[8],
                Special(SpecialEffect::FurnitureFactory),
                SecondaryIndustry(Goods::Factory),
            ),
            Building::Bakery => info("bakery", 1, &[2, 3], Flat(1), SecondaryIndustry(Goods::Bread)),
            Building::ConvenienceStore => {
                info("convenience_store", 2, &[4], Flat(3), SecondaryIndustry(Goods::Bread))
            }
            Building::Cafe => info("cafe", 2, &[3], Flat(1), Restaurant),
            Building::FamilyRestaurant => info("family_restaurant", 3, &[9, 10], Flat(2), Restaurant),
            Building::Stadium => info("stadium", 6, &[6], Special(SpecialEffect::Stadium), MajorEstablishment),
            Building::TvStation => {
                info("tv_station", 7, &[6], Special(SpecialEffect::TvStation), MajorEstablishment)
            }
            Building::BusinessCenter => info(
                "business_center",
                8,
                &[6],
                Special(SpecialEffect::BusinessCenter),
                MajorEstablishment,
            ),
            Building::ShoppingMall => info("shopping_mall", 10, &[], Passive, Landmark),
            Building::AmusementPark => info("amusement_park", 16, &[], Passive, Landmark),
            Building::RadioTower => info("radio_tower", 22, &[], Passive, Landmark),
            Building::Airport => info("airport", 30, &[], Passive, Landmark),
            Building::TrainStation => info("train_station", 4, &[], Passive, Landmark),
            Building::FlowerGarden => {
                info("flower_garden", 2, &[4], Flat(1), PrimaryIndustry(Commodity::Wheat))
            }
            Building::MackerelBoat => {
                info("mackerel_boat", 2, &[8], Flat(3), PrimaryIndustry(Commodity::Boat))
            }
            Building::TunaBoat => info(
                "tuna_boat",
                5,
                &[12, 13, 14],
                Special(SpecialEffect::TunaBoat),
                PrimaryIndustry(Commodity::Boat),
            ),
            Building::FlowerShop => info(
                "flower_shop",
                1,
                &[6],
                Special(SpecialEffect::FlowerShop),
                SecondaryIndustry(Goods::Bread),
            ),
            Building::FoodWarehouse => info(
                "food_warehouse",
                2,
                &[12, 13],
                Special(SpecialEffect::FoodWarehouse),
                SecondaryIndustry(Goods::Factory),
            ),
            Building::SushiBar => info("sushi_bar", 2, &[1], Special(SpecialEffect::SushiBar), Restaurant),
            Building::PizzaJoint => info("pizza_joint", 1, &[7], Flat(1), Restaurant),
            Building::HamburgerStand => info("hamburger_stand", 1, &[8], Flat(1), Restaurant),
            Building::Publisher => {
                info("publisher", 5, &[7], Special(SpecialEffect::Publisher), MajorEstablishment)
            }
            Building::TaxOffice => {
                info("tax_office", 4, &[8, 9], Special(SpecialEffect::TaxOffice), MajorEstablishment)
            }
            Building::Harbor => info("harbor", 2, &[], Passive, Landmark),
        }
    }

    /// Snake-case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// Purchase price.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.info().cost
    }

    /// Dice totals that activate this building.
    #[must_use]
    pub const fn activation_rolls(self) -> &'static [u8] {
        self.info().activation_rolls
    }

    /// Whether `roll` is in the activation set.
    #[must_use]
    pub fn activates_on(self, roll: u8) -> bool {
        self.activation_rolls().contains(&roll)
    }

    /// Payout rule.
    #[must_use]
    pub const fn payout(self) -> Payout {
        self.info().payout
    }

    /// Category.
    #[must_use]
    pub const fn category(self) -> Category {
        self.info().category
    }

    /// Maximum copies a single player may own.
    #[must_use]
    pub const fn ownership_cap(self) -> u32 {
        match self.category() {
            Landmark | MajorEstablishment => SINGLE_COPY_CAP,
            _ => ESTABLISHMENT_CAP,
        }
    }

    /// Whether this is a landmark.
    #[must_use]
    pub const fn is_landmark(self) -> bool {
        matches!(self.category(), Landmark)
    }

    /// Whether this is a major establishment.
    #[must_use]
    pub const fn is_major(self) -> bool {
        matches!(self.category(), MajorEstablishment)
    }

    /// Whether this is a restaurant.
    #[must_use]
    pub const fn is_restaurant(self) -> bool {
        matches!(self.category(), Restaurant)
    }

    /// Whether the business center may move this building between players.
    #[must_use]
    pub const fn is_swappable(self) -> bool {
        !matches!(self.category(), Landmark | MajorEstablishment)
    }

    /// Commodity tag, for primary industries.
    #[must_use]
    pub const fn commodity(self) -> Option<Commodity> {
        match self.category() {
            PrimaryIndustry(commodity) => Some(commodity),
            _ => None,
        }
    }

    /// Product tag, for secondary industries.
    #[must_use]
    pub const fn goods(self) -> Option<Goods> {
        match self.category() {
            SecondaryIndustry(goods) => Some(goods),
            _ => None,
        }
    }

    /// Position in `Building::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a building name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuilding(pub String);

impl fmt::Display for UnknownBuilding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown building: {}", self.0)
    }
}

impl std::error::Error for UnknownBuilding {}

impl FromStr for Building {
    type Err = UnknownBuilding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Building::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| UnknownBuilding(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (i, building) in Building::ALL.iter().enumerate() {
            assert_eq!(building.index(), i, "{building} out of place");
        }
    }

    #[test]
    fn test_partitions_cover_catalog_exactly_once() {
        let mut seen = Vec::new();
        seen.extend(Building::LANDMARKS);
        seen.extend(Building::MAJOR_ESTABLISHMENTS);
        seen.extend(Building::PRIMARY_INDUSTRIES);
        seen.extend(Building::SECONDARY_INDUSTRIES);
        seen.extend(Building::RESTAURANTS);
        seen.sort();
        assert_eq!(seen, Building::ALL.to_vec());
    }

    #[test]
    fn test_partitions_match_categories() {
        assert!(Building::LANDMARKS.iter().all(|b| b.is_landmark()));
        assert!(Building::MAJOR_ESTABLISHMENTS.iter().all(|b| b.is_major()));
        assert!(Building::PRIMARY_INDUSTRIES.iter().all(|b| b.commodity().is_some()));
        assert!(Building::SECONDARY_INDUSTRIES.iter().all(|b| b.goods().is_some()));
        assert!(Building::RESTAURANTS.iter().all(|b| b.is_restaurant()));
    }

    #[test]
    fn test_partitions_are_in_catalog_order() {
        for partition in [
            &Building::LANDMARKS[..],
            &Building::MAJOR_ESTABLISHMENTS[..],
            &Building::PRIMARY_INDUSTRIES[..],
            &Building::SECONDARY_INDUSTRIES[..],
            &Building::RESTAURANTS[..],
        ] {
            assert!(partition.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_ownership_caps() {
        assert_eq!(Building::Harbor.ownership_cap(), 1);
        assert_eq!(Building::TaxOffice.ownership_cap(), 1);
        assert_eq!(Building::WheatField.ownership_cap(), 6);
        assert_eq!(Building::SushiBar.ownership_cap(), 6);
    }

    #[test]
    fn test_activation_rolls_in_range() {
        for building in Building::ALL {
            assert!(building.activation_rolls().iter().all(|r| (1..=14).contains(r)));
            let passive = building.payout() == Payout::Passive;
            assert_eq!(passive, building.is_landmark(), "{building}");
            assert_eq!(passive, building.activation_rolls().is_empty(), "{building}");
        }
    }

    #[test]
    fn test_flat_payouts_are_positive() {
        for building in Building::ALL {
            if let Payout::Flat(rate) = building.payout() {
                assert!(rate > 0, "{building}");
            }
        }
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(Building::Airport.cost(), 30);
        assert_eq!(Building::Mine.payout(), Payout::Flat(5));
        assert!(Building::Bakery.activates_on(2));
        assert!(Building::Bakery.activates_on(3));
        assert!(!Building::Bakery.activates_on(4));
        assert_eq!(Building::FlowerShop.goods(), Some(Goods::Bread));
        assert_eq!(Building::Mine.commodity(), Some(Commodity::Gear));
    }

    #[test]
    fn test_name_round_trip() {
        for building in Building::ALL {
            assert_eq!(building.name().parse::<Building>(), Ok(building));
        }
        assert!("city_hall".parse::<Building>().is_err());
    }

    #[test]
    fn test_swappable() {
        assert!(Building::Cafe.is_swappable());
        assert!(Building::WheatField.is_swappable());
        assert!(!Building::BusinessCenter.is_swappable());
        assert!(!Building::Harbor.is_swappable());
    }
}
