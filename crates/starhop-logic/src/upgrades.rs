//! Upgrade tree: four categories of three tiers each, the cumulative effect
//! fold, and purchasing.

use crate::constants::gameplay;
use crate::state::PlayerState;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum UpgradeCategory {
    Engines = 0,
    Sensors = 1,
    FuelSystems = 2,
    Comms = 3,
}

/// One modifier granted by owning a tier. Lower tiers stay in effect when a
/// higher tier is bought.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier {
    FuelCostMult(f64),
    JumpRange(u32),
    SystemSpeedMult(f64),
    RevealEvents,
    SuccessRateBonus(f64),
    OrbitalScan,
    MaxFuelMult(f64),
    FuelGainMult(f64),
    SolarRegen(f64),
    Diplomacy,
    DataGainMult(f64),
    BeaconNetwork,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeTier {
    pub id: &'static str,
    pub label: &'static str,
    pub cost: u32,
    pub description: &'static str,
    pub modifiers: &'static [Modifier],
}

static ENGINES: [UpgradeTier; 3] = [
    UpgradeTier {
        id: "fuel_efficiency",
        label: "Fuel Efficiency",
        cost: 50,
        description: "Reduce fuel cost per jump by 25%",
        modifiers: &[Modifier::FuelCostMult(0.75)],
    },
    UpgradeTier {
        id: "jump_range",
        label: "Extended Range",
        cost: 120,
        description: "Jump to stars 2 hops away",
        modifiers: &[Modifier::JumpRange(2)],
    },
    UpgradeTier {
        id: "warp_mk2",
        label: "Warp Mk II",
        cost: 250,
        description: "Further fuel reduction and faster system travel",
        modifiers: &[Modifier::FuelCostMult(0.67), Modifier::SystemSpeedMult(1.5)],
    },
];

static SENSORS: [UpgradeTier; 3] = [
    UpgradeTier {
        id: "event_preview",
        label: "Event Scanner",
        cost: 40,
        description: "See event indicators on planets",
        modifiers: &[Modifier::RevealEvents],
    },
    UpgradeTier {
        id: "deep_scan",
        label: "Deep Scanner",
        cost: 100,
        description: "+10% success rate on event choices",
        modifiers: &[Modifier::SuccessRateBonus(0.10)],
    },
    UpgradeTier {
        id: "orbital_scan",
        label: "Orbital Scan",
        cost: 200,
        description: "Scan planets without flying to them",
        modifiers: &[Modifier::OrbitalScan],
    },
];

static FUEL_SYSTEMS: [UpgradeTier; 3] = [
    UpgradeTier {
        id: "tank_expansion",
        label: "Tank Expansion",
        cost: 60,
        description: "Increase max fuel by 50%",
        modifiers: &[Modifier::MaxFuelMult(1.5)],
    },
    UpgradeTier {
        id: "harvest_bonus",
        label: "Fuel Harvester",
        cost: 130,
        description: "+50% fuel gained from planets",
        modifiers: &[Modifier::FuelGainMult(1.5)],
    },
    UpgradeTier {
        id: "solar_regen",
        label: "Solar Collector",
        cost: 220,
        description: "Faster stellar fuel absorption",
        modifiers: &[Modifier::SolarRegen(gameplay::SOLAR_REGEN_RATE)],
    },
];

static COMMS: [UpgradeTier; 3] = [
    UpgradeTier {
        id: "diplomacy",
        label: "Diplomacy Suite",
        cost: 45,
        description: "Unlock diplomatic choices in alien events",
        modifiers: &[Modifier::Diplomacy],
    },
    UpgradeTier {
        id: "trade_bonus",
        label: "Trade Protocols",
        cost: 110,
        description: "+30% data rewards from events and scans",
        modifiers: &[Modifier::DataGainMult(1.3)],
    },
    UpgradeTier {
        id: "beacon_network",
        label: "Beacon Network",
        cost: 240,
        description: "Reveal all stars within 2 jumps of visited",
        modifiers: &[Modifier::BeaconNetwork],
    },
];

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 4] = [
        Self::Engines,
        Self::Sensors,
        Self::FuelSystems,
        Self::Comms,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Engines => "engines",
            Self::Sensors => "sensors",
            Self::FuelSystems => "fuel_systems",
            Self::Comms => "comms",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Engines => "Engines",
            Self::Sensors => "Sensors",
            Self::FuelSystems => "Fuel Systems",
            Self::Comms => "Communications",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Engines => ">>",
            Self::Sensors => "((",
            Self::FuelSystems => "{}",
            Self::Comms => "~=",
        }
    }

    pub fn tiers(self) -> &'static [UpgradeTier; 3] {
        match self {
            Self::Engines => &ENGINES,
            Self::Sensors => &SENSORS,
            Self::FuelSystems => &FUEL_SYSTEMS,
            Self::Comms => &COMMS,
        }
    }

    /// Tier definition for a 1-based tier number.
    pub fn tier(self, tier: u8) -> Option<&'static UpgradeTier> {
        if tier == 0 {
            return None;
        }
        self.tiers().get(tier as usize - 1)
    }
}

impl fmt::Display for UpgradeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Owned tier (0-3) per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub engines: u8,
    pub sensors: u8,
    pub fuel_systems: u8,
    pub comms: u8,
}

impl UpgradeLevels {
    pub fn get(&self, category: UpgradeCategory) -> u8 {
        match category {
            UpgradeCategory::Engines => self.engines,
            UpgradeCategory::Sensors => self.sensors,
            UpgradeCategory::FuelSystems => self.fuel_systems,
            UpgradeCategory::Comms => self.comms,
        }
    }

    fn slot(&mut self, category: UpgradeCategory) -> &mut u8 {
        match category {
            UpgradeCategory::Engines => &mut self.engines,
            UpgradeCategory::Sensors => &mut self.sensors,
            UpgradeCategory::FuelSystems => &mut self.fuel_systems,
            UpgradeCategory::Comms => &mut self.comms,
        }
    }

    /// Clamp every level into `0..=3`. Used when loading untrusted saves.
    pub fn clamped(mut self) -> Self {
        for cat in UpgradeCategory::ALL {
            let slot = self.slot(cat);
            *slot = (*slot).min(gameplay::MAX_UPGRADE_TIER);
        }
        self
    }

    /// Fold every owned tier's modifiers into one effect set.
    pub fn effects(&self) -> UpgradeEffects {
        let mut effects = UpgradeEffects::default();
        for cat in UpgradeCategory::ALL {
            let owned = self.get(cat).min(gameplay::MAX_UPGRADE_TIER) as usize;
            for tier in &cat.tiers()[..owned] {
                for modifier in tier.modifiers {
                    effects.apply(*modifier);
                }
            }
        }
        effects
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeEffects {
    pub fuel_cost_mult: f64,
    /// Hops a single jump may span.
    pub jump_range: u32,
    pub system_speed_mult: f64,
    pub reveal_events: bool,
    pub success_rate_bonus: f64,
    pub orbital_scan: bool,
    pub max_fuel_mult: f64,
    pub fuel_gain_mult: f64,
    pub solar_regen: bool,
    pub regen_rate: f64,
    pub diplomacy: bool,
    pub data_gain_mult: f64,
    pub beacon_network: bool,
}

impl Default for UpgradeEffects {
    fn default() -> Self {
        Self {
            fuel_cost_mult: 1.0,
            jump_range: 1,
            system_speed_mult: 1.0,
            reveal_events: false,
            success_rate_bonus: 0.0,
            orbital_scan: false,
            max_fuel_mult: 1.0,
            fuel_gain_mult: 1.0,
            solar_regen: false,
            regen_rate: gameplay::BASE_REGEN_RATE,
            diplomacy: false,
            data_gain_mult: 1.0,
            beacon_network: false,
        }
    }
}

impl UpgradeEffects {
    fn apply(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::FuelCostMult(m) => self.fuel_cost_mult *= m,
            Modifier::JumpRange(r) => self.jump_range = self.jump_range.max(r),
            Modifier::SystemSpeedMult(m) => self.system_speed_mult = m,
            Modifier::RevealEvents => self.reveal_events = true,
            Modifier::SuccessRateBonus(b) => self.success_rate_bonus += b,
            Modifier::OrbitalScan => self.orbital_scan = true,
            Modifier::MaxFuelMult(m) => self.max_fuel_mult = m,
            Modifier::FuelGainMult(m) => self.fuel_gain_mult = m,
            Modifier::SolarRegen(rate) => {
                self.solar_regen = true;
                self.regen_rate = rate;
            }
            Modifier::Diplomacy => self.diplomacy = true,
            Modifier::DataGainMult(m) => self.data_gain_mult = m,
            Modifier::BeaconNetwork => self.beacon_network = true,
        }
    }

    /// Link distance revealed around each visited star.
    pub fn reveal_hops(&self) -> u32 {
        if self.beacon_network {
            self.jump_range.max(2)
        } else {
            self.jump_range
        }
    }
}

// ============================================================================
// PURCHASING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    UnknownTier { category: UpgradeCategory, tier: u8 },
    MissingPrerequisite { category: UpgradeCategory, tier: u8 },
    AlreadyOwned { category: UpgradeCategory, tier: u8 },
    InsufficientData { cost: u32, available: i64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::UnknownTier { category, tier } => {
                write!(f, "{} has no tier {}", category, tier)
            }
            PurchaseError::MissingPrerequisite { category, tier } => {
                write!(f, "{} tier {} requires tier {}", category, tier, tier - 1)
            }
            PurchaseError::AlreadyOwned { category, tier } => {
                write!(f, "{} tier {} already owned", category, tier)
            }
            PurchaseError::InsufficientData { cost, available } => {
                write!(f, "needs {} data, have {}", cost, available)
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Buy `tier` (1-based) of `category`. On success the cost is deducted,
/// the level is set to `tier`, and the cost is returned.
pub fn purchase_upgrade(
    state: &mut PlayerState,
    category: UpgradeCategory,
    tier: u8,
) -> Result<u32, PurchaseError> {
    let def = category
        .tier(tier)
        .ok_or(PurchaseError::UnknownTier { category, tier })?;
    let owned = state.upgrades.get(category);
    if owned >= tier {
        return Err(PurchaseError::AlreadyOwned { category, tier });
    }
    if owned + 1 < tier {
        return Err(PurchaseError::MissingPrerequisite { category, tier });
    }
    if state.data < def.cost as i64 {
        return Err(PurchaseError::InsufficientData {
            cost: def.cost,
            available: state.data,
        });
    }
    state.data -= def.cost as i64;
    *state.upgrades.slot(category) = tier;
    Ok(def.cost)
}

/// Next purchasable tier, or `None` when maxed out.
pub fn next_tier(state: &PlayerState, category: UpgradeCategory) -> Option<u8> {
    let owned = state.upgrades.get(category);
    if owned >= gameplay::MAX_UPGRADE_TIER {
        None
    } else {
        Some(owned + 1)
    }
}

pub fn can_afford_next(state: &PlayerState, category: UpgradeCategory) -> bool {
    next_tier(state, category)
        .and_then(|t| category.tier(t))
        .is_some_and(|def| state.data >= def.cost as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_state;

    fn levels(engines: u8, sensors: u8, fuel_systems: u8, comms: u8) -> UpgradeLevels {
        UpgradeLevels {
            engines,
            sensors,
            fuel_systems,
            comms,
        }
    }

    #[test]
    fn test_default_effects() {
        let e = UpgradeLevels::default().effects();
        assert_eq!(e, UpgradeEffects::default());
        assert_eq!(e.fuel_cost_mult, 1.0);
        assert_eq!(e.jump_range, 1);
        assert!(!e.solar_regen);
    }

    #[test]
    fn test_engine_tiers_cumulative() {
        assert_eq!(levels(1, 0, 0, 0).effects().fuel_cost_mult, 0.75);
        let e2 = levels(2, 0, 0, 0).effects();
        assert_eq!(e2.fuel_cost_mult, 0.75);
        assert_eq!(e2.jump_range, 2);
        let e3 = levels(3, 0, 0, 0).effects();
        assert!((e3.fuel_cost_mult - 0.75 * 0.67).abs() < 1e-12);
        assert_eq!(e3.jump_range, 2);
        assert_eq!(e3.system_speed_mult, 1.5);
    }

    #[test]
    fn test_sensor_tiers() {
        let e = levels(0, 3, 0, 0).effects();
        assert!(e.reveal_events);
        assert!((e.success_rate_bonus - 0.10).abs() < 1e-12);
        assert!(e.orbital_scan);
    }

    #[test]
    fn test_fuel_system_tiers() {
        let e = levels(0, 0, 3, 0).effects();
        assert_eq!(e.max_fuel_mult, 1.5);
        assert_eq!(e.fuel_gain_mult, 1.5);
        assert!(e.solar_regen);
        assert_eq!(e.regen_rate, 0.5);
    }

    #[test]
    fn test_comms_tiers() {
        let e = levels(0, 0, 0, 3).effects();
        assert!(e.diplomacy);
        assert_eq!(e.data_gain_mult, 1.3);
        assert!(e.beacon_network);
        assert_eq!(e.reveal_hops(), 2);
    }

    #[test]
    fn test_tree_shape() {
        for cat in UpgradeCategory::ALL {
            let tiers = cat.tiers();
            assert_eq!(tiers.len(), 3);
            for pair in tiers.windows(2) {
                assert!(pair[0].cost < pair[1].cost);
            }
            assert!(cat.tier(0).is_none());
            assert!(cat.tier(4).is_none());
        }
    }

    #[test]
    fn test_purchase_success() {
        let mut state = create_state(42);
        state.data = 100;
        assert_eq!(purchase_upgrade(&mut state, UpgradeCategory::Engines, 1), Ok(50));
        assert_eq!(state.data, 50);
        assert_eq!(state.upgrades.engines, 1);
    }

    #[test]
    fn test_purchase_requires_previous_tier() {
        let mut state = create_state(42);
        state.data = 1000;
        assert_eq!(
            purchase_upgrade(&mut state, UpgradeCategory::Sensors, 2),
            Err(PurchaseError::MissingPrerequisite {
                category: UpgradeCategory::Sensors,
                tier: 2
            })
        );
        assert_eq!(state.data, 1000);
        assert_eq!(state.upgrades.sensors, 0);
    }

    #[test]
    fn test_purchase_insufficient_data() {
        let mut state = create_state(42);
        state.data = 30;
        assert!(matches!(
            purchase_upgrade(&mut state, UpgradeCategory::Comms, 1),
            Err(PurchaseError::InsufficientData { cost: 45, available: 30 })
        ));
        assert_eq!(state.data, 30);
    }

    #[test]
    fn test_purchase_rejects_owned_and_unknown() {
        let mut state = create_state(42);
        state.data = 1000;
        state.upgrades.engines = 2;
        assert!(matches!(
            purchase_upgrade(&mut state, UpgradeCategory::Engines, 1),
            Err(PurchaseError::AlreadyOwned { .. })
        ));
        assert!(matches!(
            purchase_upgrade(&mut state, UpgradeCategory::Engines, 4),
            Err(PurchaseError::UnknownTier { .. })
        ));
        assert!(matches!(
            purchase_upgrade(&mut state, UpgradeCategory::Engines, 0),
            Err(PurchaseError::UnknownTier { .. })
        ));
        assert_eq!(state.data, 1000);
    }

    #[test]
    fn test_next_tier() {
        let mut state = create_state(42);
        assert_eq!(next_tier(&state, UpgradeCategory::Sensors), Some(1));
        assert!(!can_afford_next(&state, UpgradeCategory::Sensors));
        state.data = 40;
        assert!(can_afford_next(&state, UpgradeCategory::Sensors));
        state.upgrades.sensors = 3;
        assert_eq!(next_tier(&state, UpgradeCategory::Sensors), None);
    }

    #[test]
    fn test_clamped() {
        let l = levels(9, 3, 0, 4).clamped();
        assert_eq!(l, levels(3, 3, 0, 3));
    }
}
