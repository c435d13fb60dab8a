//! Planet type definitions and the type-selection tables.
//!
//! Each [`PlanetType`] maps to a [`PlanetTypeInfo`] holding the ranges that
//! planet attributes are drawn from. Selection is a cumulative-probability
//! lookup keyed on the host star's spectral class and whether the planet
//! sits in the inner or outer part of its system.

use crate::stellar::SpectralClass;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Atmosphere {
    None = 0,
    Thin = 1,
    Standard = 2,
    Dense = 3,
    Toxic = 4,
}

impl Atmosphere {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Thin => "Thin",
            Self::Standard => "Standard",
            Self::Dense => "Dense",
            Self::Toxic => "Toxic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetTypeInfo {
    pub label: &'static str,
    /// Inclusive integer size range.
    pub size: [u32; 2],
    pub habitability: [f64; 2],
    pub metal: [f64; 2],
    pub atmospheres: &'static [Atmosphere],
    pub ring_chance: f64,
    pub moon_chance: f64,
    pub max_moons: u32,
    /// Fuel harvested from one mining pass.
    pub fuel_yield: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PlanetType {
    Terran = 0,
    Desert = 1,
    Ice = 2,
    GasGiant = 3,
    Lava = 4,
    Ocean = 5,
    /// Water-rich sub-Neptune.
    Water = 6,
}

impl PlanetType {
    pub const ALL: [PlanetType; 7] = [
        Self::Terran,
        Self::Desert,
        Self::Ice,
        Self::GasGiant,
        Self::Lava,
        Self::Ocean,
        Self::Water,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Terran => "terran",
            Self::Desert => "desert",
            Self::Ice => "ice",
            Self::GasGiant => "gas_giant",
            Self::Lava => "lava",
            Self::Ocean => "ocean",
            Self::Water => "water",
        }
    }

    pub fn info(self) -> PlanetTypeInfo {
        use Atmosphere as A;
        match self {
            Self::Terran => PlanetTypeInfo {
                label: "Terran World",
                size: [4, 7],
                habitability: [55.0, 95.0],
                metal: [20.0, 60.0],
                atmospheres: &[A::Standard, A::Dense],
                ring_chance: 0.0,
                moon_chance: 0.5,
                max_moons: 2,
                fuel_yield: [3.0, 6.0],
            },
            Self::Desert => PlanetTypeInfo {
                label: "Desert World",
                size: [3, 6],
                habitability: [5.0, 30.0],
                metal: [50.0, 90.0],
                atmospheres: &[A::Thin, A::None],
                ring_chance: 0.0,
                moon_chance: 0.3,
                max_moons: 1,
                fuel_yield: [2.0, 5.0],
            },
            Self::Ice => PlanetTypeInfo {
                label: "Ice World",
                size: [2, 5],
                habitability: [0.0, 15.0],
                metal: [15.0, 45.0],
                atmospheres: &[A::Thin, A::None],
                ring_chance: 0.15,
                moon_chance: 0.4,
                max_moons: 2,
                fuel_yield: [4.0, 8.0],
            },
            Self::GasGiant => PlanetTypeInfo {
                label: "Gas Giant",
                size: [7, 10],
                habitability: [0.0, 0.0],
                metal: [0.0, 5.0],
                atmospheres: &[A::Dense],
                ring_chance: 0.6,
                moon_chance: 0.85,
                max_moons: 4,
                fuel_yield: [8.0, 15.0],
            },
            Self::Lava => PlanetTypeInfo {
                label: "Lava World",
                size: [2, 5],
                habitability: [0.0, 5.0],
                metal: [70.0, 100.0],
                atmospheres: &[A::Toxic, A::Thin],
                ring_chance: 0.0,
                moon_chance: 0.2,
                max_moons: 1,
                fuel_yield: [2.0, 4.0],
            },
            Self::Ocean => PlanetTypeInfo {
                label: "Ocean World",
                size: [4, 8],
                habitability: [40.0, 85.0],
                metal: [5.0, 25.0],
                atmospheres: &[A::Standard, A::Dense],
                ring_chance: 0.0,
                moon_chance: 0.5,
                max_moons: 2,
                fuel_yield: [4.0, 8.0],
            },
            Self::Water => PlanetTypeInfo {
                label: "Water World",
                size: [5, 8],
                habitability: [0.0, 10.0],
                metal: [0.0, 10.0],
                atmospheres: &[A::Dense, A::Toxic],
                ring_chance: 0.2,
                moon_chance: 0.6,
                max_moons: 3,
                fuel_yield: [5.0, 10.0],
            },
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// SELECTION TABLES
// ============================================================================

type Table = &'static [(PlanetType, f64)];

const HOT: Table = &[
    (PlanetType::Lava, 0.30),
    (PlanetType::Desert, 0.50),
    (PlanetType::GasGiant, 0.65),
    (PlanetType::Water, 0.75),
    (PlanetType::Ice, 0.88),
    (PlanetType::Ocean, 1.0),
];

const COOL_INNER: Table = &[
    (PlanetType::Terran, 0.25),
    (PlanetType::Desert, 0.45),
    (PlanetType::Ocean, 0.60),
    (PlanetType::Water, 0.75),
    (PlanetType::Lava, 1.0),
];

const COOL_OUTER: Table = &[
    (PlanetType::Ice, 0.35),
    (PlanetType::GasGiant, 0.60),
    (PlanetType::Water, 0.75),
    (PlanetType::Desert, 1.0),
];

const TEMPERATE_INNER: Table = &[
    (PlanetType::Terran, 0.25),
    (PlanetType::Desert, 0.45),
    (PlanetType::Lava, 0.58),
    (PlanetType::Ocean, 0.72),
    (PlanetType::Water, 0.85),
    (PlanetType::GasGiant, 1.0),
];

const TEMPERATE_OUTER: Table = &[
    (PlanetType::GasGiant, 0.28),
    (PlanetType::Ice, 0.45),
    (PlanetType::Terran, 0.60),
    (PlanetType::Ocean, 0.75),
    (PlanetType::Water, 0.88),
    (PlanetType::Desert, 1.0),
];

fn table_for(class: SpectralClass, inner: bool) -> Table {
    if class.is_hot() {
        HOT
    } else if class.is_cool() {
        if inner {
            COOL_INNER
        } else {
            COOL_OUTER
        }
    } else if inner {
        TEMPERATE_INNER
    } else {
        TEMPERATE_OUTER
    }
}

/// Pick a planet type from one uniform roll in `[0, 1)`.
pub fn pick_planet_type(class: SpectralClass, inner: bool, roll: f64) -> PlanetType {
    let table = table_for(class, inner);
    for &(kind, cumulative) in table {
        if roll < cumulative {
            return kind;
        }
    }
    table.last().map(|&(kind, _)| kind).unwrap_or(PlanetType::Desert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cumulative() {
        for class in SpectralClass::ALL {
            for inner in [true, false] {
                let table = table_for(class, inner);
                let mut prev = 0.0;
                for &(_, c) in table {
                    assert!(c > prev);
                    prev = c;
                }
                assert_eq!(prev, 1.0);
            }
        }
    }

    #[test]
    fn test_pick_edges() {
        assert_eq!(
            pick_planet_type(SpectralClass::O, true, 0.0),
            PlanetType::Lava
        );
        assert_eq!(
            pick_planet_type(SpectralClass::M, false, 0.1),
            PlanetType::Ice
        );
        assert_eq!(
            pick_planet_type(SpectralClass::G, true, 0.1),
            PlanetType::Terran
        );
        assert_eq!(
            pick_planet_type(SpectralClass::G, false, 0.999),
            PlanetType::Desert
        );
    }

    #[test]
    fn test_every_type_reachable() {
        let mut seen = std::collections::HashSet::new();
        for class in SpectralClass::ALL {
            for inner in [true, false] {
                for i in 0..100 {
                    seen.insert(pick_planet_type(class, inner, i as f64 / 100.0));
                }
            }
        }
        assert_eq!(seen.len(), PlanetType::ALL.len());
    }

    #[test]
    fn test_ranges_valid() {
        for kind in PlanetType::ALL {
            let info = kind.info();
            assert!(info.size[0] <= info.size[1]);
            assert!(info.habitability[0] <= info.habitability[1]);
            assert!(info.habitability[1] <= 100.0);
            assert!(info.metal[0] <= info.metal[1]);
            assert!(info.metal[1] <= 100.0);
            assert!(!info.atmospheres.is_empty());
            assert!(info.fuel_yield[0] <= info.fuel_yield[1]);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&PlanetType::GasGiant).unwrap(),
            "\"gas_giant\""
        );
        let t: PlanetType = serde_json::from_str("\"ocean\"").unwrap();
        assert_eq!(t, PlanetType::Ocean);
    }
}
