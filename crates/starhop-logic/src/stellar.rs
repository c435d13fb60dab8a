//! Stellar classification tables: spectral classes and stellar remnants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static properties of a spectral class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralInfo {
    pub temp_k: u32,
    /// 0xRRGGBB display color.
    pub color: u32,
    /// Visual radius relative to a G star.
    pub star_scale: f64,
    pub min_planets: u32,
    pub max_planets: u32,
    pub temp_label: &'static str,
}

/// Harvard spectral class, hottest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpectralClass {
    O = 0,
    B = 1,
    A = 2,
    F = 3,
    G = 4,
    K = 5,
    M = 6,
}

impl SpectralClass {
    pub const ALL: [SpectralClass; 7] = [
        Self::O,
        Self::B,
        Self::A,
        Self::F,
        Self::G,
        Self::K,
        Self::M,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Weighted draw from one uniform sample, skewed toward cool classes.
    pub fn from_roll(r: f64) -> Self {
        if r < 0.55 {
            Self::M
        } else if r < 0.73 {
            Self::K
        } else if r < 0.85 {
            Self::G
        } else if r < 0.92 {
            Self::F
        } else if r < 0.96 {
            Self::A
        } else if r < 0.99 {
            Self::B
        } else {
            Self::O
        }
    }

    /// O and B stars bias toward scorched rocky and gaseous worlds.
    pub fn is_hot(self) -> bool {
        matches!(self, Self::O | Self::B)
    }

    /// K and M dwarfs bias toward cold outer systems.
    pub fn is_cool(self) -> bool {
        matches!(self, Self::K | Self::M)
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::B => "B",
            Self::A => "A",
            Self::F => "F",
            Self::G => "G",
            Self::K => "K",
            Self::M => "M",
        }
    }

    pub fn info(self) -> SpectralInfo {
        match self {
            Self::O => SpectralInfo {
                temp_k: 35_000,
                color: 0x2244ff,
                star_scale: 1.8,
                min_planets: 2,
                max_planets: 4,
                temp_label: "Blue Giant",
            },
            Self::B => SpectralInfo {
                temp_k: 18_000,
                color: 0x22ccff,
                star_scale: 1.5,
                min_planets: 3,
                max_planets: 5,
                temp_label: "Blue-White",
            },
            Self::A => SpectralInfo {
                temp_k: 8_500,
                color: 0x33eebb,
                star_scale: 1.3,
                min_planets: 3,
                max_planets: 6,
                temp_label: "White",
            },
            Self::F => SpectralInfo {
                temp_k: 6_500,
                color: 0xeedd44,
                star_scale: 1.1,
                min_planets: 4,
                max_planets: 7,
                temp_label: "Yellow-White",
            },
            Self::G => SpectralInfo {
                temp_k: 5_778,
                color: 0xffbb00,
                star_scale: 1.0,
                min_planets: 3,
                max_planets: 7,
                temp_label: "Yellow Dwarf",
            },
            Self::K => SpectralInfo {
                temp_k: 4_300,
                color: 0xff7700,
                star_scale: 0.85,
                min_planets: 3,
                max_planets: 6,
                temp_label: "Orange Dwarf",
            },
            Self::M => SpectralInfo {
                temp_k: 3_100,
                color: 0xff2200,
                star_scale: 0.65,
                min_planets: 2,
                max_planets: 5,
                temp_label: "Red Dwarf",
            },
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Static properties of a remnant type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemnantInfo {
    pub label: &'static str,
    pub color: u32,
    pub visual_scale: f64,
    pub min_count: u32,
    pub max_count: u32,
}

/// End-state star replacing normal stellar behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Remnant {
    BlackHole = 0,
    NeutronStar = 1,
    WhiteDwarf = 2,
}

impl Remnant {
    /// Assignment order when designating remnants.
    pub const ALL: [Remnant; 3] = [Self::BlackHole, Self::NeutronStar, Self::WhiteDwarf];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn info(self) -> RemnantInfo {
        match self {
            Self::BlackHole => RemnantInfo {
                label: "Black Hole",
                color: 0x110022,
                visual_scale: 0.9,
                min_count: 1,
                max_count: 2,
            },
            Self::NeutronStar => RemnantInfo {
                label: "Neutron Star",
                color: 0xaaccff,
                visual_scale: 0.4,
                min_count: 2,
                max_count: 3,
            },
            Self::WhiteDwarf => RemnantInfo {
                label: "White Dwarf",
                color: 0xeeeeff,
                visual_scale: 0.5,
                min_count: 3,
                max_count: 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_roll_thresholds() {
        assert_eq!(SpectralClass::from_roll(0.0), SpectralClass::M);
        assert_eq!(SpectralClass::from_roll(0.549), SpectralClass::M);
        assert_eq!(SpectralClass::from_roll(0.55), SpectralClass::K);
        assert_eq!(SpectralClass::from_roll(0.80), SpectralClass::G);
        assert_eq!(SpectralClass::from_roll(0.90), SpectralClass::F);
        assert_eq!(SpectralClass::from_roll(0.95), SpectralClass::A);
        assert_eq!(SpectralClass::from_roll(0.98), SpectralClass::B);
        assert_eq!(SpectralClass::from_roll(0.995), SpectralClass::O);
    }

    #[test]
    fn test_temperature_ordering() {
        for pair in SpectralClass::ALL.windows(2) {
            assert!(pair[0].info().temp_k > pair[1].info().temp_k);
        }
    }

    #[test]
    fn test_planet_ranges_valid() {
        for class in SpectralClass::ALL {
            let info = class.info();
            assert!(info.min_planets >= 1);
            assert!(info.min_planets <= info.max_planets);
            assert!(info.star_scale > 0.0);
        }
    }

    #[test]
    fn test_from_u8_roundtrip() {
        for class in SpectralClass::ALL {
            assert_eq!(SpectralClass::from_u8(class as u8), Some(class));
        }
        assert_eq!(SpectralClass::from_u8(7), None);
        for remnant in Remnant::ALL {
            assert_eq!(Remnant::from_u8(remnant as u8), Some(remnant));
        }
    }

    #[test]
    fn test_remnant_counts_valid() {
        for remnant in Remnant::ALL {
            let info = remnant.info();
            assert!(info.min_count <= info.max_count);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SpectralClass::G).unwrap(), "\"G\"");
        assert_eq!(
            serde_json::to_string(&Remnant::NeutronStar).unwrap(),
            "\"neutronStar\""
        );
    }
}
