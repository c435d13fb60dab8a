//! Name generation for stars, clusters and planets.

use crate::rng::Mulberry32;

static STAR_PREFIXES: &[&str] = &[
    "Alph", "Bet", "Cep", "Dra", "Eri", "For", "Gem", "Hyd", "Ind", "Kep", "Lyr", "Mir", "Nex",
    "Ori", "Pol", "Rig", "Sig", "Tau", "Vel", "Xen", "Zet",
];

static STAR_SUFFIXES: &[&str] = &[
    "a", "ar", "ax", "ei", "en", "ia", "is", "on", "or", "um", "us", "ix",
];

static CLUSTER_ADJECTIVES: &[&str] = &[
    "Crimson", "Azure", "Golden", "Silver", "Obsidian", "Verdant", "Amber", "Cobalt", "Ivory",
    "Scarlet", "Violet", "Ashen",
];

static CLUSTER_NOUNS: &[&str] = &[
    "Reach", "Expanse", "Drift", "Veil", "Crown", "Deep", "Haven", "Nexus", "Rift", "Gate",
    "Abyss", "Arc",
];

static ROMAN: &[&str] = &["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Rare discovery tags a planet may carry.
pub static SPECIALS: &[&str] = &[
    "Ancient Ruins Detected",
    "Rare Element Deposits",
    "Anomalous Signals",
    "Crystalline Formations",
    "Subterranean Caverns",
    "Magnetic Anomaly",
];

fn two_part(seed: u32, first: &[&str], second: &[&str], sep: &str) -> String {
    let mut rng = Mulberry32::new(seed);
    let a = first[rng.index(first.len())];
    let b = second[rng.index(second.len())];
    format!("{}{}{}", a, sep, b)
}

/// Star name from its seed: prefix draw, then suffix draw.
pub fn star_name(seed: u32) -> String {
    two_part(seed, STAR_PREFIXES, STAR_SUFFIXES, "")
}

/// Regional cluster name ("Crimson Reach").
pub fn cluster_name(seed: u32) -> String {
    two_part(seed, CLUSTER_ADJECTIVES, CLUSTER_NOUNS, " ")
}

/// Roman numeral for a 0-based planet index; decimal past ten.
pub fn roman(index: usize) -> String {
    match ROMAN.get(index) {
        Some(r) => (*r).to_string(),
        None => (index + 1).to_string(),
    }
}

pub fn planet_name(star_name: &str, index: usize) -> String {
    format!("{} {}", star_name, roman(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_name_golden() {
        assert_eq!(star_name(1), "Oria");
        assert_eq!(star_name(42), "Nexia");
        assert_eq!(star_name(301_225_621), "Tauor");
    }

    #[test]
    fn test_star_name_deterministic() {
        for seed in 0..200 {
            assert_eq!(star_name(seed), star_name(seed));
        }
    }

    #[test]
    fn test_star_name_from_pools() {
        for seed in 0..200 {
            let name = star_name(seed);
            let prefix = STAR_PREFIXES
                .iter()
                .find(|p| name.starts_with(**p))
                .expect("known prefix");
            let rest = &name[prefix.len()..];
            assert!(STAR_SUFFIXES.contains(&rest), "{}", name);
        }
    }

    #[test]
    fn test_cluster_name_two_words() {
        let name = cluster_name(7);
        let parts: Vec<&str> = name.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(CLUSTER_ADJECTIVES.contains(&parts[0]));
        assert!(CLUSTER_NOUNS.contains(&parts[1]));
    }

    #[test]
    fn test_planet_names() {
        assert_eq!(planet_name("Vela", 0), "Vela I");
        assert_eq!(planet_name("Vela", 3), "Vela IV");
        assert_eq!(planet_name("Vela", 9), "Vela X");
        assert_eq!(planet_name("Vela", 10), "Vela 11");
    }
}
