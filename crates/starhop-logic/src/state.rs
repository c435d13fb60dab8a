//! Player state: everything that persists between sessions.
//!
//! [`PlayerState`] is a single owned value. Economy, event and upgrade
//! functions take it by reference and mutate it in place; nothing in the
//! crate keeps a global copy.

use crate::constants::gameplay;
use crate::galaxy::Galaxy;
use crate::upgrades::{UpgradeCategory, UpgradeEffects, UpgradeLevels};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PLANET KEYS AND ACTIONS
// ============================================================================

/// Identifies a planet across the galaxy. Rendered as `"{star}-{planet}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PlanetKey {
    pub star_id: u32,
    pub planet_id: u32,
}

impl PlanetKey {
    pub fn new(star_id: u32, planet_id: u32) -> Self {
        Self { star_id, planet_id }
    }
}

impl fmt::Display for PlanetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.star_id, self.planet_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid planet key {:?}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for PlanetKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError(s.to_string());
        let (star, planet) = s.split_once('-').ok_or_else(err)?;
        Ok(Self {
            star_id: star.parse().map_err(|_| err())?,
            planet_id: planet.parse().map_err(|_| err())?,
        })
    }
}

impl From<PlanetKey> for String {
    fn from(key: PlanetKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PlanetKey {
    type Error = ParseKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetAction {
    Scan,
    Mine,
    Explore,
}

/// Which one-shot actions have been completed on a planet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetActions {
    pub scanned: bool,
    pub mined: bool,
    pub explored: bool,
}

impl PlanetActions {
    pub fn is_done(&self, action: PlanetAction) -> bool {
        match action {
            PlanetAction::Scan => self.scanned,
            PlanetAction::Mine => self.mined,
            PlanetAction::Explore => self.explored,
        }
    }

    pub fn mark(&mut self, action: PlanetAction) {
        match action {
            PlanetAction::Scan => self.scanned = true,
            PlanetAction::Mine => self.mined = true,
            PlanetAction::Explore => self.explored = true,
        }
    }

    pub fn all_done(&self) -> bool {
        self.scanned && self.mined && self.explored
    }
}

/// Outcome summary kept for every resolved event. `template_id` is `None`
/// for events resolved before summaries were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolvedEvent {
    pub template_id: Option<String>,
    pub choice: Option<usize>,
    pub success: bool,
    pub fuel: i64,
    pub data: i64,
}

// ============================================================================
// JOURNAL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEntry {
    #[serde(rename_all = "camelCase")]
    Start {
        star_id: u32,
        planet_id: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    EnterSystem { star_id: u32 },
    #[serde(rename_all = "camelCase")]
    Jump {
        from_star_id: u32,
        to_star_id: u32,
        /// Light-years, rounded to one decimal.
        distance: f64,
        fuel_cost: u32,
    },
    #[serde(rename_all = "camelCase")]
    ScanPlanet {
        star_id: u32,
        planet_id: u32,
        data: i64,
    },
    #[serde(rename_all = "camelCase")]
    Discovery {
        star_id: u32,
        planet_id: u32,
        special: String,
    },
    #[serde(rename_all = "camelCase")]
    Mine {
        star_id: u32,
        planet_id: u32,
        fuel: i64,
        data: i64,
    },
    #[serde(rename_all = "camelCase")]
    Explore {
        star_id: u32,
        planet_id: u32,
        data: i64,
    },
    #[serde(rename_all = "camelCase")]
    Event {
        star_id: u32,
        planet_id: u32,
        template_id: String,
        choice: usize,
        success: bool,
        fuel: i64,
        data: i64,
    },
    #[serde(rename_all = "camelCase")]
    Upgrade {
        category: UpgradeCategory,
        tier: u8,
        cost: u32,
    },
    Note { text: String },
}

// ============================================================================
// PLAYER STATE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Galaxy,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub galaxy_seed: u32,
    pub visited_stars: BTreeSet<u32>,
    /// Stars the ship may jump to. Always holds star 0 and its neighbors
    /// once [`ensure_home_reachable`] has run.
    pub reachable_stars: BTreeSet<u32>,
    pub current_view: ViewMode,
    pub current_star_id: Option<u32>,
    pub ship_star_id: u32,
    /// Planet the ship is docked at, if any.
    pub ship_planet_id: Option<u32>,
    pub scanned_planets: BTreeSet<PlanetKey>,
    pub planet_actions: BTreeMap<PlanetKey, PlanetActions>,
    pub resolved_events: BTreeMap<PlanetKey, ResolvedEvent>,
    pub fuel: f64,
    pub data: i64,
    pub upgrades: UpgradeLevels,
    pub journal: Vec<JournalEntry>,
    pub total_jumps: u32,
    pub total_scans: u32,
}

/// Fresh state for a new game on `seed`. Star 0 is reachable; nothing is
/// visited yet.
pub fn create_state(seed: u32) -> PlayerState {
    PlayerState {
        galaxy_seed: seed,
        visited_stars: BTreeSet::new(),
        reachable_stars: BTreeSet::from([0]),
        current_view: ViewMode::Galaxy,
        current_star_id: None,
        ship_star_id: 0,
        ship_planet_id: None,
        scanned_planets: BTreeSet::new(),
        planet_actions: BTreeMap::new(),
        resolved_events: BTreeMap::new(),
        fuel: gameplay::BASE_FUEL,
        data: gameplay::STARTING_DATA,
        upgrades: UpgradeLevels::default(),
        journal: Vec::new(),
        total_jumps: 0,
        total_scans: 0,
    }
}

impl PlayerState {
    pub fn effects(&self) -> UpgradeEffects {
        self.upgrades.effects()
    }

    pub fn is_reachable(&self, star_id: u32) -> bool {
        self.reachable_stars.contains(&star_id)
    }

    pub fn is_visited(&self, star_id: u32) -> bool {
        self.visited_stars.contains(&star_id)
    }

    pub fn actions(&self, key: PlanetKey) -> PlanetActions {
        self.planet_actions.get(&key).copied().unwrap_or_default()
    }

    /// Mark `action` done on `key`. Returns false if it already was.
    /// Scanning also records the key in `scanned_planets`.
    pub fn mark_action(&mut self, key: PlanetKey, action: PlanetAction) -> bool {
        let entry = self.planet_actions.entry(key).or_default();
        if entry.is_done(action) {
            return false;
        }
        entry.mark(action);
        if action == PlanetAction::Scan {
            self.scanned_planets.insert(key);
        }
        true
    }

    pub fn is_event_resolved(&self, key: PlanetKey) -> bool {
        self.resolved_events.contains_key(&key)
    }

    pub fn log(&mut self, entry: JournalEntry) {
        log::debug!("journal: {:?}", entry);
        self.journal.push(entry);
    }
}

// ============================================================================
// REACHABILITY
// ============================================================================

/// Make every star within the current reveal radius of `star_id` reachable,
/// plus `star_id` itself.
pub fn reveal_around(state: &mut PlayerState, galaxy: &Galaxy, star_id: u32) {
    if galaxy.star(star_id).is_none() {
        return;
    }
    let hops = state.effects().reveal_hops();
    state.reachable_stars.insert(star_id);
    state
        .reachable_stars
        .extend(galaxy.neighbors_within(star_id, hops));
}

/// Record a visit and reveal the surroundings.
pub fn mark_visited(state: &mut PlayerState, galaxy: &Galaxy, star_id: u32) {
    state.visited_stars.insert(star_id);
    reveal_around(state, galaxy, star_id);
}

/// Star 0 and its direct neighbors are always reachable.
pub fn ensure_home_reachable(state: &mut PlayerState, galaxy: &Galaxy) {
    if galaxy.home().is_none() {
        return;
    }
    state.reachable_stars.insert(0);
    state.reachable_stars.extend(galaxy.neighbors_within(0, 1));
}

/// Recompute reachability after the reveal radius changed, e.g. when a
/// range or beacon upgrade is bought.
pub fn refresh_reachable(state: &mut PlayerState, galaxy: &Galaxy) {
    ensure_home_reachable(state, galaxy);
    let visited: Vec<u32> = state.visited_stars.iter().copied().collect();
    for id in visited {
        reveal_around(state, galaxy, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::generate_galaxy;

    #[test]
    fn test_create_state_defaults() {
        let s = create_state(7);
        assert_eq!(s.galaxy_seed, 7);
        assert_eq!(s.fuel, gameplay::BASE_FUEL);
        assert_eq!(s.data, 0);
        assert!(s.reachable_stars.contains(&0));
        assert!(s.visited_stars.is_empty());
        assert_eq!(s.current_view, ViewMode::Galaxy);
        assert_eq!(s.upgrades, UpgradeLevels::default());
    }

    #[test]
    fn test_planet_key_text_form() {
        let key = PlanetKey::new(12, 3);
        assert_eq!(key.to_string(), "12-3");
        assert_eq!("12-3".parse::<PlanetKey>(), Ok(key));
        assert!("12".parse::<PlanetKey>().is_err());
        assert!("a-3".parse::<PlanetKey>().is_err());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"12-3\"");
    }

    #[test]
    fn test_mark_action_once() {
        let mut s = create_state(1);
        let key = PlanetKey::new(0, 1);
        assert!(s.mark_action(key, PlanetAction::Scan));
        assert!(!s.mark_action(key, PlanetAction::Scan));
        assert!(s.scanned_planets.contains(&key));
        assert!(s.mark_action(key, PlanetAction::Mine));
        let actions = s.actions(key);
        assert!(actions.scanned && actions.mined && !actions.explored);
        assert!(!actions.all_done());
    }

    #[test]
    fn test_journal_tagging() {
        let entry = JournalEntry::Jump {
            from_star_id: 0,
            to_star_id: 4,
            distance: 12.3,
            fuel_cost: 6,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "jump");
        assert_eq!(json["fromStarId"], 0);
        assert_eq!(json["toStarId"], 4);
        let back: JournalEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_home_reachability() {
        let galaxy = generate_galaxy(42);
        let mut s = create_state(42);
        ensure_home_reachable(&mut s, &galaxy);
        assert!(s.is_reachable(0));
        for &n in &galaxy.stars[0].adjacent_ids {
            assert!(s.is_reachable(n));
        }
    }

    #[test]
    fn test_visit_reveals_neighbors() {
        let galaxy = generate_galaxy(42);
        let mut s = create_state(42);
        let target = galaxy.stars[0].adjacent_ids[0];
        mark_visited(&mut s, &galaxy, target);
        assert!(s.is_visited(target));
        for &n in &galaxy.stars[target as usize].adjacent_ids {
            assert!(s.is_reachable(n));
        }
    }

    #[test]
    fn test_range_upgrade_widens_reveal() {
        let galaxy = generate_galaxy(42);
        let mut s = create_state(42);
        mark_visited(&mut s, &galaxy, 0);
        let before = s.reachable_stars.len();
        s.upgrades.engines = 2;
        refresh_reachable(&mut s, &galaxy);
        let two_hops = galaxy.neighbors_within(0, 2);
        assert!(two_hops.iter().all(|id| s.is_reachable(*id)));
        assert!(s.reachable_stars.len() >= before);
    }

    #[test]
    fn test_reveal_unknown_star_noop() {
        let galaxy = generate_galaxy(42);
        let mut s = create_state(42);
        reveal_around(&mut s, &galaxy, 10_000);
        assert_eq!(s.reachable_stars, BTreeSet::from([0]));
    }
}
