//! Save codec: [`PlayerState`] to and from its flat JSON form.
//!
//! Sets become sorted arrays and planet keys become `"{star}-{planet}"`
//! strings. Every field of [`SavedState`] is optional on input so that saves
//! written by older versions still parse; [`from_saved`] fills the gaps.
//!
//! Loading never fails loudly. A save that cannot be parsed, lacks
//! `reachableStars` or `shipStarId`, or was written by a newer schema is
//! discarded and the caller starts fresh.

use crate::constants::gameplay;
use crate::economy::max_fuel;
use crate::state::{
    create_state, JournalEntry, PlanetActions, PlanetKey, PlayerState, ResolvedEvent, ViewMode,
};
use crate::upgrades::UpgradeLevels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current save layout. Saves without a version field are version 1.
pub const SCHEMA_VERSION: u32 = 2;

/// Key under which key-value backends store the save.
pub const SAVE_KEY: &str = "starhop_save";

#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Json(e)
    }
}

/// A resolved-event entry as stored. Version 1 saves only recorded `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedResolution {
    Flag(bool),
    Summary(ResolvedEvent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedState {
    pub schema_version: Option<u32>,
    pub galaxy_seed: Option<u32>,
    pub visited_stars: Vec<u32>,
    pub reachable_stars: Option<Vec<u32>>,
    pub current_view: Option<ViewMode>,
    pub current_star_id: Option<u32>,
    pub ship_star_id: Option<u32>,
    pub ship_planet_id: Option<u32>,
    pub scanned_planets: Vec<String>,
    pub planet_actions: Option<BTreeMap<String, PlanetActions>>,
    pub resolved_events: Option<BTreeMap<String, SavedResolution>>,
    pub fuel: Option<f64>,
    pub data: Option<i64>,
    pub upgrades: Option<UpgradeLevels>,
    /// Kept untyped so legacy and unknown entries can be migrated one by one.
    pub journal: Vec<serde_json::Value>,
    pub total_jumps: Option<u32>,
    pub total_scans: Option<u32>,
}

// ============================================================================
// SAVE
// ============================================================================

pub fn save_state(state: &PlayerState) -> SavedState {
    SavedState {
        schema_version: Some(SCHEMA_VERSION),
        galaxy_seed: Some(state.galaxy_seed),
        visited_stars: state.visited_stars.iter().copied().collect(),
        reachable_stars: Some(state.reachable_stars.iter().copied().collect()),
        current_view: Some(state.current_view),
        current_star_id: state.current_star_id,
        ship_star_id: Some(state.ship_star_id),
        ship_planet_id: state.ship_planet_id,
        scanned_planets: state.scanned_planets.iter().map(|k| k.to_string()).collect(),
        planet_actions: Some(
            state
                .planet_actions
                .iter()
                .map(|(k, a)| (k.to_string(), *a))
                .collect(),
        ),
        resolved_events: Some(
            state
                .resolved_events
                .iter()
                .map(|(k, r)| (k.to_string(), SavedResolution::Summary(r.clone())))
                .collect(),
        ),
        fuel: Some(state.fuel),
        data: Some(state.data),
        upgrades: Some(state.upgrades),
        journal: state
            .journal
            .iter()
            .filter_map(|e| serde_json::to_value(e).ok())
            .collect(),
        total_jumps: Some(state.total_jumps),
        total_scans: Some(state.total_scans),
    }
}

pub fn to_json(state: &PlayerState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&save_state(state))?)
}

// ============================================================================
// LOAD
// ============================================================================

/// Parse and migrate a save. `None` means "no usable save".
pub fn load_state(json: &str) -> Option<PlayerState> {
    match serde_json::from_str::<SavedState>(json) {
        Ok(saved) => from_saved(saved),
        Err(e) => {
            log::warn!("discarding unreadable save: {}", e);
            None
        }
    }
}

fn parse_key(raw: &str) -> Option<PlanetKey> {
    match raw.parse() {
        Ok(key) => Some(key),
        Err(e) => {
            log::warn!("save: skipping {}", e);
            None
        }
    }
}

fn migrate_journal_entry(value: serde_json::Value) -> Option<JournalEntry> {
    match value {
        serde_json::Value::String(text) => Some(JournalEntry::Note { text }),
        other => match serde_json::from_value(other) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("save: dropping journal entry: {}", e);
                None
            }
        },
    }
}

/// Rebuild a [`PlayerState`] from its saved form, migrating older layouts.
pub fn from_saved(saved: SavedState) -> Option<PlayerState> {
    let version = saved.schema_version.unwrap_or(1);
    if version > SCHEMA_VERSION {
        log::warn!(
            "discarding save with schema {} (supported up to {})",
            version,
            SCHEMA_VERSION
        );
        return None;
    }
    let Some(reachable) = saved.reachable_stars else {
        log::warn!("discarding save without reachableStars");
        return None;
    };
    let Some(ship_star_id) = saved.ship_star_id else {
        log::warn!("discarding save without shipStarId");
        return None;
    };

    let mut state = create_state(saved.galaxy_seed.unwrap_or(crate::constants::galaxy::DEFAULT_SEED));
    state.visited_stars = saved.visited_stars.into_iter().collect();
    state.reachable_stars = reachable.into_iter().collect();
    state.reachable_stars.insert(0);
    state.ship_star_id = ship_star_id;
    state.ship_planet_id = saved.ship_planet_id;

    // Always resume on the galaxy map.
    state.current_view = ViewMode::Galaxy;
    state.current_star_id = None;

    state.scanned_planets = saved
        .scanned_planets
        .iter()
        .filter_map(|k| parse_key(k))
        .collect();
    state.planet_actions = saved
        .planet_actions
        .unwrap_or_default()
        .iter()
        .filter_map(|(k, a)| parse_key(k).map(|key| (key, *a)))
        .collect();
    for key in &state.scanned_planets {
        state.planet_actions.entry(*key).or_insert(PlanetActions {
            scanned: true,
            mined: false,
            explored: false,
        });
    }
    let scanned_from_actions: Vec<PlanetKey> = state
        .planet_actions
        .iter()
        .filter(|(_, a)| a.scanned)
        .map(|(k, _)| *k)
        .collect();
    state.scanned_planets.extend(scanned_from_actions);

    state.resolved_events = saved
        .resolved_events
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, r)| {
            let key = parse_key(&k)?;
            match r {
                SavedResolution::Flag(true) => Some((key, ResolvedEvent::default())),
                SavedResolution::Flag(false) => None,
                SavedResolution::Summary(summary) => Some((key, summary)),
            }
        })
        .collect();

    state.upgrades = saved.upgrades.unwrap_or_default().clamped();
    let fuel = saved.fuel.filter(|f| f.is_finite()).unwrap_or(gameplay::BASE_FUEL);
    state.fuel = fuel.clamp(0.0, max_fuel(&state));
    state.data = saved.data.unwrap_or(gameplay::STARTING_DATA).max(0);
    state.journal = saved
        .journal
        .into_iter()
        .filter_map(migrate_journal_entry)
        .collect();
    state.total_jumps = saved.total_jumps.unwrap_or(0);
    state.total_scans = saved.total_scans.unwrap_or(0);

    if version < SCHEMA_VERSION {
        log::info!("migrated save from schema {} to {}", version, SCHEMA_VERSION);
    }
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::UpgradeCategory;
    use std::collections::BTreeSet;

    fn played_state() -> PlayerState {
        let mut s = create_state(42);
        s.visited_stars = BTreeSet::from([0, 3, 7]);
        s.reachable_stars = BTreeSet::from([0, 1, 3, 5, 7, 9]);
        s.ship_star_id = 7;
        s.ship_planet_id = Some(2);
        s.mark_action(PlanetKey::new(0, 0), crate::state::PlanetAction::Scan);
        s.mark_action(PlanetKey::new(7, 2), crate::state::PlanetAction::Mine);
        s.resolved_events.insert(
            PlanetKey::new(3, 1),
            ResolvedEvent {
                template_id: Some("derelict_ship".into()),
                choice: Some(1),
                success: true,
                fuel: 0,
                data: 9,
            },
        );
        s.fuel = 73.5;
        s.data = 120;
        s.upgrades.engines = 2;
        s.upgrades.comms = 1;
        s.journal.push(JournalEntry::Jump {
            from_star_id: 3,
            to_star_id: 7,
            distance: 12.5,
            fuel_cost: 5,
        });
        s.journal.push(JournalEntry::Upgrade {
            category: UpgradeCategory::Engines,
            tier: 2,
            cost: 120,
        });
        s.total_jumps = 2;
        s.total_scans = 1;
        s
    }

    #[test]
    fn test_round_trip() {
        let s = played_state();
        let json = to_json(&s).unwrap();
        let back = load_state(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_view_reset_on_load() {
        let mut s = played_state();
        s.current_view = ViewMode::System;
        s.current_star_id = Some(7);
        let back = load_state(&to_json(&s).unwrap()).unwrap();
        assert_eq!(back.current_view, ViewMode::Galaxy);
        assert_eq!(back.current_star_id, None);
    }

    #[test]
    fn test_saved_form_shape() {
        let value = serde_json::to_value(save_state(&played_state())).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(value["reachableStars"], serde_json::json!([0, 1, 3, 5, 7, 9]));
        assert_eq!(value["scannedPlanets"], serde_json::json!(["0-0"]));
        assert_eq!(value["planetActions"]["7-2"]["mined"], true);
        assert_eq!(value["journal"][0]["type"], "jump");
    }

    #[test]
    fn test_legacy_save_migrates() {
        let json = r#"{"galaxySeed":42,"reachableStars":[0,1],"shipStarId":0,"scannedPlanets":["0-0"]}"#;
        let s = load_state(json).unwrap();
        assert_eq!(s.fuel, gameplay::BASE_FUEL);
        assert_eq!(s.data, 0);
        assert_eq!(
            s.actions(PlanetKey::new(0, 0)),
            PlanetActions {
                scanned: true,
                mined: false,
                explored: false
            }
        );
        assert_eq!(s.upgrades, UpgradeLevels::default());
        assert_eq!(s.total_jumps, 0);
    }

    #[test]
    fn test_backfill_keeps_existing_actions() {
        let json = r#"{"reachableStars":[0],"shipStarId":0,"scannedPlanets":["1-1"],
            "planetActions":{"1-1":{"scanned":true,"mined":true,"explored":false}}}"#;
        let s = load_state(json).unwrap();
        assert!(s.actions(PlanetKey::new(1, 1)).mined);
    }

    #[test]
    fn test_missing_required_fields_discarded() {
        assert!(load_state(r#"{"galaxySeed":1,"shipStarId":0}"#).is_none());
        assert!(load_state(r#"{"galaxySeed":1,"reachableStars":[0]}"#).is_none());
        assert!(load_state("not json").is_none());
        assert!(load_state(r#"{"reachableStars":"oops","shipStarId":0}"#).is_none());
    }

    #[test]
    fn test_newer_schema_discarded() {
        let json = r#"{"schemaVersion":99,"reachableStars":[0],"shipStarId":0}"#;
        assert!(load_state(json).is_none());
    }

    #[test]
    fn test_legacy_resolved_flags_and_journal() {
        let json = r#"{"reachableStars":[2],"shipStarId":2,
            "resolvedEvents":{"2-0":true,"2-1":false},
            "journal":["Arrived somewhere",{"type":"enter_system","starId":2},{"type":"mystery"}]}"#;
        let s = load_state(json).unwrap();
        assert!(s.reachable_stars.contains(&0));
        assert!(s.is_event_resolved(PlanetKey::new(2, 0)));
        assert!(!s.is_event_resolved(PlanetKey::new(2, 1)));
        assert_eq!(s.resolved_events[&PlanetKey::new(2, 0)].template_id, None);
        assert_eq!(
            s.journal,
            vec![
                JournalEntry::Note {
                    text: "Arrived somewhere".into()
                },
                JournalEntry::EnterSystem { star_id: 2 },
            ]
        );
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let json = r#"{"reachableStars":[0],"shipStarId":0,"fuel":500,
            "upgrades":{"engines":7},"data":-4}"#;
        let s = load_state(json).unwrap();
        assert_eq!(s.upgrades.engines, 3);
        assert_eq!(s.fuel, 100.0);
        assert_eq!(s.data, 0);
    }
}
