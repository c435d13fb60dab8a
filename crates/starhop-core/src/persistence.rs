//! Save/Load for player sessions
//!
//! The save form is the flat JSON produced by
//! [`starhop_logic::persistence::save_state`]. Two entry points exist:
//!
//! - [`save_game`] / [`load_game`] stream to any `Write`/`Read` and report
//!   every failure as a [`SaveError`].
//! - [`store_state`] / [`restore_state`] go through a [`SaveBackend`]
//!   key-value store. Restoring never fails: a missing, unreadable or
//!   malformed save is logged and treated as absent, so the caller starts
//!   a fresh game.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use starhop_logic::persistence::{from_saved, save_state, SavedState, SAVE_KEY, SCHEMA_VERSION};
use starhop_logic::state::PlayerState;

/// Write `state` as JSON.
pub fn save_game<W: Write>(writer: W, state: &PlayerState) -> Result<(), SaveError> {
    serde_json::to_writer(writer, &save_state(state))?;
    Ok(())
}

/// Read a JSON save, migrating older schemas.
pub fn load_game<R: Read>(reader: R) -> Result<PlayerState, SaveError> {
    let saved: SavedState = serde_json::from_reader(reader)?;
    let found = saved.schema_version.unwrap_or(1);
    if found > SCHEMA_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        });
    }
    from_saved(saved).ok_or(SaveError::Malformed)
}

// ============================================================================
// BACKENDS
// ============================================================================

/// A string key-value store holding serialized saves.
pub trait SaveBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-process store, used by tests and the headless harness.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SaveBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SaveBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves half a save behind.
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Serialize `state` under [`SAVE_KEY`].
pub fn store_state(backend: &mut dyn SaveBackend, state: &PlayerState) -> Result<(), SaveError> {
    let json = serde_json::to_string(&save_state(state))?;
    backend.write(SAVE_KEY, &json)
}

/// Load the session under [`SAVE_KEY`], or `None` if there is no usable save.
pub fn restore_state(backend: &dyn SaveBackend) -> Option<PlayerState> {
    let json = match backend.read(SAVE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read save: {}", e);
            return None;
        }
    };
    match load_game(json.as_bytes()) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("discarding save: {}", e);
            None
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
    /// Parsed, but required fields are missing.
    Malformed,
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Json(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save schema mismatch: expected at most {}, found {}",
                    expected, found
                )
            }
            SaveError::Malformed => write!(f, "Save is missing required fields"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starhop_logic::state::{create_state, PlanetAction, PlanetKey};
    use starhop_logic::upgrades::UpgradeCategory;

    fn played_state() -> PlayerState {
        let mut state = create_state(42);
        state.visited_stars.extend([0, 3, 5]);
        state.reachable_stars.extend([1, 2, 3, 4, 5]);
        state.ship_star_id = 5;
        state.ship_planet_id = Some(1);
        state.mark_action(PlanetKey::new(5, 1), PlanetAction::Scan);
        state.fuel = 64.0;
        state.data = 17;
        state.upgrades.engines = 1;
        state.total_jumps = 3;
        state.total_scans = 1;
        state
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("starhop-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_save_load_roundtrip() {
        let state = played_state();
        let mut buf = Vec::new();
        save_game(&mut buf, &state).expect("Save failed");
        let loaded = load_game(&buf[..]).expect("Load failed");

        assert_eq!(loaded.visited_stars, state.visited_stars);
        assert_eq!(loaded.reachable_stars, state.reachable_stars);
        assert_eq!(loaded.scanned_planets, state.scanned_planets);
        assert_eq!(loaded.planet_actions, state.planet_actions);
        assert_eq!(loaded.ship_star_id, 5);
        assert_eq!(loaded.ship_planet_id, Some(1));
        assert_eq!(loaded.fuel, 64.0);
        assert_eq!(loaded.data, 17);
        assert_eq!(loaded.upgrades.get(UpgradeCategory::Engines), 1);
        assert_eq!(loaded.total_jumps, 3);
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(load_game(&b"not json"[..]), Err(SaveError::Json(_))));
    }

    #[test]
    fn test_load_rejects_missing_fields() {
        let json = br#"{"galaxySeed": 42, "visitedStars": [0]}"#;
        assert!(matches!(load_game(&json[..]), Err(SaveError::Malformed)));
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let json = br#"{"schemaVersion": 99, "reachableStars": [0], "shipStarId": 0}"#;
        match load_game(&json[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SCHEMA_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_legacy_save_loads() {
        let json = br#"{"galaxySeed":42,"reachableStars":[0,1],"shipStarId":0,"scannedPlanets":["0-0"]}"#;
        let state = load_game(&json[..]).unwrap();
        assert_eq!(state.fuel, 100.0);
        assert_eq!(state.data, 0);
        assert!(state.actions(PlanetKey::new(0, 0)).scanned);
    }

    #[test]
    fn test_memory_backend_store_restore() {
        let mut backend = MemoryBackend::new();
        assert!(restore_state(&backend).is_none());

        let state = played_state();
        store_state(&mut backend, &state).unwrap();
        assert_eq!(backend.len(), 1);
        let restored = restore_state(&backend).unwrap();
        assert_eq!(restored.visited_stars, state.visited_stars);

        backend.remove(SAVE_KEY).unwrap();
        assert!(backend.is_empty());
        assert!(restore_state(&backend).is_none());
    }

    #[test]
    fn test_restore_discards_corrupt_save() {
        let mut backend = MemoryBackend::new();
        backend.write(SAVE_KEY, "{\"galaxySeed\": ").unwrap();
        assert!(restore_state(&backend).is_none());
        backend.write(SAVE_KEY, "{\"galaxySeed\": 7}").unwrap();
        assert!(restore_state(&backend).is_none());
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = temp_dir("file-backend");
        let mut backend = FileBackend::new(&dir);
        assert!(backend.read(SAVE_KEY).unwrap().is_none());

        let state = played_state();
        store_state(&mut backend, &state).unwrap();
        assert!(dir.join(format!("{}.json", SAVE_KEY)).exists());
        let restored = restore_state(&backend).unwrap();
        assert_eq!(restored.reachable_stars, state.reachable_stars);

        backend.remove(SAVE_KEY).unwrap();
        backend.remove(SAVE_KEY).unwrap();
        assert!(restore_state(&backend).is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
