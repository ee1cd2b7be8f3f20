//! Last-known snapshot on disk, used only as an offline fallback display.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{Config, model::WeatherSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub city: String,
    pub snapshot: WeatherSnapshot,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = Config::project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("last_snapshot.json")))
    }

    pub fn save(&self, city: &str, snapshot: &WeatherSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let state = SavedState {
            city: city.to_string(),
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string(&state).context("Failed to serialize snapshot")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot: {}", self.path.display()))
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<SavedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;

        let state = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))?;

        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Coordinates};
    use chrono::DateTime;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Oslo".into(),
            coord: Coordinates { lat: 59.91, lon: 10.75 },
            temperature_c: -3.2,
            feels_like_c: -8.0,
            humidity_pct: 80,
            wind_speed_mps: 4.1,
            visibility_m: None,
            pressure_hpa: 998,
            cloudiness_pct: 100,
            condition: Condition::Other("mist".into()),
            description: "mist".into(),
            icon: "50n".into(),
            sunrise: DateTime::from_timestamp(1_773_983_100, 0).unwrap(),
            sunset: DateTime::from_timestamp(1_774_028_700, 0).unwrap(),
        }
    }

    #[test]
    fn load_without_save_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snap.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_state_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data").join("snap.json"));

        store.save("oslo", &snapshot()).unwrap();
        let state = store.load().unwrap().expect("state was saved");

        assert_eq!(state.city, "oslo");
        assert_eq!(state.snapshot, snapshot());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(&path, "{not json").unwrap();

        let err = SnapshotStore::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse snapshot"));
    }
}
