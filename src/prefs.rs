use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::error::PrefsError;

pub const BEST_SCORE_KEY: &str = "best_score";

pub trait ScoreStore {
    /// Stored best score, or 0 if there is none.
    fn load_best(&self) -> u32;
    /// Best effort; failures are not reported to the game.
    fn save_best(&mut self, best: u32);
}

/// Flat JSON object of integer preferences in a single file.
#[derive(Debug)]
pub struct JsonPrefs {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonPrefs {
    /// Opens the store. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(err) => {
                warn!(%err, "starting with empty preferences");
                BTreeMap::new()
            }
        };
        JsonPrefs { path, values }
    }

    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("wrapsnake").join("prefs.json"),
            None => PathBuf::from("wrapsnake-prefs.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    pub fn put(&mut self, key: &str, value: i64) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn flush(&self) -> Result<(), PrefsError> {
        let io_err = |source| PrefsError::Io { path: self.path.clone(), source };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.values).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(io_err)
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, i64>, PrefsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => return Err(PrefsError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&raw).map_err(|source| PrefsError::Json { path: path.to_path_buf(), source })
}

impl ScoreStore for JsonPrefs {
    fn load_best(&self) -> u32 {
        self.get(BEST_SCORE_KEY)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    fn save_best(&mut self, best: u32) {
        match self.put(BEST_SCORE_KEY, best as i64) {
            Ok(()) => info!(best, "saved best score"),
            Err(err) => warn!(%err, "could not save best score"),
        }
    }
}

/// In-process store, counts writes.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    pub best: u32,
    pub writes: usize,
}

impl MemoryPrefs {
    pub fn with_best(best: u32) -> Self {
        MemoryPrefs { best, writes: 0 }
    }
}

impl ScoreStore for MemoryPrefs {
    fn load_best(&self) -> u32 {
        self.best
    }

    fn save_best(&mut self, best: u32) {
        self.best = best;
        self.writes += 1;
    }
}
