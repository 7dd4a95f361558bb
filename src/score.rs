use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "orchard-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Boundary contract for high-score persistence.
///
/// The engine only decides *whether* a write is warranted; the adapter
/// owns the act through this trait.
pub trait HighScoreStore {
    /// Loads the stored high score. A store with no record yet returns 0.
    fn load(&self) -> io::Result<u32>;

    /// Persists a new high score.
    fn save(&self, score: u32) -> io::Result<()>;
}

/// JSON-file store under the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Creates a store backed by an explicit file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the platform-correct default location.
    #[must_use]
    pub fn at_default_location() -> Self {
        let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.push(APP_DIR_NAME);
        base.push(SCORE_FILE_NAME);
        Self::new(base)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonScoreStore {
    /// Returns `Ok(0)` when the score file does not yet exist (first run)
    /// and `Err` when it exists but cannot be read or parsed, so the
    /// caller can surface a warning before entering raw terminal mode.
    fn load(&self) -> io::Result<u32> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        serde_json::from_str::<ScoreFile>(&raw)
            .map(|file| file.high_score)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn save(&self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = ScoreFile { high_score: score };
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

        fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreStore, JsonScoreStore};

    #[test]
    fn score_serialization_round_trip() {
        let store = store_at_unique_path("round_trip");

        store.save(42).expect("score save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&store);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let store = store_at_unique_path("missing");
        // Deliberately do not create the file.
        let loaded = store.load().expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let store = store_at_unique_path("malformed");
        if let Some(parent) = store.path().parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(store.path(), "not-json").expect("test file write should succeed");

        assert!(
            store.load().is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(&store);
    }

    #[test]
    fn save_overwrites_a_previous_record() {
        let store = store_at_unique_path("overwrite");

        store.save(10).expect("first save should succeed");
        store.save(250).expect("second save should succeed");

        assert_eq!(store.load().expect("load should succeed"), 250);
        cleanup_test_path(&store);
    }

    fn store_at_unique_path(label: &str) -> JsonScoreStore {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        let path: PathBuf = std::env::temp_dir()
            .join("orchard-snake-score-tests")
            .join(format!("{label}-{nanos}"))
            .join("scores.json");
        JsonScoreStore::new(path)
    }

    fn cleanup_test_path(store: &JsonScoreStore) {
        let _ = fs::remove_file(store.path());
        if let Some(parent) = store.path().parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
