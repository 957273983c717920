//! Durable progress snapshots.
//!
//! The current set of answers is persisted as one JSON object under a
//! single versioned storage key, e.g.
//! `{ "degree1": "2_3_0_0_0", "degree2": "0_0_4_0_0" }`.
//! Saving always replaces the previous snapshot wholesale; loading fails
//! soft, treating a missing or corrupt payload as "no prior progress".

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const FIELD_PREFIX: &str = "degree";

/// Field name for a 1-based question index, e.g. `degree7`.
pub fn field_name(question: usize) -> String {
    format!("{FIELD_PREFIX}{question}")
}

/// Inverse of [`field_name`]. `None` for keys that do not follow the
/// pattern.
pub fn field_index(name: &str) -> Option<usize> {
    let index: usize = name.strip_prefix(FIELD_PREFIX)?.parse().ok()?;
    (index >= 1).then_some(index)
}

/// The full set of answered question → encoded value pairs, persisted as
/// one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, String>);

impl Snapshot {
    pub fn insert(&mut self, question: usize, value: impl Into<String>) {
        self.0.insert(field_name(question), value.into());
    }

    pub fn get(&self, question: usize) -> Option<&str> {
        self.0.get(&field_name(question)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value durable store holding the single current snapshot.
pub trait ProgressStore {
    /// Replace the stored snapshot. No merging with prior contents.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Read the stored snapshot. Never fails: a malformed payload is
    /// logged and reported as empty.
    fn load(&self) -> Snapshot;
}

fn decode(raw: &str) -> Snapshot {
    match serde_json::from_str(raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(%err, "discarding corrupt progress snapshot");
            Snapshot::default()
        }
    }
}

/// Snapshot persisted as `<dir>/<storage-key>.json`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            path: dir.into().join(format!("{key}.json")),
        }
    }

    /// `~/.config/academy-quiz/`, falling back to the current directory
    /// when no home directory can be determined.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("academy-quiz")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string(snapshot)?)?;
        Ok(())
    }

    fn load(&self) -> Snapshot {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Snapshot::default(),
            Err(err) => {
                tracing::warn!(%err, path = %self.path.display(), "failed to read progress file");
                Snapshot::default()
            }
        }
    }
}

/// In-memory store holding the raw serialized payload. Used when no
/// durable directory is wanted, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored payload with an arbitrary string, bypassing
    /// serialization.
    pub fn set_raw(&mut self, payload: impl Into<String>) {
        self.payload = Some(payload.into());
    }
}

impl ProgressStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.payload = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }

    fn load(&self) -> Snapshot {
        match &self.payload {
            Some(raw) => decode(raw),
            None => Snapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_round_trip() {
        assert_eq!(field_name(15), "degree15");
        assert_eq!(field_index("degree15"), Some(15));
        assert_eq!(field_index("degree0"), None);
        assert_eq!(field_index("grade3"), None);
        assert_eq!(field_index("degree"), None);
        assert_eq!(field_index("degreeX"), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(1, "1_0");
        snapshot.insert(2, "0_1");

        let mut store = MemoryStore::new();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load(), snapshot);
        // A second load yields the same snapshot again.
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn save_replaces_prior_snapshot() {
        let mut first = Snapshot::default();
        first.insert(1, "1_0");
        first.insert(2, "0_1");
        let mut second = Snapshot::default();
        second.insert(3, "2_2");

        let mut store = MemoryStore::new();
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, second);
        assert_eq!(loaded.get(1), None);
    }

    #[test]
    fn corrupt_payload_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set_raw("definitely not json");
        assert!(store.load().is_empty());

        store.set_raw("[1, 2, 3]");
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), "author_quiz_progress_v1");

        let mut snapshot = Snapshot::default();
        snapshot.insert(7, "0_0_3_1_0");
        store.save(&snapshot).unwrap();

        assert!(store.path().ends_with("author_quiz_progress_v1.json"));
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "author_quiz_progress_v1");
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), "author_quiz_progress_v1");
        store.save(&Snapshot::default()).unwrap();
        std::fs::write(store.path(), "{ truncated").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("deeper"), "progress");
        store.save(&Snapshot::default()).unwrap();
        assert!(store.path().exists());
    }
}
