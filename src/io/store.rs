use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::Config;
use crate::model::entry::ChecklistEntry;
use crate::ops::entry_ops;

/// Seed data compiled into the binary
pub const BUNDLED_SEED: &str = include_str!("../templates/camos.json");

/// Error type for checklist storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("seed data unavailable ({origin}): {reason}")]
    StorageUnavailable { origin: String, reason: String },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The write failed and the unsaved content could not be logged either
    #[error("could not write {path}: {source} (recovery log unavailable: {log_error})")]
    WriteUnlogged {
        path: PathBuf,
        source: std::io::Error,
        log_error: std::io::Error,
    },
}

impl StoreError {
    /// Whether this is a failure of the persisted file rather than the seed
    pub fn is_storage_io(&self) -> bool {
        !matches!(self, StoreError::StorageUnavailable { .. })
    }
}

/// Where first-run data comes from
#[derive(Debug, Clone)]
pub enum Seed {
    Bundled,
    File(PathBuf),
    Text(String),
}

/// Result of a toggle that did not fail to save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The flag was flipped and written; carries the new value
    Toggled { done: bool },
    /// Nothing matched; nothing was written
    NoMatch,
}

/// The checklist collection and the file it lives in.
pub struct ItemStore {
    data_dir: PathBuf,
    path: PathBuf,
    seed: Seed,
    entries: Vec<ChecklistEntry>,
}

impl ItemStore {
    /// A store for `data_dir/file`. Nothing is read until [`ItemStore::load`].
    pub fn new(data_dir: &Path, file: &str, seed: Seed) -> Self {
        ItemStore {
            data_dir: data_dir.to_path_buf(),
            path: data_dir.join(file),
            seed,
            entries: Vec::new(),
        }
    }

    pub fn from_config(data_dir: &Path, config: &Config) -> Self {
        let seed = match &config.storage.seed {
            Some(file) => Seed::File(data_dir.join(file)),
            None => Seed::Bundled,
        };
        Self::new(data_dir, &config.storage.file, seed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    /// Read the persisted collection. When no state file exists yet (or it is
    /// blank), the seed is parsed and written out as the initial state.
    pub fn load(&mut self) -> Result<&[ChecklistEntry], StoreError> {
        let existing = if self.path.exists() {
            let content = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
                path: self.path.clone(),
                source: e,
            })?;
            if content.trim().is_empty() {
                None
            } else {
                Some(content)
            }
        } else {
            None
        };

        self.entries = match existing {
            Some(content) => self.parse_state(&content)?,
            None => {
                let seeded = self.read_seed()?;
                self.write_entries(&seeded)?;
                seeded
            }
        };
        Ok(&self.entries)
    }

    /// Throw away persisted progress and start again from the seed.
    pub fn reseed(&mut self) -> Result<&[ChecklistEntry], StoreError> {
        let seeded = self.read_seed()?;
        self.write_entries(&seeded)?;
        self.entries = seeded;
        Ok(&self.entries)
    }

    /// Overwrite the state file with the full collection.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write_entries(&self.entries)
    }

    /// Flip the first entry named `name` and save. On a save error the
    /// in-memory flip is kept.
    pub fn toggle(&mut self, name: &str) -> Result<ToggleOutcome, StoreError> {
        match entry_ops::toggle_by_name(&mut self.entries, name) {
            Some(done) => {
                self.save()?;
                Ok(ToggleOutcome::Toggled { done })
            }
            None => {
                self.log_miss(None, name);
                Ok(ToggleOutcome::NoMatch)
            }
        }
    }

    /// Flip the entry identified by `(category, name)` and save. On a save
    /// error the in-memory flip is kept.
    pub fn toggle_in(&mut self, category: &str, name: &str) -> Result<ToggleOutcome, StoreError> {
        match entry_ops::toggle_entry(&mut self.entries, category, name) {
            Some(done) => {
                self.save()?;
                Ok(ToggleOutcome::Toggled { done })
            }
            None => {
                self.log_miss(Some(category), name);
                Ok(ToggleOutcome::NoMatch)
            }
        }
    }

    fn parse_state(&self, content: &str) -> Result<Vec<ChecklistEntry>, StoreError> {
        serde_json::from_str(content).map_err(|e| {
            // The broken file stays on disk, so a lost log entry loses no data
            let _ = recovery::log_recovery(
                &self.data_dir,
                RecoveryEntry::now(RecoveryCategory::Parser, "state file unreadable")
                    .field("Source", self.path.display())
                    .field("Error", &e)
                    .body(content),
            );
            StoreError::ParseError {
                path: self.path.clone(),
                source: e,
            }
        })
    }

    fn read_seed(&self) -> Result<Vec<ChecklistEntry>, StoreError> {
        let (origin, text) = match &self.seed {
            Seed::Bundled => ("bundled".to_string(), BUNDLED_SEED.to_string()),
            Seed::Text(text) => ("inline".to_string(), text.clone()),
            Seed::File(path) => {
                let origin = path.display().to_string();
                let text =
                    fs::read_to_string(path).map_err(|e| StoreError::StorageUnavailable {
                        origin: origin.clone(),
                        reason: e.to_string(),
                    })?;
                (origin, text)
            }
        };

        let mut entries: Vec<ChecklistEntry> =
            serde_json::from_str(&text).map_err(|e| StoreError::StorageUnavailable {
                origin,
                reason: e.to_string(),
            })?;
        // Seed data never carries progress
        for entry in &mut entries {
            entry.done = false;
        }
        Ok(entries)
    }

    fn write_entries(&self, entries: &[ChecklistEntry]) -> Result<(), StoreError> {
        let content = serialize_entries(entries);
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            let entry = RecoveryEntry::now(RecoveryCategory::Write, "state write failed")
                .field("Target", self.path.display())
                .field("Error", &e)
                .body(content);
            let path = self.path.clone();
            return Err(match recovery::log_recovery(&self.data_dir, entry) {
                Ok(()) => StoreError::WriteError { path, source: e },
                Err(log_error) => StoreError::WriteUnlogged {
                    path,
                    source: e,
                    log_error,
                },
            });
        }
        Ok(())
    }

    fn log_miss(&self, category: Option<&str>, name: &str) {
        let mut entry = RecoveryEntry::now(RecoveryCategory::Lookup, "toggle matched nothing")
            .field("Name", name);
        if let Some(category) = category {
            entry = entry.field("Category", category);
        }
        let _ = recovery::log_recovery(&self.data_dir, entry);
    }
}

/// Two-space indented JSON array with a trailing newline
pub fn serialize_entries(entries: &[ChecklistEntry]) -> String {
    // Serializing plain structs of strings and bools cannot fail
    let mut out = serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const STATE_FILE: &str = "camos.json";

    fn store_with_seed(dir: &Path, seed: &str) -> ItemStore {
        ItemStore::new(dir, STATE_FILE, Seed::Text(seed.to_string()))
    }

    fn sample() -> Vec<ChecklistEntry> {
        vec![
            ChecklistEntry::new("Desert Eagle", "Pistols"),
            ChecklistEntry::new("M4", "Rifles").with_done(true),
            ChecklistEntry::new("GS45", "Pistols"),
        ]
    }

    fn write_state(dir: &Path, entries: &[ChecklistEntry]) {
        fs::write(dir.join(STATE_FILE), serialize_entries(entries)).unwrap();
    }

    #[test]
    fn first_run_seeds_state_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with_seed(dir.path(), r#"[{"name":"AK47","category":"Rifles"}]"#);

        let entries = store.load().unwrap().to_vec();
        assert_eq!(entries, vec![ChecklistEntry::new("AK47", "Rifles")]);

        let written = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"name\": \"AK47\",\n    \"category\": \"Rifles\",\n    \"done\": false\n  }\n]\n"
        );
    }

    #[test]
    fn blank_state_file_is_seeded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "  \n").unwrap();
        let mut store = store_with_seed(dir.path(), r#"[{"name":"AK47","category":"Rifles"}]"#);
        assert_eq!(store.load().unwrap().len(), 1);
        let reread: Vec<ChecklistEntry> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(reread, vec![ChecklistEntry::new("AK47", "Rifles")]);
    }

    #[test]
    fn seed_done_flags_are_cleared() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with_seed(
            dir.path(),
            r#"[{"name":"AK47","category":"Rifles","done":true}]"#,
        );
        assert!(!store.load().unwrap()[0].done);
    }

    #[test]
    fn existing_state_wins_over_seed() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), r#"[{"name":"AK47","category":"Rifles"}]"#);
        assert_eq!(store.load().unwrap(), sample().as_slice());
    }

    #[test]
    fn missing_done_field_reads_as_false() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(STATE_FILE),
            r#"[{"name":"M4","category":"Rifles"}]"#,
        )
        .unwrap();
        let mut store = store_with_seed(dir.path(), "[]");
        assert_eq!(store.load().unwrap(), &[ChecklistEntry::new("M4", "Rifles")]);
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();
        store.save().unwrap();

        let mut reloaded = store_with_seed(dir.path(), "[]");
        assert_eq!(reloaded.load().unwrap(), sample().as_slice());
    }

    #[test]
    fn bad_seed_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with_seed(dir.path(), "not json");
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
        assert!(!err.is_storage_io());
        assert!(!dir.path().join(STATE_FILE).exists());
    }

    #[test]
    fn missing_seed_file_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut store = ItemStore::new(
            dir.path(),
            STATE_FILE,
            Seed::File(dir.path().join("nope.json")),
        );
        assert!(matches!(
            store.load(),
            Err(StoreError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn corrupt_state_is_fatal_and_preserved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "[{\"name\": ").unwrap();
        let mut store = store_with_seed(dir.path(), r#"[{"name":"AK47","category":"Rifles"}]"#);

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::ParseError { .. }));
        assert!(err.is_storage_io());

        // The broken file is left alone and its content copied to the log
        assert_eq!(
            fs::read_to_string(dir.path().join(STATE_FILE)).unwrap(),
            "[{\"name\": "
        );
        let logged = recovery::read_recovery_entries(dir.path(), None);
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].category, RecoveryCategory::Parser);
        assert_eq!(logged[0].body, "[{\"name\": ");
    }

    #[test]
    fn toggle_persists() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();

        assert_eq!(
            store.toggle("Desert Eagle").unwrap(),
            ToggleOutcome::Toggled { done: true }
        );
        let mut reloaded = store_with_seed(dir.path(), "[]");
        assert!(reloaded.load().unwrap()[0].done);
    }

    #[test]
    fn toggle_in_uses_category() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();

        assert_eq!(
            store.toggle_in("Rifles", "M4").unwrap(),
            ToggleOutcome::Toggled { done: false }
        );
        assert_eq!(
            store.toggle_in("Pistols", "M4").unwrap(),
            ToggleOutcome::NoMatch
        );
    }

    #[test]
    fn toggle_unknown_name_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let before = fs::read(dir.path().join(STATE_FILE)).unwrap();

        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();
        assert_eq!(store.toggle("Ghost").unwrap(), ToggleOutcome::NoMatch);
        store.save().unwrap();

        assert_eq!(fs::read(dir.path().join(STATE_FILE)).unwrap(), before);
        let logged = recovery::read_recovery_entries(dir.path(), None);
        assert_eq!(logged[0].category, RecoveryCategory::Lookup);
    }

    #[test]
    fn save_failure_keeps_in_memory_toggle() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();

        // Point the store at a directory that does not exist
        store.path = dir.path().join("gone").join(STATE_FILE);
        let err = store.toggle("GS45").unwrap_err();
        assert!(matches!(err, StoreError::WriteError { .. }));
        assert!(store.entries()[2].done);

        let logged = recovery::read_recovery_entries(dir.path(), None);
        assert_eq!(logged[0].category, RecoveryCategory::Write);
        assert!(logged[0].body.contains("\"GS45\""));
    }

    #[test]
    fn save_failure_without_log_reports_both_errors() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), "[]");
        store.load().unwrap();

        store.path = dir.path().join("gone").join(STATE_FILE);
        store.data_dir = dir.path().join("gone");
        let err = store.toggle("GS45").unwrap_err();
        assert!(matches!(err, StoreError::WriteUnlogged { .. }));
        assert!(err.is_storage_io());
        assert!(err.to_string().contains("recovery log unavailable"));
        assert!(store.entries()[2].done);
    }

    #[test]
    fn reseed_discards_progress() {
        let dir = TempDir::new().unwrap();
        write_state(dir.path(), &sample());
        let mut store = store_with_seed(dir.path(), r#"[{"name":"AK47","category":"Rifles"}]"#);
        store.load().unwrap();
        store.reseed().unwrap();
        assert_eq!(store.entries(), &[ChecklistEntry::new("AK47", "Rifles")]);

        let mut reloaded = store_with_seed(dir.path(), "[]");
        assert_eq!(reloaded.load().unwrap().len(), 1);
    }

    #[test]
    fn bundled_seed_parses() {
        let entries: Vec<ChecklistEntry> = serde_json::from_str(BUNDLED_SEED).unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.done));
        assert!(entry_ops::ambiguous_names(&entries).is_empty());
    }

    #[test]
    fn from_config_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.file = "progress.json".into();
        config.storage.seed = Some("weapons.json".into());
        let store = ItemStore::from_config(dir.path(), &config);
        assert_eq!(store.path(), dir.path().join("progress.json"));
        assert!(matches!(&store.seed, Seed::File(p) if p == &dir.path().join("weapons.json")));
    }
}
