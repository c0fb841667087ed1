//! JSON key-value persistence
//!
//! Each state collection is stored as one JSON file under the data
//! directory (`~/.studyflow/` by default), mirroring the storage keys the
//! store uses. Writes go through an exclusive lock plus the temp-file +
//! rename pattern so a crash mid-write never leaves a corrupt file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key constants, one per persisted collection
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const SUBJECTS: &str = "subjects";
    pub const TOPICS: &str = "topics";
    pub const SESSIONS: &str = "sessions";
    pub const COINS: &str = "coins";
    pub const PETS: &str = "pets";
    pub const STREAK: &str = "streak";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const DAILY_BONUS: &str = "daily_bonus";
    pub const LUCKY_COIN: &str = "lucky_coin";
    pub const WEEKLY_PLANS: &str = "weekly_plans";
}

/// File-backed key-value storage for the store's collections
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Default data directory (~/.studyflow/)
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studyflow")
    }

    /// Storage rooted at a specific directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage at the default location
    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load a value, falling back when the file is missing or unreadable.
    ///
    /// A corrupt file is reported at warn level and treated as absent; the
    /// caller's fallback wins. The in-memory state is the source of truth.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let path = self.path_for(key);
        if !path.exists() {
            return fallback;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("failed to read {}: {err}", path.display());
                return fallback;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("failed to parse {}: {err}", path.display());
                fallback
            }
        }
    }

    /// Save a value with an exclusive lock and atomic rename.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {key}"))?;

        // Separate lock file so the rename below never races a writer
        let lock_path = path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to acquire lock for {key}"))?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {key}"))?;
        temp_file
            .sync_all()
            .with_context(|| format!("Failed to sync {key}"))?;

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename {}", path.display()))?;

        // Lock released when lock_file drops
        Ok(())
    }
}
