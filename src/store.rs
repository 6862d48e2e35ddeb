// Workout store backed by a single key-value blob

use crate::blob::{self, Blob};
use crate::models::WorkoutRecord;
use eyre::{Context, Result, eyre};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CURRENT_VERSION: u32 = 1;
const STORE_DIR: &str = ".gymlog";
const BLOB_FILE: &str = "storage.json";

const WORKOUTS_KEY: &str = "workouts";
const DARK_MODE_KEY: &str = "darkMode";

/// Persistent list of workout records plus the theme flag
///
/// Every mutation is followed by a full save, so the in-memory list and the
/// blob never diverge.
pub struct WorkoutStore {
    base_path: PathBuf,
    workouts: Vec<WorkoutRecord>,
    dark_mode: bool,
}

impl WorkoutStore {
    /// Open or create a store at the given path
    ///
    /// The store will be created in a `.gymlog` subdirectory of the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().join(STORE_DIR);

        // Create directory if it doesn't exist
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;

        let mut store = Self {
            base_path,
            workouts: Vec::new(),
            dark_mode: true,
        };

        store.write_version()?;
        store.load();

        Ok(store)
    }

    /// Get the base path of this store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn blob_path(&self) -> PathBuf {
        self.base_path.join(BLOB_FILE)
    }

    /// Write version file
    fn write_version(&self) -> Result<()> {
        let version_path = self.base_path.join(".version");
        if !version_path.exists() {
            fs::write(version_path, CURRENT_VERSION.to_string())?;
        }
        Ok(())
    }

    /// Replace in-memory state with the persisted blob
    ///
    /// Missing or malformed entries fall back to an empty list and dark mode.
    /// A record repeating an earlier record's ID is dropped.
    pub fn load(&mut self) {
        let blob = blob::read_blob(&self.blob_path());

        let mut seen = HashSet::new();
        self.workouts = blob::read_records::<WorkoutRecord>(&blob, WORKOUTS_KEY)
            .into_iter()
            .filter(|w| {
                let fresh = seen.insert(w.id);
                if !fresh {
                    warn!(id = w.id, "Duplicate workout ID in blob, skipping");
                }
                fresh
            })
            .collect();
        self.dark_mode = blob::get_item(&blob, DARK_MODE_KEY).unwrap_or(true);

        debug!(
            count = self.workouts.len(),
            dark_mode = self.dark_mode,
            "Store loaded"
        );
    }

    /// Serialize the full list and theme flag, overwriting the previous blob
    pub fn save(&self) -> Result<()> {
        self.write(&self.workouts, self.dark_mode)
    }

    fn write(&self, workouts: &[WorkoutRecord], dark_mode: bool) -> Result<()> {
        let mut blob = Blob::new();
        blob.insert(
            WORKOUTS_KEY.to_string(),
            serde_json::to_string(workouts).context("Failed to serialize workouts")?,
        );
        blob.insert(DARK_MODE_KEY.to_string(), dark_mode.to_string());

        blob::write_blob(&self.blob_path(), &blob)?;
        debug!(count = workouts.len(), "Store saved");
        Ok(())
    }

    /// Persist `workouts` and only then make it the in-memory list
    fn commit(&mut self, workouts: Vec<WorkoutRecord>) -> Result<()> {
        self.write(&workouts, self.dark_mode)?;
        self.workouts = workouts;
        Ok(())
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// All records in insertion order
    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    /// Get a record by ID
    pub fn get(&self, id: i64) -> Option<&WorkoutRecord> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Pick an ID for a record created at `now_ms`
    ///
    /// IDs are creation timestamps; a clash with an existing record moves the
    /// new ID past the current maximum.
    pub fn next_id(&self, now_ms: i64) -> i64 {
        match self.workouts.iter().map(|w| w.id).max() {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        }
    }

    /// Append a record whose derived fields are already computed
    ///
    /// Fails without changing anything if the ID is already taken or the save fails.
    pub fn add(&mut self, record: WorkoutRecord) -> Result<()> {
        if self.get(record.id).is_some() {
            return Err(eyre!("Workout ID {} already exists", record.id));
        }

        info!(id = record.id, exercise = %record.exercise, "Adding workout");
        let mut workouts = self.workouts.clone();
        workouts.push(record);
        self.commit(workouts)
    }

    /// Remove the record with `id`
    ///
    /// Returns false, without error, when no such record exists.
    pub fn delete_by_id(&mut self, id: i64) -> Result<bool> {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            debug!(id, "delete_by_id: no matching workout");
            return Ok(false);
        };

        let mut workouts = self.workouts.clone();
        workouts.remove(index);
        self.commit(workouts)?;

        info!(id, "Deleted workout");
        Ok(true)
    }

    /// Remove every record
    pub fn clear(&mut self) -> Result<()> {
        info!(count = self.workouts.len(), "Clearing all workouts");
        self.commit(Vec::new())
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<()> {
        self.write(&self.workouts, dark_mode)?;
        self.dark_mode = dark_mode;
        Ok(())
    }

    /// Flip the theme flag and return the new value
    pub fn toggle_theme(&mut self) -> Result<bool> {
        self.set_dark_mode(!self.dark_mode)?;
        Ok(self.dark_mode)
    }
}
