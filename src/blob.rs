// Key-value blob file operations
//
// The blob is a single JSON object mapping keys to serialized JSON strings,
// mirroring the layout of browser local storage.

use eyre::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

pub type Blob = BTreeMap<String, String>;

/// Read the blob at `path`
///
/// A missing file yields an empty blob. An unreadable or malformed file is
/// logged and also yields an empty blob; loading never fails.
pub fn read_blob(path: &Path) -> Blob {
    if !path.exists() {
        // Nothing saved yet
        return Blob::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to read blob, starting empty");
            return Blob::new();
        }
    };

    match serde_json::from_str::<Blob>(&content) {
        Ok(blob) => {
            debug!(file = ?path, keys = blob.len(), "Loaded blob");
            blob
        }
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to parse blob, starting empty");
            Blob::new()
        }
    }
}

/// Replace the blob at `path` wholesale
///
/// Holds an exclusive lock on a sibling `.lock` file while writing a
/// temporary file and renaming it over the target.
pub fn write_blob(path: &Path, blob: &Blob) -> Result<()> {
    let lock_path = path.with_extension("lock");
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .context("Failed to open blob lock file")?;
    lock.lock_exclusive().context("Failed to acquire file lock")?;

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(blob).context("Failed to serialize blob")?;

    let mut file = File::create(&tmp_path).context("Failed to create temporary blob file")?;
    writeln!(file, "{}", json)?;
    file.sync_all()?; // Ensure data is flushed to disk

    fs::rename(&tmp_path, path).context("Failed to replace blob file")?;

    // Lock is automatically released when the lock file is dropped
    Ok(())
}

/// Decode one value of the blob, falling back to `None` when absent or malformed
pub fn get_item<T: DeserializeOwned>(blob: &Blob, key: &str) -> Option<T> {
    let raw = blob.get(key)?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = ?e, "Failed to parse blob entry, using default");
            None
        }
    }
}

/// Decode a JSON array of records, skipping entries that don't parse
pub fn read_records<T: DeserializeOwned>(blob: &Blob, key: &str) -> Vec<T> {
    let values: Vec<serde_json::Value> = match get_item(blob, key) {
        Some(v) => v,
        None => return Vec::new(),
    };

    let total = values.len();
    let mut records = Vec::with_capacity(total);

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(r) => records.push(r),
            Err(e) => {
                warn!(key, index, error = ?e, "Failed to parse record, skipping");
            }
        }
    }

    info!(key, count = records.len(), skipped = total - records.len(), "Loaded records from blob");

    records
}
