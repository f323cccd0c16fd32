//! JSON File Store
//!
//! Persistent store backed by a single JSON object mapping keys to strings.
//! The whole map is rewritten on every successful `set`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{check_quota, usage_of, KeyValueStore, StoreError};

// == JSON File Store ==
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    usage: usize,
    quota: usize,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing contents.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first write.
    pub fn open<P: AsRef<Path>>(path: P, quota: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        let usage = usage_of(&entries);
        info!(
            "Opened store {:?}: {} keys, {} of {} bytes used",
            path,
            entries.len(),
            usage,
            quota
        );
        if usage > quota {
            warn!("Store {:?} already exceeds its quota", path);
        }

        Ok(Self {
            path,
            entries,
            usage,
            quota,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently used by keys and values.
    pub fn usage(&self) -> usize {
        self.usage
    }

    /// Writes the map to a sibling temp file, then renames it over the
    /// target so readers never observe a half-written file.
    ///
    /// The temp file is removed again if any step fails.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        let result = self
            .write_tmp(&tmp)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(StoreError::from));
        if let Err(e) = &result {
            warn!("Failed to persist store {:?}: {}", self.path, e);
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to remove temp file {:?}: {}", tmp, cleanup);
                }
            }
            return result;
        }
        debug!("Persisted {} keys to {:?}", self.entries.len(), self.path);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_tmp(&self, tmp: &Path) -> Result<(), StoreError> {
        let mut file = File::create(tmp)?;
        serde_json::to_writer(&mut file, &self.entries)?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let usage = check_quota(&self.entries, self.usage, self.quota, key, value)
            .inspect_err(|e| warn!("Rejected write to '{}': {}", key, e))?;

        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Roll back so memory matches what is on disk
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        self.usage = usage;
        Ok(())
    }
}
